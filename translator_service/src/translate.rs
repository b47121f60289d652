use std::any::Any;

use axum::{
    extract::{Request, State},
    http::{
        header::{ALLOW, HOST},
        StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use error_translator::{ErrorTranslator, RequestFailure};
use tracing::instrument;

use crate::errors::{ApiError, PendingFailure};
use crate::state::AppState;

#[instrument(skip_all)]
pub(crate) async fn translate_failures(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let url = request_url(app_state.public_base_url.as_deref(), &request);
    let method = request.method().clone();

    let mut response = next.run(request).await;

    if let Some(PendingFailure(failure)) = response.extensions_mut().remove::<PendingFailure>() {
        return render(&app_state.translator, &failure, &url);
    }

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        let failure = RequestFailure::MethodNotAllowed(format!(
            "Request method '{method}' is not supported"
        ));
        let allow = response.headers().get(ALLOW).cloned();
        let mut translated = render(&app_state.translator, &failure, &url);
        if let Some(allow) = allow {
            translated.headers_mut().insert(ALLOW, allow);
        }
        return translated;
    }

    response
}

fn render(translator: &ErrorTranslator, failure: &RequestFailure, url: &str) -> Response {
    let error_response = translator.translate(failure, url);
    tracing::trace!("Translated failure: {error_response:?}");
    (error_response.status_code(), Json(error_response)).into_response()
}

pub(crate) fn request_url(public_base_url: Option<&str>, request: &Request) -> String {
    let uri = request.uri();
    let path = uri.path();

    if let Some(public_base_url) = public_base_url {
        return format!("{}{path}", public_base_url.trim_end_matches('/'));
    }

    if let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) {
        return format!("{scheme}://{authority}{path}");
    }

    match request
        .headers()
        .get(HOST)
        .and_then(|host| host.to_str().ok())
    {
        Some(host) => format!("http://{host}{path}"),
        None => path.to_string(),
    }
}

pub(crate) fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(detail) = panic.downcast_ref::<String>() {
        detail.clone()
    } else if let Some(detail) = panic.downcast_ref::<&str>() {
        detail.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError(RequestFailure::Unexpected(eyre::eyre!(
        "Handler panicked: {detail}"
    )))
    .into_response()
}
