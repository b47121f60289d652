use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_translator::RequestFailure;

pub(crate) struct ApiError(pub(crate) RequestFailure);

/// A failure parked on a response until the translation middleware, which knows the request URL, renders it
#[derive(Clone)]
pub(crate) struct PendingFailure(pub(crate) Arc<RequestFailure>);

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!("Returning error to client: {}", self.0);
        let mut response: Response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(PendingFailure(Arc::new(self.0)));
        response
    }
}

impl<E> From<E> for ApiError
where
    E: Into<RequestFailure>,
{
    fn from(value: E) -> Self {
        ApiError(value.into())
    }
}
