use async_trait::async_trait;
use axum::body::Body;
use axum::body::Bytes;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::RawPathParams;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::http::Request;
use axum::http::Uri;
use error_translator::{RequestFailure, Validate};
use mime::Mime;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::errors::ApiError;

/// Axum's Json extractor, with rejections classified as request failures
pub(crate) struct JsonBody<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[instrument(skip(req, state))]
    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers())?;
        if !is_json(&content_type) {
            return Err(ApiError(RequestFailure::UnsupportedMediaType(format!(
                "Content type '{content_type}' not supported"
            ))));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestFailure::MessageNotReadable {
                reason: e.body_text(),
            })?;

        if tracing::enabled!(tracing::Level::TRACE) {
            match std::str::from_utf8(&bytes) {
                Ok(request) => tracing::trace!("Got request: {request}"),
                Err(e) => tracing::trace!("Could not parse request as UTF-8: {e}"),
            }
        }

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            RequestFailure::MessageNotReadable {
                reason: e.to_string(),
            }
        })?;
        Ok(JsonBody(value))
    }
}

pub(crate) struct ValidJson<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        let field_errors = value.validate();
        if !field_errors.is_empty() {
            tracing::debug!("Request body failed validation on {} field(s)", field_errors.len());
            return Err(ApiError(RequestFailure::field_errors(field_errors)));
        }

        Ok(ValidJson(value))
    }
}

pub(crate) struct ParamPath<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ParamPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw_params = RawPathParams::from_request_parts(parts, state)
            .await
            .map(|params| {
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ParamPath(value)),
            Err(rejection) => Err(ApiError(path_failure(rejection, &raw_params))),
        }
    }
}

fn path_failure(rejection: PathRejection, raw_params: &[(String, String)]) -> RequestFailure {
    match rejection {
        PathRejection::FailedToDeserializePathParams(error) => match error.kind() {
            ErrorKind::ParseErrorAtKey { key, value, .. } => {
                RequestFailure::type_mismatch(key.as_str(), value.as_str())
            }
            ErrorKind::ParseErrorAtIndex { index, value, .. } => {
                let name = raw_params
                    .get(*index)
                    .map(|(key, _)| key.clone())
                    .unwrap_or_else(|| index.to_string());
                RequestFailure::type_mismatch(name, value.as_str())
            }
            ErrorKind::ParseError { value, .. } => {
                let name = raw_params
                    .iter()
                    .find(|(_, raw)| raw == value)
                    .map(|(key, _)| key.clone())
                    .unwrap_or_else(|| "path".to_string());
                RequestFailure::type_mismatch(name, value.as_str())
            }
            _ => RequestFailure::BadRequest(error.body_text()),
        },
        other => RequestFailure::Unexpected(eyre::eyre!("Path parameters unavailable: {other}")),
    }
}

pub(crate) struct ParamQuery<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ParamQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RequestFailure::BadRequest(rejection.body_text()))?;
        Ok(ParamQuery(value))
    }
}

// Conditions are `name`, `!name`, `name=value` and `name!=value`
pub(crate) fn require_params(conditions: &[&str], uri: &Uri) -> Result<(), RequestFailure> {
    let params = url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .into_owned()
        .collect::<Vec<_>>();

    if conditions
        .iter()
        .all(|condition| condition_met(condition, &params))
    {
        return Ok(());
    }

    Err(RequestFailure::UnsatisfiedParameter {
        conditions: conditions.iter().map(|c| c.to_string()).collect(),
    })
}

fn condition_met(condition: &str, params: &[(String, String)]) -> bool {
    if let Some((name, expected)) = condition.split_once("!=") {
        return !params
            .iter()
            .any(|(key, value)| key == name && value == expected);
    }
    if let Some((name, expected)) = condition.split_once('=') {
        return params
            .iter()
            .any(|(key, value)| key == name && value == expected);
    }
    if let Some(name) = condition.strip_prefix('!') {
        return !params.iter().any(|(key, _)| key == name);
    }
    params.iter().any(|(key, _)| key == condition)
}

fn content_type(headers: &HeaderMap) -> Result<Mime, RequestFailure> {
    let Some(content_type) = headers.get(CONTENT_TYPE) else {
        return Ok(mime::APPLICATION_OCTET_STREAM);
    };

    let content_type = String::from_utf8_lossy(content_type.as_bytes());
    content_type.parse().map_err(|_| {
        RequestFailure::UnsupportedMediaType(format!("Invalid mime type '{content_type}'"))
    })
}

fn is_json(mime: &Mime) -> bool {
    mime.type_() == "application"
        && (mime.subtype() == "json" || mime.suffix().map_or(false, |name| name == "json"))
}
