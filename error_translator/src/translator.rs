// Copyright (c) 2024-present Sonatype, Inc. All rights reserved.
// "Sonatype" is a trademark of Sonatype, Inc.

use std::sync::Arc;

use http::StatusCode;
use itertools::Itertools;

use crate::errors::RequestFailure;
use crate::log::{FailureLog, TracingFailureLog};
use crate::response::ErrorResponse;

/// The only description a caller ever sees for a server error
pub const VAGUE_ERROR_MESSAGE: &str = "Sorry, something failed.";

pub const MESSAGE_NOT_READABLE: &str = "Http message was not readable";

/// Turns a classified [RequestFailure] into the [ErrorResponse] sent back to the caller
///
/// Client errors describe exactly what was wrong with the request. Server errors and downstream failures are
/// reported to the [FailureLog] and collapse to [VAGUE_ERROR_MESSAGE].
#[derive(Clone)]
pub struct ErrorTranslator {
    log: Arc<dyn FailureLog>,
}

impl ErrorTranslator {
    pub fn new() -> Self {
        Self::with_log(TracingFailureLog)
    }

    pub fn with_log<L: FailureLog + 'static>(log: L) -> Self {
        Self { log: Arc::new(log) }
    }

    pub fn translate(&self, failure: &RequestFailure, url: &str) -> ErrorResponse {
        match failure {
            RequestFailure::Unauthorized(message) => {
                ErrorResponse::client_error(StatusCode::UNAUTHORIZED, url, message)
            }
            RequestFailure::Forbidden(message) => {
                ErrorResponse::client_error(StatusCode::FORBIDDEN, url, message)
            }
            RequestFailure::BadRequest(message) => {
                ErrorResponse::client_error(StatusCode::BAD_REQUEST, url, message)
            }
            RequestFailure::DateTimeParse { parsed, .. } => {
                ErrorResponse::client_error(StatusCode::BAD_REQUEST, url, parsed)
            }
            RequestFailure::ArgumentNotValid { field_errors } => ErrorResponse::client_error(
                StatusCode::BAD_REQUEST,
                url,
                field_errors.iter().join(", "),
            ),
            RequestFailure::MessageNotReadable { .. } => {
                ErrorResponse::client_error(StatusCode::BAD_REQUEST, url, MESSAGE_NOT_READABLE)
            }
            RequestFailure::ArgumentTypeMismatch { name, value } => ErrorResponse::client_error(
                StatusCode::BAD_REQUEST,
                url,
                format!("Parameter value '{value}' is not valid for request parameter '{name}'"),
            ),
            RequestFailure::UnsatisfiedParameter { conditions } => ErrorResponse::client_error(
                StatusCode::BAD_REQUEST,
                url,
                format!(
                    "Parameter conditions not met for request: {}",
                    conditions.iter().join(",")
                ),
            ),
            RequestFailure::MethodNotAllowed(message) => {
                ErrorResponse::client_error(StatusCode::METHOD_NOT_ALLOWED, url, message)
            }
            RequestFailure::UnsupportedMediaType(message) => {
                ErrorResponse::client_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, url, message)
            }
            RequestFailure::Multipart { message, cause } => {
                self.log.error(
                    url,
                    &with_cause("Multipart resolution failed", message, cause.as_deref()),
                );
                ErrorResponse::server_error(url)
            }
            RequestFailure::InternalServerError(message) => {
                self.log
                    .error(url, &format!("Handled internal server error: {message}"));
                ErrorResponse::server_error(url)
            }
            RequestFailure::DownstreamClientError { status, body } => {
                self.log.error(
                    url,
                    &format!("Downstream call failed with status: {status} and response: {body}"),
                );
                ErrorResponse::server_error(url)
            }
            RequestFailure::DownstreamServerError { status, body } => {
                self.log.error(
                    url,
                    &format!("Request failed with status: {status} and response: {body}"),
                );
                ErrorResponse::server_error(url)
            }
            RequestFailure::DownstreamCall { message, cause } => {
                self.log.error(
                    url,
                    &with_cause("Downstream call failed", message, cause.as_deref()),
                );
                ErrorResponse::server_error(url)
            }
            RequestFailure::Unexpected(error) => {
                self.log
                    .error(url, &format!("Unexpected error handled: {error:?}"));
                ErrorResponse::server_error(url)
            }
        }
    }
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self::new()
    }
}

fn with_cause(prefix: &str, message: &str, cause: Option<&str>) -> String {
    match cause {
        Some(cause) => format!("{prefix} with message : {message} and cause: {cause}"),
        None => format!("{prefix} with message : {message}"),
    }
}
