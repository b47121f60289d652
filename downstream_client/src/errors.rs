use error_translator::{most_specific_cause, RequestFailure};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownstreamError {
    #[error("Downstream service rejected the request with {status}")]
    ClientError { status: StatusCode, body: String },

    #[error("Downstream service failed with {status}")]
    ServerError { status: StatusCode, body: String },

    #[error("Downstream request failed")]
    Request(#[from] reqwest::Error),

    #[error("Invalid downstream URL")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value for the downstream client")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl From<DownstreamError> for RequestFailure {
    fn from(error: DownstreamError) -> Self {
        match error {
            DownstreamError::ClientError { status, body } => {
                RequestFailure::DownstreamClientError { status, body }
            }
            DownstreamError::ServerError { status, body } => {
                RequestFailure::DownstreamServerError { status, body }
            }
            other => RequestFailure::DownstreamCall {
                message: other.to_string(),
                cause: most_specific_cause(&other),
            },
        }
    }
}
