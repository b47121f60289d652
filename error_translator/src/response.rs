use http::StatusCode;
use serde::Serialize;

use crate::translator::VAGUE_ERROR_MESSAGE;

/// The coarse category returned to callers alongside the status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    ClientError,
    ServerError,
}

impl ErrorCategory {
    pub fn for_status(status: StatusCode) -> Self {
        if status.is_client_error() {
            ErrorCategory::ClientError
        } else {
            ErrorCategory::ServerError
        }
    }
}

/// The JSON body sent to the caller for every failed request
///
/// Built once per failure and never mutated. The category is derived from the status, and a server error can
/// only ever carry [VAGUE_ERROR_MESSAGE] as its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    status: u16,
    url: String,
    message: ErrorCategory,
    description: String,
}

impl ErrorResponse {
    /// A failure caused by the caller; `description` is returned verbatim
    ///
    /// Statuses outside the 4xx range are treated as server errors and lose the description.
    pub fn client_error(
        status: StatusCode,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        if !status.is_client_error() {
            tracing::warn!("Refusing to describe non-client status {status} as a client error");
            return Self::server_error(url);
        }

        Self {
            status: status.as_u16(),
            url: url.into(),
            message: ErrorCategory::for_status(status),
            description: description.into(),
        }
    }

    pub fn server_error(url: impl Into<String>) -> Self {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        Self {
            status: status.as_u16(),
            url: url.into(),
            message: ErrorCategory::for_status(status),
            description: VAGUE_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn message(&self) -> ErrorCategory {
        self.message
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_serialization() -> Result<(), serde_json::Error> {
        let response = ErrorResponse::client_error(
            StatusCode::FORBIDDEN,
            "http://localhost:2727/accounts/7",
            "Not your account",
        );

        let actual_json = serde_json::to_string(&response)?;
        let expected_json = r#"{"status":403,"url":"http://localhost:2727/accounts/7","message":"CLIENT_ERROR","description":"Not your account"}"#;

        assert_eq!(actual_json, expected_json);
        Ok(())
    }

    #[test]
    fn server_errors_are_always_vague() {
        let response = ErrorResponse::server_error("http://localhost/upload");

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.message(), ErrorCategory::ServerError);
        assert_eq!(response.description(), "Sorry, something failed.");
    }

    #[test]
    fn client_error_rejects_non_client_statuses() {
        let response = ErrorResponse::client_error(
            StatusCode::BAD_GATEWAY,
            "http://localhost/proxy",
            "upstream said no",
        );

        assert_eq!(response.status(), 500);
        assert_eq!(response.message(), ErrorCategory::ServerError);
        assert_eq!(response.description(), VAGUE_ERROR_MESSAGE);
    }

    #[test]
    fn constructed_responses_carry_the_category_of_their_status() {
        for status in [400, 401, 403, 405, 415] {
            let status = StatusCode::from_u16(status).expect("valid status");
            let response = ErrorResponse::client_error(status, "http://localhost/", "bad");
            assert_eq!(response.message(), ErrorCategory::for_status(status));
            assert_eq!(response.message(), ErrorCategory::ClientError);
        }

        let response = ErrorResponse::server_error("http://localhost/");
        assert_eq!(
            response.message(),
            ErrorCategory::for_status(response.status_code())
        );
    }

    #[test]
    fn category_follows_status() {
        for status in [400, 401, 403, 405, 415] {
            let status = StatusCode::from_u16(status).expect("valid status");
            assert_eq!(ErrorCategory::for_status(status), ErrorCategory::ClientError);
        }
        assert_eq!(
            ErrorCategory::for_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorCategory::ServerError
        );
    }
}
