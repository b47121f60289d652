// Copyright (c) 2024-present Sonatype, Inc. All rights reserved.
// "Sonatype" is a trademark of Sonatype, Inc.

use std::error::Error as StdError;
use std::fmt::{self, Display};

use http::StatusCode;
use itertools::Itertools;
use thiserror::Error;

/// Everything that can go wrong while handling a request, classified by kind
///
/// The host framework is responsible for turning its own rejections and handler errors into one of these
/// before handing them to the [crate::ErrorTranslator].
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Text '{parsed}' could not be parsed: {reason}")]
    DateTimeParse { parsed: String, reason: String },

    #[error("Validation failed for {} field(s): {}", .field_errors.len(), .field_errors.iter().join(", "))]
    ArgumentNotValid { field_errors: Vec<FieldError> },

    #[error("Http message was not readable: {reason}")]
    MessageNotReadable { reason: String },

    #[error("Failed to convert value '{value}' for parameter '{name}'")]
    ArgumentTypeMismatch { name: String, value: String },

    #[error("Parameter conditions \"{}\" not met", .conditions.iter().join(", "))]
    UnsatisfiedParameter { conditions: Vec<String> },

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("{message}")]
    Multipart {
        message: String,
        cause: Option<String>,
    },

    #[error("{0}")]
    InternalServerError(String),

    #[error("Downstream call failed with status {status}")]
    DownstreamClientError { status: StatusCode, body: String },

    #[error("Downstream call failed with status {status}")]
    DownstreamServerError { status: StatusCode, body: String },

    #[error("{message}")]
    DownstreamCall {
        message: String,
        cause: Option<String>,
    },

    #[error("{0:#}")]
    Unexpected(eyre::Error),
}

impl RequestFailure {
    /// A date or time value supplied by the caller could not be parsed
    pub fn date_time(parsed: impl Into<String>, error: &chrono::ParseError) -> Self {
        Self::DateTimeParse {
            parsed: parsed.into(),
            reason: error.to_string(),
        }
    }

    pub fn field_errors(field_errors: Vec<FieldError>) -> Self {
        Self::ArgumentNotValid { field_errors }
    }

    pub fn type_mismatch(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ArgumentTypeMismatch {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Multipart resolution failed, keeping the deepest cause of `error` for the log
    pub fn multipart<E>(error: &E) -> Self
    where
        E: StdError + 'static,
    {
        Self::Multipart {
            message: error.to_string(),
            cause: most_specific_cause(error),
        }
    }
}

impl From<eyre::Error> for RequestFailure {
    fn from(error: eyre::Error) -> Self {
        RequestFailure::Unexpected(error)
    }
}

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Field level validation of a deserialized request argument
///
/// An empty list means the value is valid.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// The innermost error in the `source()` chain, or `None` when `error` has no source
pub fn most_specific_cause(error: &(dyn StdError + 'static)) -> Option<String> {
    let mut cause = error.source()?;
    while let Some(next) = cause.source() {
        cause = next;
    }
    Some(cause.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Middle);

    #[derive(Debug, Error)]
    #[error("middle")]
    struct Middle(#[source] std::io::Error);

    #[test]
    fn most_specific_cause_walks_to_the_end_of_the_chain() {
        let error = Outer(Middle(std::io::Error::other("disk on fire")));

        assert_eq!(most_specific_cause(&error).as_deref(), Some("disk on fire"));
    }

    #[test]
    fn most_specific_cause_is_absent_without_a_source() {
        let error = std::io::Error::other("standalone");

        assert_eq!(most_specific_cause(&error), None);
    }

    #[test]
    fn multipart_keeps_message_and_cause() {
        let failure = RequestFailure::multipart(&Middle(std::io::Error::other("stream closed")));

        match failure {
            RequestFailure::Multipart { message, cause } => {
                assert_eq!(message, "middle");
                assert_eq!(cause.as_deref(), Some("stream closed"));
            }
            other => panic!("Unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn date_time_keeps_the_unparsed_text() {
        let error = chrono::DateTime::parse_from_rfc3339("yesterday")
            .expect_err("Failed to fail parsing");
        let failure = RequestFailure::date_time("yesterday", &error);

        assert!(failure.to_string().starts_with("Text 'yesterday' could not be parsed"));
    }

    #[test]
    fn field_error_display() {
        assert_eq!(
            FieldError::new("email", "must not be blank").to_string(),
            "email must not be blank"
        );
    }

    #[test]
    fn eyre_errors_are_unexpected() {
        let failure = RequestFailure::from(eyre::eyre!("boom"));

        assert!(matches!(failure, RequestFailure::Unexpected(_)));
        assert_eq!(failure.to_string(), "boom");
    }
}
