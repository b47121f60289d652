// Copyright (c) 2024-present Sonatype, Inc. All rights reserved.
// "Sonatype" is a trademark of Sonatype, Inc.

pub mod errors;
pub mod log;
pub mod response;
pub mod translator;

pub use errors::{most_specific_cause, FieldError, RequestFailure, Validate};
pub use log::{log_fn, FailureLog, FnLog, TracingFailureLog};
pub use response::{ErrorCategory, ErrorResponse};
pub use translator::{ErrorTranslator, MESSAGE_NOT_READABLE, VAGUE_ERROR_MESSAGE};
