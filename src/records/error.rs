//! Record error types

use thiserror::Error;

/// Errors raised while parsing or validating records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Submission failed validation
    #[error("{0}")]
    Validation(String),

    /// A backend row could not be mapped onto the sheet columns
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// A date or time field could not be parsed
    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Result type alias for record operations
pub type RecordResult<T> = Result<T, RecordError>;
