//! Error types for report data and placeholder substitution

use thiserror::Error;

/// Errors that can occur while preparing report data
#[derive(Debug, Error)]
pub enum MailMergeError {
    /// The placeholder pattern failed to compile
    #[error("Invalid placeholder pattern: {0}")]
    InvalidPattern(String),

    /// A report data record could not be parsed
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A date string is not in `YYYY-MM-DD` form
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for report data operations
pub type Result<T> = std::result::Result<T, MailMergeError>;
