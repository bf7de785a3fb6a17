//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("the recipient must be a valid e-mail: {recipient}")]
    InvalidRecipient { recipient: String },

    #[error("unknown log level: {0} (expected debug, information, warning or error)")]
    UnknownLogLevel(String),

    #[error("text must be a single line: {0:?}")]
    MultiLineText(String),
}
