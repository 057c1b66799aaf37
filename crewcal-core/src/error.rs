//! Error types for crewcal.

use thiserror::Error;

/// Errors that can occur while loading, resolving or projecting a schedule.
#[derive(Error, Debug)]
pub enum CrewCalError {
    /// An input element could not be turned into an [`Event`](crate::Event).
    #[error("Invalid event at index {index}: {message}")]
    Validation { index: usize, message: String },

    /// The document is not an array of events.
    #[error("Invalid schedule document: {0}")]
    InvalidDocument(String),

    #[error("Could not parse '{value}', expected format {expected}")]
    Parse { value: String, expected: &'static str },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Field '{0}' is empty")]
    EmptySequence(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("PDF to text conversion failed: {0}")]
    PdfToText(String),

    #[error("Extractor error: {0}")]
    Extractor(String),

    #[error("Extractor '{0}' not found in PATH")]
    ExtractorNotInstalled(String),

    #[error("Extractor request timed out after {0}s")]
    ExtractorTimeout(u64),
}

impl CrewCalError {
    pub(crate) fn validation(index: usize, message: impl Into<String>) -> Self {
        CrewCalError::Validation {
            index,
            message: message.into(),
        }
    }

    /// Whether the input itself was malformed, as opposed to unreadable.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CrewCalError::Validation { .. } | CrewCalError::InvalidDocument(_)
        )
    }
}

/// Result type alias for crewcal operations.
pub type CrewCalResult<T> = Result<T, CrewCalError>;
