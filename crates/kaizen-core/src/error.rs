//! Centralized error types for Kaizen.

use thiserror::Error;

/// Main error type for Kaizen operations.
///
/// Store operations that return an error leave their collection untouched.
#[derive(Error, Debug)]
pub enum KaizenError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Meeting not found: {0}")]
    MeetingNotFound(String),

    #[error("Agenda item not found: {0}")]
    AgendaItemNotFound(String),

    #[error("Milestone not found: {0}")]
    MilestoneNotFound(String),

    #[error("Unknown card type for card '{0}'")]
    UnknownCardType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Kaizen operations.
pub type KaizenResult<T> = Result<T, KaizenError>;

impl KaizenError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
