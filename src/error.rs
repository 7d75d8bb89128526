/// Error types for homescout
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for homescout operations
#[derive(Error, Debug)]
pub enum ScoutError {
    /// I/O errors (favorites file, exports, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset could not be loaded
    #[error("Failed to load listings: {0}")]
    Load(String),

    /// Malformed user-supplied index or number
    #[error("{0}")]
    Validation(String),

    /// Operation requires state that is absent (no results yet, etc.)
    #[error("{0}")]
    State(String),

    /// Referenced item does not exist (favorites file, property index)
    #[error("{0}")]
    NotFound(String),
}

/// Result type alias for homescout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Convert ScoutError to a user-friendly message
///
/// Every error is recovered at the command boundary and surfaced as
/// plain text; none of them end the session.
impl ScoutError {
    pub fn user_message(&self) -> String {
        match self {
            ScoutError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            ScoutError::Csv(e) => {
                format!("Data file error: {}", e)
            }
            ScoutError::Load(msg) => {
                format!("Could not load listings: {}", msg)
            }
            ScoutError::Validation(msg) => msg.clone(),
            ScoutError::State(msg) => msg.clone(),
            ScoutError::NotFound(msg) => msg.clone(),
        }
    }
}
