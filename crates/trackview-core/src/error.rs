//! Error types for TrackView.

use thiserror::Error;

/// Main error type for TrackView operations.
#[derive(Error, Debug)]
pub enum TrackViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for TrackView operations.
pub type Result<T> = std::result::Result<T, TrackViewError>;

/// Reasons a candidate sequence name is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    #[error("A sequence name cannot be empty!")]
    Empty,

    #[error("A sequence name cannot contain a '{0}' character!")]
    InvalidCharacter(char),
}

/// Character reserved as the node path separator.
pub const PATH_SEPARATOR: char = '/';

/// Check that `name` can be used as a sequence name.
pub fn validate_sequence_name(name: &str) -> std::result::Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(PATH_SEPARATOR) {
        return Err(NameError::InvalidCharacter(PATH_SEPARATOR));
    }
    Ok(())
}
