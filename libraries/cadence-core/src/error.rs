/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building catalog descriptors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Catalog duration string is not `m:ss`
    #[error("Invalid duration: {0:?}")]
    InvalidDuration(String),

    /// Descriptor field failed validation
    #[error("Invalid track: {0}")]
    InvalidTrack(String),
}

impl CoreError {
    /// Create an invalid duration error
    pub fn invalid_duration(input: impl Into<String>) -> Self {
        Self::InvalidDuration(input.into())
    }

    /// Create an invalid track error
    pub fn invalid_track(msg: impl Into<String>) -> Self {
        Self::InvalidTrack(msg.into())
    }
}
