//! Conditions reported by ignored playback commands

use thiserror::Error;

/// Reasons a playback command was ignored
///
/// Commands never fail. When one cannot apply, the session is left untouched
/// and the reason is logged, kept as the controller's last condition and
/// published as a `CommandIgnored` event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// A collection with no tracks was handed over
    #[error("Collection has no tracks")]
    EmptyCollection,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
