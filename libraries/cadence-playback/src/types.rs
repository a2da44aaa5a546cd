//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No track loaded
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the transport bar's cycle: Off → All → One → Off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Commands accepted by the playback controller
///
/// Used to label events and log lines; the data travels as method arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Play,
    PlayCollection,
    TogglePlayPause,
    Seek,
    SetVolume,
    ToggleMute,
    Next,
    Previous,
    ToggleShuffle,
    CycleRepeat,
    Enqueue,
    SkipTo,
    Stop,
    ClearQueue,
    TrackEnded,
    UpdatePosition,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 50)
    pub volume: u8,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Maximum shuffle history size (default: 50, at most `MAX_HISTORY_SIZE`)
    pub history_size: usize,

    /// Seconds into a track after which "previous" restarts it (default: 3)
    pub restart_threshold_secs: f64,

    /// Volume restored by unmute when nothing was saved (default: 50)
    pub unmute_fallback_volume: u8,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 50,
            repeat: RepeatMode::Off,
            shuffle: false,
            history_size: 50,
            restart_threshold_secs: 3.0,
            unmute_fallback_volume: 50,
        }
    }
}
