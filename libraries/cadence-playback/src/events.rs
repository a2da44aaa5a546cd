//! Playback Events
//!
//! Change notifications derived by comparing the snapshots on either side of
//! a command. The controller queues them for `drain_events`.

use crate::session::PlaybackSession;
use crate::types::{Command, RepeatMode, TransportState};
use cadence_core::TrackId;
use serde::Serialize;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaybackEvent {
    /// A track was loaded (or reloaded), or the session went idle
    TrackChanged {
        /// ID of the new current track, `None` once idle
        track_id: Option<TrackId>,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Position moved by a seek or restart
    Seeked {
        /// New position in seconds
        position_seconds: f64,
    },

    /// Position reported by the device
    PositionUpdate {
        /// Current playback position
        position_seconds: f64,
        /// Total track duration
        duration_seconds: f64,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue contents or cursor changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// New cursor
        cursor: Option<usize>,
    },

    /// Shuffle or repeat changed
    ModesChanged {
        shuffle: bool,
        repeat: RepeatMode,
    },

    /// A command could not apply and left the session untouched
    CommandIgnored {
        command: Command,
        reason: String,
    },
}

/// Events describing the step from `before` to `after`
///
/// `reloaded` marks a command that (re)started a track even if its id did
/// not change.
pub(crate) fn diff(
    before: &PlaybackSession,
    after: &PlaybackSession,
    command: Command,
    reloaded: bool,
) -> Vec<PlaybackEvent> {
    let mut events = Vec::new();

    let before_id = before.current_track().map(|t| t.id.clone());
    let after_id = after.current_track().map(|t| t.id.clone());
    let track_changed = reloaded || before_id != after_id;

    if track_changed {
        events.push(PlaybackEvent::TrackChanged {
            track_id: after_id,
            previous_track_id: before_id,
        });
    }

    if before.transport() != after.transport() {
        events.push(PlaybackEvent::StateChanged {
            state: after.transport(),
        });
    }

    if !track_changed && before.position_seconds() != after.position_seconds() {
        if command == Command::UpdatePosition {
            events.push(PlaybackEvent::PositionUpdate {
                position_seconds: after.position_seconds(),
                duration_seconds: after.duration_seconds(),
            });
        } else {
            events.push(PlaybackEvent::Seeked {
                position_seconds: after.position_seconds(),
            });
        }
    }

    if before.volume_percent() != after.volume_percent() || before.is_muted() != after.is_muted()
    {
        events.push(PlaybackEvent::VolumeChanged {
            level: after.volume_percent(),
            is_muted: after.is_muted(),
        });
    }

    if before.queue_len() != after.queue_len() || before.cursor() != after.cursor() {
        events.push(PlaybackEvent::QueueChanged {
            length: after.queue_len(),
            cursor: after.cursor(),
        });
    }

    if before.shuffle_enabled() != after.shuffle_enabled() || before.repeat() != after.repeat() {
        events.push(PlaybackEvent::ModesChanged {
            shuffle: after.shuffle_enabled(),
            repeat: after.repeat(),
        });
    }

    events
}
