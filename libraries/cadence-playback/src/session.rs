//! Playback session snapshot
//!
//! One `PlaybackSession` lives inside the controller. Observers receive
//! immutable copies of it behind an `Arc` after every command.

use crate::queue::Queue;
use crate::types::{RepeatMode, TransportState};
use crate::volume::Volume;
use cadence_core::{Track, TrackId};
use serde::Serialize;
use std::sync::Arc;

/// Shared, immutable view of the session published after a command
pub type Snapshot = Arc<PlaybackSession>;

/// The single live playback context
///
/// Fields are only written by the controller; consumers read them through
/// the accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSession {
    pub(crate) current_track: Option<Track>,
    pub(crate) transport: TransportState,
    pub(crate) position_seconds: f64,
    #[serde(flatten)]
    pub(crate) volume: Volume,
    pub(crate) shuffle_enabled: bool,
    pub(crate) repeat: RepeatMode,
    pub(crate) queue: Queue,
}

impl PlaybackSession {
    /// Fresh idle session
    pub(crate) fn new(volume: Volume, shuffle_enabled: bool, repeat: RepeatMode) -> Self {
        Self {
            current_track: None,
            transport: TransportState::Idle,
            position_seconds: 0.0,
            volume,
            shuffle_enabled,
            repeat,
            queue: Queue::new(),
        }
    }

    /// Track at the queue cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Idle, playing or paused
    pub fn transport(&self) -> TransportState {
        self.transport
    }

    /// Whether the device should be producing sound
    pub fn is_playing(&self) -> bool {
        self.transport == TransportState::Playing
    }

    /// Position in the current track (0 when idle)
    pub fn position_seconds(&self) -> f64 {
        self.position_seconds
    }

    /// Duration of the current track (0 when idle)
    pub fn duration_seconds(&self) -> f64 {
        self.current_track.as_ref().map_or(0.0, Track::duration)
    }

    /// Volume slider level, kept while muted
    pub fn volume_percent(&self) -> u8 {
        self.volume.level()
    }

    /// Mute flag
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Level saved by the last mute
    pub fn pre_mute_volume(&self) -> Option<u8> {
        self.volume.pre_mute()
    }

    /// Audible level: 0 while muted
    pub fn effective_volume(&self) -> u8 {
        self.volume.effective()
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.queue.cursor()
    }

    /// Progress through the current track, 0-100 (0 when idle)
    pub fn progress_percent(&self) -> f64 {
        let duration = self.duration_seconds();
        if duration > 0.0 {
            self.position_seconds / duration * 100.0
        } else {
            0.0
        }
    }

    /// Whether a track row should show as playing
    pub fn is_playing_track(&self, id: &TrackId) -> bool {
        self.is_playing() && self.current_track.as_ref().is_some_and(|t| &t.id == id)
    }

    /// Check the session invariants
    ///
    /// Returns a description of the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        let idle = self.transport == TransportState::Idle;
        if idle != self.current_track.is_none() {
            return Err(format!(
                "transport {:?} with current track {:?}",
                self.transport,
                self.current_track.as_ref().map(|t| &t.id)
            ));
        }

        if self.current_track.as_ref() != self.queue.current() {
            return Err("current track is not the queue entry at the cursor".to_string());
        }

        let duration = self.duration_seconds();
        if !(0.0..=duration).contains(&self.position_seconds) {
            return Err(format!(
                "position {} outside 0..={}",
                self.position_seconds, duration
            ));
        }

        if self.volume.level() > 100 {
            return Err(format!("volume {} above 100", self.volume.level()));
        }

        if self.volume.is_muted() && self.volume.effective() != 0 {
            return Err("muted session has audible volume".to_string());
        }

        Ok(())
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(Volume::default(), false, RepeatMode::Off)
    }
}
