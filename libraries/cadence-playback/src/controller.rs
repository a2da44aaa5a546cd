//! Playback controller - the one owner of the session
//!
//! Every change to the playback session goes through a command on
//! [`PlaybackController`]. Each command runs to completion, then the
//! controller:
//! 1. sends the device whatever directives the change needs
//! 2. queues the derived [`PlaybackEvent`]s
//! 3. publishes the new snapshot to every subscriber
//!
//! Commands never fail. One that cannot apply leaves the session untouched
//! and is reported as a condition (see [`PlaybackError`]).

use crate::{
    device::{Directive, NullDevice, PlayerDevice},
    error::{PlaybackError, Result},
    events::{self, PlaybackEvent},
    history::{History, MAX_HISTORY_SIZE},
    session::{PlaybackSession, Snapshot},
    shuffle::{pick_other, RandomShuffle, ShuffleSource},
    subscription::{Listeners, SubscriptionId},
    types::{Command, PlaybackConfig, RepeatMode, TransportState},
    volume::Volume,
};
use cadence_core::Track;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// Events kept for [`PlaybackController::drain_events`]; older ones are dropped
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Central playback management
///
/// Create one per running application and hand it (or a reference to it)
/// to every view. Views read snapshots and issue commands; they never write
/// session fields.
pub struct PlaybackController {
    session: PlaybackSession,
    published: Snapshot,

    history: History,
    restart_threshold_secs: f64,

    shuffle_source: Box<dyn ShuffleSource>,
    device: Box<dyn PlayerDevice>,
    listeners: Listeners,

    pending_events: VecDeque<PlaybackEvent>,
    last_condition: Option<PlaybackError>,

    // Set by commands that (re)start a track, even the same one
    reloaded: bool,
}

impl PlaybackController {
    /// Create a controller with an idle session
    pub fn new(config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume, config.unmute_fallback_volume);
        let session = PlaybackSession::new(volume, config.shuffle, config.repeat);
        let restart_threshold_secs = if config.restart_threshold_secs.is_finite() {
            config.restart_threshold_secs.max(0.0)
        } else {
            PlaybackConfig::default().restart_threshold_secs
        };

        debug!(
            volume = session.volume_percent(),
            shuffle = config.shuffle,
            repeat = ?config.repeat,
            "playback session created"
        );

        Self {
            published: Arc::new(session.clone()),
            session,
            history: History::new(config.history_size.min(MAX_HISTORY_SIZE)),
            restart_threshold_secs,
            shuffle_source: Box::new(RandomShuffle),
            device: Box::new(NullDevice),
            listeners: Listeners::default(),
            pending_events: VecDeque::new(),
            last_condition: None,
            reloaded: false,
        }
    }

    /// Attach the audio device
    ///
    /// The device is brought up to date with the current volume.
    #[must_use]
    pub fn with_device(mut self, device: Box<dyn PlayerDevice>) -> Self {
        self.device = device;
        self.device.set_volume(self.session.effective_volume());
        self
    }

    /// Replace the random source used by shuffle
    #[must_use]
    pub fn with_shuffle_source(mut self, source: Box<dyn ShuffleSource>) -> Self {
        self.shuffle_source = source;
        self
    }

    // ===== Observation =====

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.published)
    }

    /// Register a listener for every future snapshot
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + Send + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener
    ///
    /// Returns false if the id was unknown (already removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Why the most recent command was ignored, if it was
    pub fn last_condition(&self) -> Option<&PlaybackError> {
        self.last_condition.as_ref()
    }

    /// Take queued events, oldest first
    ///
    /// At most [`MAX_PENDING_EVENTS`] are held between drains. A consumer
    /// that only subscribes never has to call this.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Check if there are queued events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Playback Control =====

    /// Play a track
    ///
    /// Replaying the current track is a no-op while playing and a resume
    /// while paused. Any other track becomes current at position 0: the
    /// cursor moves to its first queue entry, or it is appended.
    pub fn play(&mut self, track: Track) -> Snapshot {
        self.apply(Command::Play, |c| c.do_play(track))
    }

    /// Replace the queue with a collection and start it
    ///
    /// `start_index` past the end starts the last track.
    pub fn play_collection(&mut self, tracks: Vec<Track>, start_index: usize) -> Snapshot {
        self.apply(Command::PlayCollection, |c| {
            c.do_play_collection(tracks, start_index)
        })
    }

    /// Flip Playing and Paused
    pub fn toggle_play_pause(&mut self) -> Snapshot {
        self.apply(Command::TogglePlayPause, Self::do_toggle_play_pause)
    }

    /// Seek to a fraction of the current track
    ///
    /// The fraction is clamped to 0..=1. Transport state is untouched.
    pub fn seek(&mut self, fraction: f64) -> Snapshot {
        self.apply(Command::Seek, |c| c.do_seek(fraction))
    }

    /// Set the volume percentage (clamped to 0-100)
    pub fn set_volume(&mut self, percent: i32) -> Snapshot {
        self.apply(Command::SetVolume, |c| {
            c.session.volume.set_level(percent);
            Ok(())
        })
    }

    /// Mute, or unmute back to the saved level
    pub fn toggle_mute(&mut self) -> Snapshot {
        self.apply(Command::ToggleMute, |c| {
            c.session.volume.toggle_mute();
            Ok(())
        })
    }

    /// Skip to next track
    pub fn next(&mut self) -> Snapshot {
        self.apply(Command::Next, Self::do_next)
    }

    /// Go to previous track
    ///
    /// More than the restart threshold into a track, the track restarts.
    /// Otherwise repeat One restarts it, shuffle walks back through history,
    /// and the cursor steps back one entry (wrapping under repeat All,
    /// restarting at the head otherwise).
    pub fn previous(&mut self) -> Snapshot {
        self.apply(Command::Previous, Self::do_previous)
    }

    /// Flip shuffle; the queue order is never touched
    pub fn toggle_shuffle(&mut self) -> Snapshot {
        self.apply(Command::ToggleShuffle, |c| {
            c.session.shuffle_enabled = !c.session.shuffle_enabled;
            Ok(())
        })
    }

    /// Off → All → One → Off
    pub fn cycle_repeat(&mut self) -> Snapshot {
        self.apply(Command::CycleRepeat, |c| {
            c.session.repeat = c.session.repeat.cycle();
            Ok(())
        })
    }

    /// Append a track to the queue tail
    pub fn enqueue(&mut self, track: Track) -> Snapshot {
        self.apply(Command::Enqueue, |c| {
            c.session.queue.push(track);
            Ok(())
        })
    }

    /// Jump to a queue entry and play it from the start
    pub fn skip_to(&mut self, index: usize) -> Snapshot {
        self.apply(Command::SkipTo, |c| c.do_skip_to(index))
    }

    /// Unload the current track, keeping the queue
    pub fn stop(&mut self) -> Snapshot {
        self.apply(Command::Stop, |c| {
            if c.session.current_track.is_none() {
                return Err(PlaybackError::NoTrackLoaded);
            }
            c.go_idle();
            Ok(())
        })
    }

    /// Empty the queue and go idle
    pub fn clear_queue(&mut self) -> Snapshot {
        self.apply(Command::ClearQueue, |c| {
            if c.session.queue.is_empty() {
                return Err(PlaybackError::QueueEmpty);
            }
            c.session.queue.clear();
            c.history.clear();
            c.go_idle();
            Ok(())
        })
    }

    // ===== Device reports =====

    /// The device finished the current track
    ///
    /// Selects the following track exactly like `next`.
    pub fn track_ended(&mut self) -> Snapshot {
        self.apply(Command::TrackEnded, Self::do_next)
    }

    /// The device reports its playback position
    ///
    /// Clamped to the track; not sent back to the device as a seek.
    pub fn update_position(&mut self, seconds: f64) -> Snapshot {
        self.apply(Command::UpdatePosition, |c| {
            let duration = c.current_duration()?;
            c.session.position_seconds = clamp_seconds(seconds, duration);
            Ok(())
        })
    }

    // ===== Lifecycle =====

    /// Tear the session down at application exit
    ///
    /// Stops the device and drops every listener.
    pub fn shutdown(mut self) {
        if self.session.current_track.is_some() {
            self.device.stop();
        }
        self.listeners.clear();
        debug!("playback session shut down");
    }

    // ===== Internals =====

    fn apply<F>(&mut self, command: Command, f: F) -> Snapshot
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.reloaded = false;
        self.last_condition = None;

        if let Err(condition) = f(self) {
            debug!(?command, %condition, "command ignored");
            self.record_event(PlaybackEvent::CommandIgnored {
                command,
                reason: condition.to_string(),
            });
            self.last_condition = Some(condition);
        }

        debug_assert_eq!(self.session.check_invariants(), Ok(()));

        let before = Arc::clone(&self.published);
        let after = Arc::new(self.session.clone());

        let echo_position = command != Command::UpdatePosition;
        for directive in Directive::between(&before, &after, self.reloaded, echo_position) {
            trace!(?directive, "device directive");
            self.device.apply(&directive);
        }

        let changes = events::diff(&before, &after, command, self.reloaded);
        if !changes.is_empty() {
            debug!(?command, transport = ?after.transport(), changes = changes.len(), "session updated");
        }
        for event in changes {
            self.record_event(event);
        }

        self.published = Arc::clone(&after);
        self.listeners.notify(&after);
        after
    }

    fn do_play(&mut self, track: Track) -> Result<()> {
        let same_track = self
            .session
            .current_track
            .as_ref()
            .is_some_and(|current| current.id == track.id);

        if same_track {
            // Playing: nothing to do. Paused: resume where we were.
            self.session.transport = TransportState::Playing;
            return Ok(());
        }

        let index = match self.session.queue.position_of(&track.id) {
            Some(index) => index,
            None => self.session.queue.push(track),
        };
        self.load(index, TransportState::Playing);
        Ok(())
    }

    fn do_play_collection(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyCollection);
        }
        let start = start_index.min(tracks.len() - 1);
        self.session.queue.replace(tracks);
        self.history.clear();
        self.load(start, TransportState::Playing);
        Ok(())
    }

    fn do_toggle_play_pause(&mut self) -> Result<()> {
        self.session.transport = match self.session.transport {
            TransportState::Playing => TransportState::Paused,
            TransportState::Paused => TransportState::Playing,
            TransportState::Idle => return Err(PlaybackError::NoTrackLoaded),
        };
        Ok(())
    }

    fn do_seek(&mut self, fraction: f64) -> Result<()> {
        let duration = self.current_duration()?;
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.session.position_seconds = clamp_seconds(fraction * duration, duration);
        Ok(())
    }

    fn do_next(&mut self) -> Result<()> {
        let cursor = self.active_cursor()?;
        let transport = self.session.transport;

        match self.select_next(cursor) {
            Some(index) => {
                if index != cursor {
                    self.history.push(cursor);
                }
                self.load(index, transport);
            }
            None => self.go_idle(),
        }
        Ok(())
    }

    /// Next-track selection: repeat One, then shuffle, then sequential
    fn select_next(&mut self, cursor: usize) -> Option<usize> {
        let len = self.session.queue.len();

        if self.session.repeat == RepeatMode::One {
            return Some(cursor);
        }

        if self.session.shuffle_enabled && len > 1 {
            return Some(pick_other(self.shuffle_source.as_mut(), len, cursor));
        }

        if cursor + 1 < len {
            Some(cursor + 1)
        } else if self.session.repeat == RepeatMode::All {
            Some(0)
        } else {
            None
        }
    }

    fn do_previous(&mut self) -> Result<()> {
        let cursor = self.active_cursor()?;
        let transport = self.session.transport;
        let len = self.session.queue.len();

        let restart = self.session.position_seconds > self.restart_threshold_secs
            || self.session.repeat == RepeatMode::One;
        if restart {
            self.load(cursor, transport);
            return Ok(());
        }

        let from_history = if self.session.shuffle_enabled {
            self.history.pop().filter(|&index| index < len)
        } else {
            None
        };

        let target = from_history.unwrap_or(if cursor > 0 {
            cursor - 1
        } else if self.session.repeat == RepeatMode::All {
            len - 1
        } else {
            cursor
        });

        self.load(target, transport);
        Ok(())
    }

    fn do_skip_to(&mut self, index: usize) -> Result<()> {
        if index >= self.session.queue.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        if let Some(cursor) = self.session.queue.cursor() {
            if cursor != index {
                self.history.push(cursor);
            }
        }
        self.load(index, TransportState::Playing);
        Ok(())
    }

    /// Make `index` current at position 0 with the given transport state
    fn load(&mut self, index: usize, transport: TransportState) {
        let moved = self.session.queue.set_cursor(Some(index));
        debug_assert!(moved, "load past queue end: {}", index);
        if !moved {
            return;
        }
        self.session.current_track = self.session.queue.current().cloned();
        self.session.position_seconds = 0.0;
        self.session.transport = transport;
        self.reloaded = true;
    }

    fn go_idle(&mut self) {
        self.session.queue.set_cursor(None);
        self.session.current_track = None;
        self.session.position_seconds = 0.0;
        self.session.transport = TransportState::Idle;
    }

    /// Cursor of the loaded track, or why there is none
    fn active_cursor(&self) -> Result<usize> {
        if self.session.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        self.session
            .queue
            .cursor()
            .ok_or(PlaybackError::NoTrackLoaded)
    }

    fn record_event(&mut self, event: PlaybackEvent) {
        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            self.pending_events.pop_front();
        }
        self.pending_events.push_back(event);
    }

    fn current_duration(&self) -> Result<f64> {
        self.session
            .current_track
            .as_ref()
            .map(Track::duration)
            .ok_or(PlaybackError::NoTrackLoaded)
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("session", &self.session)
            .field("history", &self.history)
            .field("listeners", &self.listeners)
            .field("pending_events", &self.pending_events.len())
            .finish_non_exhaustive()
    }
}

fn clamp_seconds(seconds: f64, duration: f64) -> f64 {
    if seconds.is_nan() {
        0.0
    } else {
        seconds.clamp(0.0, duration.max(0.0))
    }
}
