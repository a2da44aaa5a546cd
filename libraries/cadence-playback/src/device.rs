//! Audio device boundary
//!
//! The controller never decodes or outputs audio. It tells a
//! [`PlayerDevice`] what changed and expects the device to report natural
//! end-of-track back through `PlaybackController::track_ended`.

use crate::session::PlaybackSession;
use crate::types::TransportState;
use cadence_core::Track;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Instruction sent to the audio device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Directive {
    /// Load a track, ready at position 0
    Load(Track),
    Play,
    Pause,
    /// Unload everything; the session went idle
    Stop,
    /// Jump to a position in seconds
    SeekTo(f64),
    /// Audible level (0 while muted)
    SetVolume(u8),
}

impl Directive {
    /// Directives needed to move a device from `before` to `after`
    ///
    /// `reloaded` forces a fresh `Load` of the current track. Position
    /// changes are skipped when `echo_position` is false, since those came
    /// from the device in the first place.
    pub fn between(
        before: &PlaybackSession,
        after: &PlaybackSession,
        reloaded: bool,
        echo_position: bool,
    ) -> Vec<Directive> {
        let mut directives = Vec::new();

        match after.current_track() {
            None => {
                if before.current_track().is_some() {
                    directives.push(Directive::Stop);
                }
            }
            Some(track) => {
                let same_track = before.current_track().is_some_and(|t| t.id == track.id);
                if reloaded || !same_track {
                    directives.push(Directive::Load(track.clone()));
                    directives.extend(transport_directive(after.transport()));
                } else {
                    if echo_position && before.position_seconds() != after.position_seconds() {
                        directives.push(Directive::SeekTo(after.position_seconds()));
                    }
                    if before.transport() != after.transport() {
                        directives.extend(transport_directive(after.transport()));
                    }
                }
            }
        }

        if before.effective_volume() != after.effective_volume() {
            directives.push(Directive::SetVolume(after.effective_volume()));
        }

        directives
    }
}

fn transport_directive(state: TransportState) -> Option<Directive> {
    match state {
        TransportState::Playing => Some(Directive::Play),
        TransportState::Paused => Some(Directive::Pause),
        TransportState::Idle => None,
    }
}

/// Audio output collaborator
///
/// Calls return immediately; loading and buffering happen on the device's
/// side. Failures are reported back as session facts (for example a
/// `track_ended` call), never as errors.
pub trait PlayerDevice: Send {
    /// Open a track at position 0 without starting it
    fn load(&mut self, track: &Track);

    fn play(&mut self);

    fn pause(&mut self);

    fn stop(&mut self);

    /// Move to an absolute position in seconds
    fn seek_to(&mut self, seconds: f64);

    /// Output level 0-100, already 0 while muted
    fn set_volume(&mut self, percent: u8);

    /// Route a directive to the matching call
    fn apply(&mut self, directive: &Directive) {
        match directive {
            Directive::Load(track) => self.load(track),
            Directive::Play => self.play(),
            Directive::Pause => self.pause(),
            Directive::Stop => self.stop(),
            Directive::SeekTo(seconds) => self.seek_to(*seconds),
            Directive::SetVolume(percent) => self.set_volume(*percent),
        }
    }
}

/// Device that ignores every directive
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDevice;

impl PlayerDevice for NullDevice {
    fn load(&mut self, _track: &Track) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn stop(&mut self) {}
    fn seek_to(&mut self, _seconds: f64) {}
    fn set_volume(&mut self, _percent: u8) {}
}

/// Device that records directives, for tests
///
/// Clones share one log, so a test can keep a handle after moving the
/// device into the controller.
#[derive(Debug, Default, Clone)]
pub struct RecordingDevice {
    log: Arc<Mutex<Vec<Directive>>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every directive recorded so far
    pub fn take(&self) -> Vec<Directive> {
        self.log
            .lock()
            .map(|mut log| std::mem::take(&mut *log))
            .unwrap_or_default()
    }

    fn record(&self, directive: Directive) {
        if let Ok(mut log) = self.log.lock() {
            log.push(directive);
        }
    }
}

impl PlayerDevice for RecordingDevice {
    fn load(&mut self, track: &Track) {
        self.record(Directive::Load(track.clone()));
    }

    fn play(&mut self) {
        self.record(Directive::Play);
    }

    fn pause(&mut self) {
        self.record(Directive::Pause);
    }

    fn stop(&mut self) {
        self.record(Directive::Stop);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.record(Directive::SeekTo(seconds));
    }

    fn set_volume(&mut self, percent: u8) {
        self.record(Directive::SetVolume(percent));
    }
}
