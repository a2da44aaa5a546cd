//! Presentation boundary
//!
//! [`TransportView`] is what pages and the transport bar see of the
//! controller: observe snapshots, issue commands, and two read-only helpers.
//! [`TransportBar`] is the render model the transport bar draws from.

use crate::{
    controller::PlaybackController,
    session::Snapshot,
    subscription::{Listener, SubscriptionId},
    types::{RepeatMode, TransportState},
};
use cadence_core::{format_time, Track};
use serde::Serialize;

/// Artwork shown when neither the track nor its album has any
pub const PLACEHOLDER_ARTWORK: &str = "/placeholder.svg";

/// Read, observe and command boundary for presentation layers
pub trait TransportView {
    /// Latest published snapshot
    fn snapshot(&self) -> Snapshot;

    /// Receive every snapshot published from now on
    fn subscribe(&mut self, listener: Listener) -> SubscriptionId;

    /// Stop receiving snapshots
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    // Commands; see the matching `PlaybackController` methods

    /// Play a track, resuming it if it is the paused current track
    fn play(&mut self, track: Track) -> Snapshot;
    /// Replace the queue and start at `start_index`
    fn play_collection(&mut self, tracks: Vec<Track>, start_index: usize) -> Snapshot;
    fn toggle_play_pause(&mut self) -> Snapshot;
    /// Jump to a fraction (0.0-1.0) of the current track
    fn seek(&mut self, fraction: f64) -> Snapshot;
    fn set_volume(&mut self, percent: i32) -> Snapshot;
    fn toggle_mute(&mut self) -> Snapshot;
    fn next(&mut self) -> Snapshot;
    fn previous(&mut self) -> Snapshot;
    fn toggle_shuffle(&mut self) -> Snapshot;
    /// Off, then All, then One
    fn cycle_repeat(&mut self) -> Snapshot;
    /// Append to the queue without touching playback
    fn enqueue(&mut self, track: Track) -> Snapshot;

    /// Position as a percentage of the current track (0 when idle)
    fn progress_percent(&self) -> f64 {
        self.snapshot().progress_percent()
    }

    /// `m:ss` with floor truncation
    fn formatted_time(&self, seconds: f64) -> String {
        format_time(seconds)
    }
}

impl TransportView for PlaybackController {
    fn snapshot(&self) -> Snapshot {
        PlaybackController::snapshot(self)
    }

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        PlaybackController::subscribe(self, listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        PlaybackController::unsubscribe(self, id)
    }

    fn play(&mut self, track: Track) -> Snapshot {
        PlaybackController::play(self, track)
    }

    fn play_collection(&mut self, tracks: Vec<Track>, start_index: usize) -> Snapshot {
        PlaybackController::play_collection(self, tracks, start_index)
    }

    fn toggle_play_pause(&mut self) -> Snapshot {
        PlaybackController::toggle_play_pause(self)
    }

    fn seek(&mut self, fraction: f64) -> Snapshot {
        PlaybackController::seek(self, fraction)
    }

    fn set_volume(&mut self, percent: i32) -> Snapshot {
        PlaybackController::set_volume(self, percent)
    }

    fn toggle_mute(&mut self) -> Snapshot {
        PlaybackController::toggle_mute(self)
    }

    fn next(&mut self) -> Snapshot {
        PlaybackController::next(self)
    }

    fn previous(&mut self) -> Snapshot {
        PlaybackController::previous(self)
    }

    fn toggle_shuffle(&mut self) -> Snapshot {
        PlaybackController::toggle_shuffle(self)
    }

    fn cycle_repeat(&mut self) -> Snapshot {
        PlaybackController::cycle_repeat(self)
    }

    fn enqueue(&mut self, track: Track) -> Snapshot {
        PlaybackController::enqueue(self, track)
    }
}

/// Icon on the main transport button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayButton {
    Play,
    Pause,
}

/// Everything the transport bar draws, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportBar {
    /// Track title, `None` when idle
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Artwork reference, placeholder when the track has none
    pub artwork: Option<String>,
    /// Avatar fallback letter
    pub artist_initial: Option<char>,

    pub play_button: PlayButton,
    /// Transport buttons do nothing while idle
    pub controls_enabled: bool,

    pub elapsed: String,
    pub total: String,
    pub progress_percent: f64,

    /// Slider shows 0 while muted
    pub volume_slider: u8,
    pub muted_icon: bool,

    pub shuffle_active: bool,
    pub repeat: RepeatMode,
    /// "1" badge on the repeat button
    pub repeat_one_badge: bool,
}

impl TransportBar {
    /// Build the render model for a snapshot
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let track = snapshot.current_track();
        let effective = snapshot.effective_volume();

        Self {
            title: track.map(|t| t.title.clone()),
            artist: track.map(|t| t.artist.clone()),
            artwork: track.map(|t| {
                t.artwork
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_ARTWORK.to_string())
            }),
            artist_initial: track.and_then(Track::artist_initial),

            play_button: if snapshot.transport() == TransportState::Playing {
                PlayButton::Pause
            } else {
                PlayButton::Play
            },
            controls_enabled: track.is_some(),

            elapsed: format_time(snapshot.position_seconds()),
            total: format_time(snapshot.duration_seconds()),
            progress_percent: snapshot.progress_percent(),

            volume_slider: effective,
            muted_icon: effective == 0,

            shuffle_active: snapshot.shuffle_enabled(),
            repeat: snapshot.repeat(),
            repeat_one_badge: snapshot.repeat() == RepeatMode::One,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlaybackConfig;

    fn album_track() -> Track {
        Track::new("t1", "Speak to Me", "Pink Floyd", 90.0)
            .with_artwork(Some("/covers/dsotm.jpg".to_string()))
    }

    #[test]
    fn idle_bar_is_blank_and_disabled() {
        let controller = PlaybackController::default();
        let bar = TransportBar::from_snapshot(&controller.snapshot());

        assert_eq!(bar.title, None);
        assert_eq!(bar.artwork, None);
        assert_eq!(bar.play_button, PlayButton::Play);
        assert!(!bar.controls_enabled);
        assert_eq!(bar.elapsed, "0:00");
        assert_eq!(bar.total, "0:00");
        assert_eq!(bar.progress_percent, 0.0);
    }

    #[test]
    fn playing_bar_shows_track_and_pause_button() {
        let mut controller = PlaybackController::default();
        controller.play(album_track());
        let snapshot = controller.seek(0.5);
        let bar = TransportBar::from_snapshot(&snapshot);

        assert_eq!(bar.title.as_deref(), Some("Speak to Me"));
        assert_eq!(bar.artwork.as_deref(), Some("/covers/dsotm.jpg"));
        assert_eq!(bar.artist_initial, Some('P'));
        assert_eq!(bar.play_button, PlayButton::Pause);
        assert_eq!(bar.elapsed, "0:45");
        assert_eq!(bar.total, "1:30");
        assert_eq!(bar.progress_percent, 50.0);
    }

    #[test]
    fn missing_artwork_uses_placeholder() {
        let mut controller = PlaybackController::default();
        let snapshot = controller.play(Track::new("t2", "Breathe", "Pink Floyd", 163.0));
        let bar = TransportBar::from_snapshot(&snapshot);
        assert_eq!(bar.artwork.as_deref(), Some(PLACEHOLDER_ARTWORK));
    }

    #[test]
    fn muted_slider_reads_zero() {
        let mut controller = PlaybackController::default();
        let snapshot = controller.toggle_mute();
        let bar = TransportBar::from_snapshot(&snapshot);
        assert_eq!(bar.volume_slider, 0);
        assert!(bar.muted_icon);
        assert_eq!(snapshot.volume_percent(), 50);
    }

    #[test]
    fn repeat_one_shows_badge() {
        let config = PlaybackConfig {
            repeat: RepeatMode::One,
            ..Default::default()
        };
        let controller = PlaybackController::new(config);
        let bar = TransportBar::from_snapshot(&controller.snapshot());
        assert!(bar.repeat_one_badge);
        assert_eq!(bar.repeat, RepeatMode::One);
    }

    #[test]
    fn view_helpers_through_trait_object() {
        let mut controller = PlaybackController::default();
        let view: &mut dyn TransportView = &mut controller;

        view.play(album_track());
        view.seek(0.25);

        assert_eq!(view.progress_percent(), 25.0);
        assert_eq!(view.formatted_time(90.0), "1:30");
        assert_eq!(view.formatted_time(5.0), "0:05");
        assert_eq!(view.formatted_time(0.0), "0:00");
    }
}
