//! Cadence Playback - Playback Session
//!
//! The one playback context shared by every page of the player.
//!
//! This crate provides:
//! - A single [`PlaybackController`] owning the session
//! - Immutable [`Snapshot`]s published to subscribers after every command
//! - Queue with cursor, shuffle history and repeat modes (Off, All, One)
//! - Volume with reversible mute
//! - Device directives for an external audio player
//! - The [`TransportView`] boundary and [`TransportBar`] render model
//!
//! # Architecture
//!
//! `cadence-playback` owns no audio and does no I/O:
//! - Decoding, streaming and output live behind [`PlayerDevice`]
//! - Catalog data arrives as [`Track`](cadence_core::Track) descriptors
//! - Randomness comes from an injectable [`ShuffleSource`]
//!
//! Commands never fail. Invalid input is clamped; commands that cannot
//! apply leave the session untouched and are reported through
//! [`PlaybackController::last_condition`] and
//! [`PlaybackEvent::CommandIgnored`].
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{PlaybackConfig, PlaybackController, TransportState};
//!
//! let mut controller = PlaybackController::new(PlaybackConfig::default());
//!
//! let snapshot = controller.play(Track::new("t1", "Time", "Pink Floyd", 421.0));
//! assert_eq!(snapshot.transport(), TransportState::Playing);
//!
//! let snapshot = controller.seek(0.5);
//! assert_eq!(snapshot.position_seconds(), 210.5);
//!
//! controller.toggle_mute();
//! let snapshot = controller.toggle_mute();
//! assert_eq!(snapshot.volume_percent(), 50);
//! ```
//!
//! # Example: Subscribing
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::PlaybackController;
//! use std::sync::{Arc, Mutex};
//!
//! let mut controller = PlaybackController::default();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let id = controller.subscribe(move |snapshot| {
//!     sink.lock().unwrap().push(snapshot.transport());
//! });
//!
//! controller.play(Track::new("t1", "Money", "Pink Floyd", 382.0));
//! controller.toggle_play_pause();
//! controller.unsubscribe(id);
//! controller.toggle_play_pause();
//!
//! assert_eq!(seen.lock().unwrap().len(), 2);
//! ```
//!
//! # Example: Driving a Device
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{Directive, PlaybackController, RecordingDevice};
//!
//! let device = RecordingDevice::new();
//! let mut controller = PlaybackController::default().with_device(Box::new(device.clone()));
//! device.take();
//!
//! let track = Track::new("t1", "Us and Them", "Pink Floyd", 462.0);
//! controller.play(track.clone());
//!
//! assert_eq!(device.take(), vec![Directive::Load(track), Directive::Play]);
//! ```

#![forbid(unsafe_code)]

mod controller;
mod device;
mod error;
mod events;
mod history;
mod queue;
mod session;
mod shuffle;
mod subscription;
pub mod types;
mod view;
mod volume;

// Public exports
pub use controller::{PlaybackController, MAX_PENDING_EVENTS};
pub use device::{Directive, NullDevice, PlayerDevice, RecordingDevice};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::{History, MAX_HISTORY_SIZE};
pub use queue::Queue;
pub use session::{PlaybackSession, Snapshot};
pub use shuffle::{RandomShuffle, SeededShuffle, SequenceShuffle, ShuffleSource};
pub use subscription::{Listener, SubscriptionId};
pub use types::{Command, PlaybackConfig, RepeatMode, TransportState};
pub use view::{PlayButton, TransportBar, TransportView, PLACEHOLDER_ARTWORK};
pub use volume::Volume;
