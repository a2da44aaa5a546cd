//! Cadence Core
//!
//! Types shared between the catalog pages and the playback core.
//!
//! The catalog side (album, playlist, library and search pages) resolves
//! [`Track`] descriptors from its own data and hands them to the playback
//! controller. Nothing in this crate fetches or stores catalog data.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{format_time, Track};
//!
//! let track = Track::from_catalog("dsotm3", "Time", "Pink Floyd", None, "7:01").unwrap();
//! assert_eq!(track.duration_seconds, 421.0);
//! assert_eq!(format_time(track.duration_seconds), "7:01");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod time;
pub mod types;

pub use error::{CoreError, Result};
pub use time::{format_time, parse_duration};
pub use types::{Track, TrackId};
