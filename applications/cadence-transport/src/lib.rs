//! Cadence Transport
//!
//! Command-line transport bar: one playback session per run, fed by a
//! catalog file and a script of user intents.

pub mod catalog;
pub mod config;
pub mod device;
pub mod error;
pub mod script;

pub use error::{Result, TransportError};
