//! Volume and mute bookkeeping
//!
//! Volume is an integer percentage. Muting remembers the level it silenced
//! so unmuting can put it back; an explicit volume change always wins over
//! that bookkeeping.

use serde::Serialize;

/// Volume controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volume {
    /// Volume level (0-100)
    #[serde(rename = "volume_percent")]
    level: u8,

    /// Mute state
    muted: bool,

    /// Level captured when mute was switched on
    #[serde(rename = "pre_mute_volume")]
    pre_mute: Option<u8>,

    /// Level restored by unmute when nothing was captured
    #[serde(skip)]
    fallback: u8,
}

impl Volume {
    /// Create new volume controller
    ///
    /// A level of 0 starts muted, matching `set_level(0)`.
    pub fn new(level: u8, fallback: u8) -> Self {
        let level = level.min(100);
        Self {
            level,
            muted: level == 0,
            pre_mute: None,
            fallback: fallback.clamp(1, 100),
        }
    }

    /// Set volume level
    ///
    /// Clamps to 0-100. Zero mutes, anything above unmutes, and any saved
    /// pre-mute level is dropped.
    pub fn set_level(&mut self, percent: i32) {
        self.level = percent.clamp(0, 100) as u8;
        self.muted = self.level == 0;
        self.pre_mute = None;
    }

    /// Flip mute, saving or restoring the level
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.level = self.pre_mute.take().unwrap_or(self.fallback);
            self.muted = false;
        } else {
            self.pre_mute = Some(self.level);
            self.muted = true;
        }
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level saved by the last mute
    pub fn pre_mute(&self) -> Option<u8> {
        self.pre_mute
    }

    /// Level the output should actually use
    pub fn effective(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(50, 50)
    }
}
