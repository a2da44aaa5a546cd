//! Playback history tracking
//!
//! Bounded record of the queue entries left by `next`, walked back by
//! `previous` while shuffle is on.

use std::collections::VecDeque;

/// Largest history a controller will keep
pub const MAX_HISTORY_SIZE: usize = 10_000;

/// Playback history with bounded size
///
/// Holds queue indices, most recent at the back. Oldest entries are
/// discarded once `max_size` is reached.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<usize>,
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    /// Record a queue index
    ///
    /// If history is full, oldest entry is discarded
    pub fn push(&mut self, index: usize) {
        if self.max_size == 0 {
            return;
        }
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(index);
    }

    /// Pop most recent entry
    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop_back()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}
