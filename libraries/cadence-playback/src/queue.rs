//! Play queue with a cursor
//!
//! The queue is an ordered list of tracks plus the index of the active
//! entry. Tracks are never reordered: shuffle only changes which index the
//! controller picks next.

use cadence_core::{Track, TrackId};
use serde::Serialize;

/// Ordered play queue
///
/// Invariant: `cursor` is `None` or a valid index into `tracks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append track to the tail
    ///
    /// Returns the index of the new entry. Duplicate ids are allowed.
    pub fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Replace the whole queue, leaving the cursor unset
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.cursor = None;
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }

    /// Move the cursor
    ///
    /// Returns false and leaves the cursor alone if `index` is out of range.
    pub(crate) fn set_cursor(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.tracks.len() => false,
            _ => {
                self.cursor = index;
                true
            }
        }
    }

    /// Index of the active entry
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Track at the cursor
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|i| self.tracks.get(i))
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// First entry carrying `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// All entries in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Entries after the cursor (the whole queue when nothing is active)
    pub fn upcoming(&self) -> &[Track] {
        match self.cursor {
            Some(i) => &self.tracks[i + 1..],
            None => &self.tracks,
        }
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist", 180.0)
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), None);
        assert!(queue.current().is_none());
    }

    #[test]
    fn push_returns_index_and_keeps_cursor() {
        let mut queue = Queue::new();
        assert_eq!(queue.push(create_test_track("1")), 0);
        assert!(queue.set_cursor(Some(0)));
        assert_eq!(queue.push(create_test_track("2")), 1);
        assert_eq!(queue.cursor(), Some(0));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut queue = Queue::new();
        queue.push(create_test_track("1"));
        queue.push(create_test_track("1"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.position_of(&TrackId::new("1")), Some(0));
    }

    #[test]
    fn cursor_rejects_out_of_range() {
        let mut queue = Queue::new();
        queue.push(create_test_track("1"));
        assert!(!queue.set_cursor(Some(1)));
        assert_eq!(queue.cursor(), None);
        assert!(queue.set_cursor(Some(0)));
        assert_eq!(queue.current().unwrap().id.as_str(), "1");
    }

    #[test]
    fn upcoming_starts_after_cursor() {
        let mut queue = Queue::new();
        for id in ["1", "2", "3"] {
            queue.push(create_test_track(id));
        }
        assert_eq!(queue.upcoming().len(), 3);

        queue.set_cursor(Some(1));
        let upcoming: Vec<&str> = queue.upcoming().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(upcoming, vec!["3"]);

        queue.set_cursor(Some(2));
        assert!(queue.upcoming().is_empty());
    }

    #[test]
    fn replace_and_clear_reset_cursor() {
        let mut queue = Queue::new();
        queue.push(create_test_track("1"));
        queue.set_cursor(Some(0));

        queue.replace(vec![create_test_track("a"), create_test_track("b")]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.cursor(), None);

        queue.set_cursor(Some(1));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), None);
    }
}
