//! Shuffle selection
//!
//! Shuffle never reorders the queue. When it is on, `next` asks a
//! [`ShuffleSource`] for a uniformly random entry other than the current one.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of random queue picks
///
/// Injected into the controller so tests can script exact choices.
pub trait ShuffleSource: Send {
    /// Return an index in `0..upper`
    ///
    /// `upper` is always at least 1.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Thread-local RNG (default)
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShuffle;

impl ShuffleSource for RandomShuffle {
    fn pick(&mut self, upper: usize) -> usize {
        thread_rng().gen_range(0..upper)
    }
}

/// Seeded RNG for reproducible sessions
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: StdRng,
}

impl SeededShuffle {
    /// Create a source from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ShuffleSource for SeededShuffle {
    fn pick(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Scripted picks, for tests
///
/// Each pick is reduced modulo `upper`. Once the script runs out every pick
/// is 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceShuffle {
    picks: VecDeque<usize>,
}

impl SequenceShuffle {
    /// Create a source that replays `picks` in order
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl ShuffleSource for SequenceShuffle {
    fn pick(&mut self, upper: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % upper
    }
}

/// Pick any queue index except `current`
///
/// Every other entry is equally likely. Requires `len >= 2`.
pub(crate) fn pick_other(source: &mut dyn ShuffleSource, len: usize, current: usize) -> usize {
    debug_assert!(len >= 2);
    let pick = source.pick(len - 1);
    if pick >= current {
        pick + 1
    } else {
        pick
    }
}
