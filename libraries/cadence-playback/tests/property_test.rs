//! Property-based tests for the playback controller
//!
//! Uses proptest to drive random command sequences and check the session
//! invariants after every step.

use cadence_core::{format_time, Track};
use cadence_playback::{PlaybackController, SeededShuffle, TransportState};
use proptest::prelude::*;

// ===== Helpers =====

/// One transport command with its random input
#[derive(Debug, Clone)]
enum Op {
    Play(Track),
    PlayCollection(Vec<Track>, usize),
    TogglePlayPause,
    Seek(f64),
    SetVolume(i32),
    ToggleMute,
    Next,
    Previous,
    ToggleShuffle,
    CycleRepeat,
    Enqueue(Track),
    SkipTo(usize),
    Stop,
    ClearQueue,
    TrackEnded,
    UpdatePosition(f64),
}

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-e]",           // id, small alphabet so duplicates happen
        "[A-Za-z ]{1,20}", // title
        "[A-Za-z ]{1,15}", // artist
        0u32..600,         // duration (0-600 seconds)
    )
        .prop_map(|(id, title, artist, duration)| {
            Track::new(id, title, artist, f64::from(duration))
        })
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_track().prop_map(Op::Play),
        (prop::collection::vec(arbitrary_track(), 0..6), 0usize..8)
            .prop_map(|(tracks, start)| Op::PlayCollection(tracks, start)),
        Just(Op::TogglePlayPause),
        (-0.5f64..1.5).prop_map(Op::Seek),
        (-50i32..200).prop_map(Op::SetVolume),
        Just(Op::ToggleMute),
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::ToggleShuffle),
        Just(Op::CycleRepeat),
        arbitrary_track().prop_map(Op::Enqueue),
        (0usize..8).prop_map(Op::SkipTo),
        Just(Op::Stop),
        Just(Op::ClearQueue),
        Just(Op::TrackEnded),
        (-10.0f64..700.0).prop_map(Op::UpdatePosition),
    ]
}

fn apply(controller: &mut PlaybackController, op: Op) {
    match op {
        Op::Play(track) => controller.play(track),
        Op::PlayCollection(tracks, start) => controller.play_collection(tracks, start),
        Op::TogglePlayPause => controller.toggle_play_pause(),
        Op::Seek(fraction) => controller.seek(fraction),
        Op::SetVolume(percent) => controller.set_volume(percent),
        Op::ToggleMute => controller.toggle_mute(),
        Op::Next => controller.next(),
        Op::Previous => controller.previous(),
        Op::ToggleShuffle => controller.toggle_shuffle(),
        Op::CycleRepeat => controller.cycle_repeat(),
        Op::Enqueue(track) => controller.enqueue(track),
        Op::SkipTo(index) => controller.skip_to(index),
        Op::Stop => controller.stop(),
        Op::ClearQueue => controller.clear_queue(),
        Op::TrackEnded => controller.track_ended(),
        Op::UpdatePosition(seconds) => controller.update_position(seconds),
    };
}

// ===== Property Tests =====

proptest! {
    /// Property: Every command sequence leaves a consistent session
    #[test]
    fn invariants_hold_after_every_command(
        seed in any::<u64>(),
        ops in prop::collection::vec(arbitrary_op(), 1..60)
    ) {
        let mut controller = PlaybackController::default()
            .with_shuffle_source(Box::new(SeededShuffle::new(seed)));

        for op in ops {
            apply(&mut controller, op);
            let snapshot = controller.snapshot();

            prop_assert_eq!(snapshot.check_invariants(), Ok(()));
            prop_assert!(snapshot.volume_percent() <= 100);
            prop_assert!(snapshot.position_seconds() >= 0.0);
            prop_assert!(snapshot.position_seconds() <= snapshot.duration_seconds());
            prop_assert!((0.0..=100.0).contains(&snapshot.progress_percent()));
        }
    }

    /// Property: Volume stays within 0-100 for any sequence of levels
    #[test]
    fn volume_always_in_range(levels in prop::collection::vec(any::<i32>(), 1..30)) {
        let mut controller = PlaybackController::default();

        for level in levels {
            let snapshot = controller.set_volume(level);
            prop_assert!(snapshot.volume_percent() <= 100);
            prop_assert_eq!(snapshot.is_muted(), snapshot.volume_percent() == 0);
        }
    }

    /// Property: Two mute toggles are an exact round trip
    #[test]
    fn mute_toggle_round_trip(level in 1i32..=100) {
        let mut controller = PlaybackController::default();
        let before = controller.set_volume(level);

        controller.toggle_mute();
        let after = controller.toggle_mute();

        prop_assert_eq!(after.volume_percent(), before.volume_percent());
        prop_assert!(!after.is_muted());
    }

    /// Property: Seeking never changes transport state
    #[test]
    fn seek_preserves_transport(
        track in arbitrary_track(),
        pause in any::<bool>(),
        fraction in prop::num::f64::ANY
    ) {
        let mut controller = PlaybackController::default();
        controller.play(track);
        if pause {
            controller.toggle_play_pause();
        }

        let before = controller.snapshot().transport();
        let after = controller.seek(fraction);

        prop_assert_eq!(after.transport(), before);
        prop_assert!(after.position_seconds() <= after.duration_seconds());
    }

    /// Property: Enqueue never touches the current track or transport
    #[test]
    fn enqueue_leaves_current(
        ops in prop::collection::vec(arbitrary_op(), 0..20),
        extra in arbitrary_track()
    ) {
        let mut controller = PlaybackController::default();
        for op in ops {
            apply(&mut controller, op);
        }

        let before = controller.snapshot();
        let after = controller.enqueue(extra);

        prop_assert_eq!(after.current_track(), before.current_track());
        prop_assert_eq!(after.transport(), before.transport());
        prop_assert_eq!(after.cursor(), before.cursor());
        prop_assert_eq!(after.queue_len(), before.queue_len() + 1);
    }

    /// Property: Sequential playback of n tracks reaches idle after n nexts
    #[test]
    fn sequential_queue_ends_idle(tracks in prop::collection::vec(arbitrary_track(), 1..10)) {
        let len = tracks.len();
        let mut controller = PlaybackController::default();
        controller.play_collection(tracks, 0);

        for expected in 1..len {
            prop_assert_eq!(controller.next().cursor(), Some(expected));
        }
        prop_assert_eq!(controller.next().transport(), TransportState::Idle);
    }

    /// Property: Formatted time always reads m:ss and parses back to its floor
    #[test]
    fn formatted_time_shape(seconds in 0.0f64..36_000.0) {
        let text = format_time(seconds);
        let (minutes, secs) = text.split_once(':').unwrap();

        prop_assert_eq!(secs.len(), 2);
        let total = minutes.parse::<u64>().unwrap() * 60 + secs.parse::<u64>().unwrap();
        prop_assert_eq!(total, seconds.floor() as u64);
    }
}
