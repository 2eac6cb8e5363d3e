//! Integration tests for the transition lifecycle, driven by a simulated
//! clock.

use bhfx_core::transition::{
    BlackHoleTransition, COMPLETION_DELAY, HOLE_MAX_SCALE, TransitionEvent,
};
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn counting() -> (BlackHoleTransition, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    let probe = Rc::clone(&count);
    let transition = BlackHoleTransition::new().on_complete(move || {
        probe.set(probe.get() + 1);
    });
    (transition, count)
}

#[test]
fn full_cycle_fires_once_under_frame_ticks() {
    let (mut t, count) = counting();
    t.set_triggered(true);
    // 16ms frames for 5 seconds.
    for _ in 0..312 {
        t.update(Duration::from_millis(16));
    }
    assert_eq!(count.get(), 1);
}

#[test]
fn completion_is_not_early() {
    let (mut t, count) = counting();
    t.set_triggered(true);
    let mut elapsed = Duration::ZERO;
    while elapsed + Duration::from_millis(16) < COMPLETION_DELAY {
        t.update(Duration::from_millis(16));
        elapsed += Duration::from_millis(16);
        assert_eq!(count.get(), 0, "fired early at {elapsed:?}");
    }
    t.update(Duration::from_millis(16));
    assert_eq!(count.get(), 1);
}

#[test]
fn retrigger_mid_flight_invalidates_old_deadline() {
    let (mut t, count) = counting();
    t.set_triggered(true);
    t.update(Duration::from_millis(2000));

    // Fresh activation 2000ms in: the old deadline (500ms away) must not
    // fire; only the new one, a full 2500ms later.
    t.set_triggered(false);
    t.set_triggered(true);

    t.update(Duration::from_millis(2499));
    assert_eq!(count.get(), 0, "old deadline leaked through");
    t.update(Duration::from_millis(1));
    assert_eq!(count.get(), 1);
    t.update(Duration::from_secs(60));
    assert_eq!(count.get(), 1);
}

#[test]
fn two_full_cycles_fire_twice_total() {
    let (mut t, count) = counting();
    for _ in 0..2 {
        t.set_triggered(true);
        t.update(Duration::from_secs(5));
        t.set_triggered(false);
    }
    assert_eq!(count.get(), 2);
}

#[test]
fn unmount_measured_just_before_deadline() {
    let (mut t, count) = counting();
    t.set_triggered(true);
    t.update(COMPLETION_DELAY - Duration::from_millis(1));
    drop(t);
    assert_eq!(count.get(), 0);
}

#[test]
fn events_do_not_replay_after_drain() {
    let mut t = BlackHoleTransition::new();
    t.set_triggered(true);
    t.update(Duration::from_secs(5));
    assert!(!t.drain_events().is_empty());
    t.update(Duration::from_secs(5));
    assert!(t.drain_events().is_empty());
}

#[test]
fn scene_appears_only_while_mounted() {
    let mut t = BlackHoleTransition::new();
    assert!(t.scene().is_none());
    t.set_triggered(true);
    assert!(t.scene().is_some());
    t.dismiss();
    t.update(Duration::from_secs(1));
    assert!(t.scene().is_none());
}

proptest! {
    // Whatever the frame cadence, the callback count is a pure function of
    // the total simulated time: one completion iff it reached the deadline.
    #[test]
    fn completion_count_depends_only_on_total_time(frames in prop::collection::vec(1u64..200, 1..200)) {
        let (mut t, count) = counting();
        t.set_triggered(true);
        let mut total = Duration::ZERO;
        for ms in frames {
            t.update(Duration::from_millis(ms));
            total += Duration::from_millis(ms);
        }
        let expected = u32::from(total >= COMPLETION_DELAY);
        prop_assert_eq!(count.get(), expected);
    }

    // Scene values stay inside their declared ranges at every frame.
    #[test]
    fn scene_values_stay_bounded(frames in prop::collection::vec(1u64..500, 1..100)) {
        let mut t = BlackHoleTransition::new();
        t.set_triggered(true);
        for ms in frames {
            t.update(Duration::from_millis(ms));
            if let Some(scene) = t.scene() {
                prop_assert!((0.0..=HOLE_MAX_SCALE).contains(&scene.hole.scale));
                prop_assert!((0.0..=360.0).contains(&scene.hole.rotation_deg));
                prop_assert!((0.0..=1.0).contains(&scene.fade.opacity));
                prop_assert!((0.0..=1.0).contains(&scene.opacity));
            }
        }
    }

    // Toggling the trigger arbitrarily never yields more completions than
    // rising edges.
    #[test]
    fn completions_never_exceed_rising_edges(steps in prop::collection::vec((any::<bool>(), 1u64..1000), 1..100)) {
        let (mut t, count) = counting();
        let mut edges = 0u32;
        let mut was = false;
        for (flag, ms) in steps {
            if flag && !was {
                edges += 1;
            }
            was = flag;
            t.set_triggered(flag);
            t.update(Duration::from_millis(ms));
        }
        prop_assert!(count.get() <= edges);
        let mut completed = 0u32;
        for event in t.drain_events() {
            if event == TransitionEvent::Completed {
                completed += 1;
            }
        }
        prop_assert_eq!(completed, count.get());
    }
}
