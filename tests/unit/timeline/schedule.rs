use super::*;

fn states(times: &[f64]) -> Vec<Timed<Ease>> {
    times.iter().map(|&t| Timed::new(t, Ease::Linear)).collect()
}

fn ease_of(e: &Ease) -> Ease {
    *e
}

#[test]
fn holds_first_pose_before_the_first_keyframe() {
    let s = states(&[1.0, 2.0, 3.0]);
    let mut c = Cursor::new();
    let b = c.locate(&s, 0.5, ease_of);
    assert_eq!(b.from.time, 1.0);
    assert_eq!(b.to.time, 1.0);
    assert_eq!(b.progress, 0.0);
    assert_eq!(b.eased, 0.0);
}

#[test]
fn holds_final_pose_past_the_last_keyframe() {
    let s = states(&[1.0, 2.0, 3.0]);
    let mut c = Cursor::new();
    let b = c.locate(&s, 9.0, ease_of);
    assert_eq!(b.from.time, 3.0);
    assert_eq!(b.progress, 1.0);
    assert_eq!(b.eased, 1.0);
}

#[test]
fn brackets_interior_times_with_normalized_progress() {
    let s = states(&[0.0, 2.0, 4.0]);
    let mut c = Cursor::new();

    let b = c.locate(&s, 0.5, ease_of);
    assert_eq!((b.from.time, b.to.time), (0.0, 2.0));
    assert_eq!(b.progress, 0.25);

    let b = c.locate(&s, 3.0, ease_of);
    assert_eq!((b.from.time, b.to.time), (2.0, 4.0));
    assert_eq!(b.progress, 0.5);
}

#[test]
fn bracket_invariant_holds_for_every_time_and_hint() {
    let s = states(&[0.0, 0.5, 0.5, 1.0, 4.0, 4.0, 4.5, 10.0]);
    for probe in [0.01, 0.25, 0.5, 0.75, 2.0, 4.0, 4.2, 4.49, 9.99] {
        for hint_seed in [0.0, 9.9, 4.0, 0.6] {
            let mut c = Cursor::new();
            c.locate(&s, hint_seed, ease_of);
            let b = c.locate(&s, probe, ease_of);
            assert!(b.from.time <= probe, "from {} > t {probe}", b.from.time);
            assert!(probe < b.to.time, "t {probe} >= to {}", b.to.time);
        }
    }
}

#[test]
fn backward_seek_relocates_correctly() {
    let s = states(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let mut c = Cursor::new();

    // Forward playback warms the hint...
    for t in [0.1, 0.9, 1.7, 2.5, 3.3, 4.1, 4.9, 5.7] {
        c.locate(&s, t, ease_of);
    }
    // ...then a retry seeks back near the start.
    let b = c.locate(&s, 0.2, ease_of);
    assert_eq!((b.from.time, b.to.time), (0.0, 1.0));
    assert!((b.progress - 0.2).abs() < 1e-12);
}

#[test]
fn equal_timestamps_never_divide_by_zero() {
    // An all-equal list reads as already complete at its timestamp.
    let s = states(&[1.0, 1.0]);
    let mut c = Cursor::new();
    let b = c.locate(&s, 1.0, ease_of);
    assert_eq!(b.progress, 1.0);
    assert!(b.progress.is_finite());

    // An interior duplicate is instantaneous: the bracket lands on the later
    // duplicate rather than the zero-width interval.
    let s = states(&[0.0, 1.0, 1.0, 2.0]);
    let b = c.locate(&s, 1.0, ease_of);
    assert_eq!((b.from.time, b.to.time), (1.0, 2.0));
    assert_eq!(b.progress, 0.0);
}

#[test]
fn non_finite_times_resolve_to_boundary_holds() {
    let s = states(&[0.0, 1.0, 2.0]);
    let mut c = Cursor::new();
    // Warm the hint on an interior time first.
    c.locate(&s, 1.5, ease_of);

    let b = c.locate(&s, f64::NAN, ease_of);
    assert_eq!((b.from.time, b.progress), (0.0, 0.0));
    assert_eq!(c.locate(&s, f64::INFINITY, ease_of).progress, 1.0);
    assert_eq!(c.locate(&s, f64::NEG_INFINITY, ease_of).progress, 0.0);
}

#[test]
fn eased_progress_uses_the_from_state_selector() {
    let s = vec![
        Timed::new(0.0, Ease::InQuad),
        Timed::new(1.0, Ease::Linear),
    ];
    let mut c = Cursor::new();
    let b = c.locate(&s, 0.5, |e| *e);
    assert_eq!(b.progress, 0.5);
    assert_eq!(b.eased, 0.25);
}

#[test]
fn single_state_lists_hold_on_both_sides() {
    let s = states(&[2.0]);
    let mut c = Cursor::new();
    assert_eq!(c.locate(&s, 0.0, ease_of).progress, 0.0);
    assert_eq!(c.locate(&s, 2.0, ease_of).progress, 1.0);
    assert_eq!(c.locate(&s, 5.0, ease_of).progress, 1.0);
}
