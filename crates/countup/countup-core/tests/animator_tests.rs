mod common;

use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;
use common::{counter, linear, Harness};
use countup_core::target::memory::{MemoryDocument, MemoryElement, WriteChannel};
use countup_core::{
    AnimationSpec, CountUp, CountUpError, CountUpOptions, FrameStep, ManualScheduler,
    MergePolicy, OptionOverrides, Phase, TargetRef,
};

#[test]
fn construction_prints_start_value() {
    let h = Harness::new(counter(1500, 0).with_decimals(1), CountUpOptions::default());
    assert_eq!(h.cu.phase(), Phase::Initialized);
    assert_eq!(h.text(), "1,500.0");
    assert_eq!(h.el.last_channel(), Some(WriteChannel::InnerHtml));
    assert!(h.frames.pending().is_none());
}

#[test]
fn linear_count_up_hits_midpoint_and_end() {
    let mut h = Harness::new(counter(0, 100).with_duration(2), linear());
    let fired = Rc::new(Cell::new(0));
    let f = fired.clone();
    h.cu.start_with_callback(move || f.set(f.get() + 1)).unwrap();
    assert_eq!(h.cu.phase(), Phase::Running);

    // first frame captures the start timestamp
    assert_eq!(h.frame(10_000.0), FrameStep::Scheduled);
    assert_eq!(h.text(), "0");

    assert_eq!(h.frame(11_000.0), FrameStep::Scheduled);
    assert_eq!(h.text(), "50");
    assert_relative_eq!(h.cu.remaining_ms(), 1000.0);

    assert_eq!(h.frame(12_000.0), FrameStep::Completed);
    assert_eq!(h.text(), "100");
    assert_eq!(h.cu.phase(), Phase::Completed);
    assert_eq!(fired.get(), 1);

    // nothing pending; a stray frame changes nothing
    assert!(h.frames.pending().is_none());
    assert_eq!(h.cu.count(13_000.0), FrameStep::Skipped);
    assert_eq!(fired.get(), 1);
}

#[test]
fn overshooting_last_frame_is_clamped() {
    let mut h = Harness::new(counter(0, 100).with_duration(1), CountUpOptions::default());
    h.cu.start().unwrap();
    h.frame(0.0);
    assert_eq!(h.frame(1_250.0), FrameStep::Completed);
    assert_eq!(h.cu.frame_value(), 100.0);
}

#[test]
fn count_down_is_non_increasing() {
    let mut h = Harness::new(counter(100, 0).with_duration(2), CountUpOptions::default());
    assert!(h.cu.is_count_down());
    h.cu.start().unwrap();

    let mut prev = f64::INFINITY;
    let mut step = FrameStep::Scheduled;
    let mut t = 0.0;
    while step == FrameStep::Scheduled {
        step = h.frame(t);
        let v = h.cu.frame_value();
        assert!(v <= prev, "{v} > {prev} at {t}");
        assert!(v >= 0.0);
        prev = v;
        t += 16.0;
    }
    assert_eq!(step, FrameStep::Completed);
    assert_eq!(h.text(), "0");
}

#[test]
fn frames_round_to_decimals() {
    let mut h = Harness::new(counter(0, 1).with_decimals(2).with_duration(3), linear());
    h.cu.start().unwrap();
    h.frame(0.0);
    h.frame(1000.0);
    // 1/3 rounded to two places
    assert_eq!(h.cu.frame_value(), 0.33);
    assert_eq!(h.text(), "0.33");
}

#[test]
fn pause_and_resume_continue_from_frame_value() {
    let mut h = Harness::new(counter(0, 1000).with_duration(2), linear());
    h.cu.start().unwrap();
    h.frame(0.0);
    h.frame(500.0);
    assert_eq!(h.cu.frame_value(), 250.0);

    assert_eq!(h.cu.pause_resume(), Phase::Paused);
    assert!(h.cu.is_paused());
    assert!(h.frames.pending().is_none());
    assert_eq!(h.frames.cancel_count(), 1);
    // a frame delivered anyway is ignored
    assert_eq!(h.cu.count(600.0), FrameStep::Skipped);
    assert_eq!(h.cu.frame_value(), 250.0);

    assert_eq!(h.cu.pause_resume(), Phase::Running);
    assert_eq!(h.cu.start_value(), 250.0);
    assert_eq!(h.cu.duration_ms(), 1500.0);

    h.frame(5_000.0);
    assert_eq!(h.cu.frame_value(), 250.0);
    h.frame(5_750.0);
    assert_eq!(h.cu.frame_value(), 625.0);
    assert_eq!(h.frame(6_500.0), FrameStep::Completed);
    assert_eq!(h.text(), "1,000");
}

#[test]
fn pause_resume_outside_running_is_ignored() {
    let mut h = Harness::new(counter(0, 10), CountUpOptions::default());
    assert_eq!(h.cu.pause_resume(), Phase::Initialized);
    assert!(h.frames.pending().is_none());
}

#[test]
fn reset_cancels_and_shows_start_value() {
    let mut h = Harness::new(counter(5, 50), linear());
    h.cu.start().unwrap();
    h.frame(0.0);
    h.frame(1000.0);
    assert_ne!(h.text(), "5");

    h.cu.reset().unwrap();
    assert_eq!(h.cu.phase(), Phase::Initialized);
    assert!(h.frames.pending().is_none());
    assert_eq!(h.text(), "5");
    assert_eq!(h.cu.frame_value(), 5.0);

    // runs again from the original parameters
    h.cu.start().unwrap();
    h.frame(0.0);
    assert_eq!(h.frame(2000.0), FrameStep::Completed);
    assert_eq!(h.text(), "50");
}

#[test]
fn reset_from_paused_clears_pause() {
    let mut h = Harness::new(counter(0, 10), linear());
    h.cu.start().unwrap();
    h.frame(0.0);
    h.cu.pause_resume();
    h.cu.reset().unwrap();
    assert!(!h.cu.is_paused());
    assert_eq!(h.cu.phase(), Phase::Initialized);
}

#[test]
fn update_continues_from_current_value() {
    let mut h = Harness::new(counter(0, 100).with_duration(2), linear());
    h.cu.start().unwrap();
    h.frame(0.0);
    h.frame(1000.0);
    assert_eq!(h.cu.frame_value(), 50.0);

    h.cu.update(0).unwrap();
    assert!(h.cu.is_count_down());
    assert_eq!(h.cu.start_value(), 50.0);
    assert!(h.frames.pending().is_some());
    assert_eq!(h.frames.cancel_count(), 1);

    h.frame(3000.0);
    assert_eq!(h.cu.frame_value(), 50.0);
    h.frame(4000.0);
    assert_eq!(h.cu.frame_value(), 25.0);
    assert_eq!(h.frame(5000.0), FrameStep::Completed);
    assert_eq!(h.text(), "0");
}

#[test]
fn update_restarts_a_completed_run() {
    let mut h = Harness::new(counter(0, 10).with_duration(1), linear());
    h.cu.start().unwrap();
    h.frames([0.0, 1000.0]);
    assert_eq!(h.cu.phase(), Phase::Completed);

    h.cu.update("20").unwrap();
    assert_eq!(h.cu.phase(), Phase::Running);
    assert_eq!(h.cu.duration_ms(), 1000.0);
    assert_eq!(h.frames([2000.0, 3000.0]), FrameStep::Completed);
    assert_eq!(h.text(), "20");
}

#[test]
fn update_from_paused_restores_full_duration() {
    let mut h = Harness::new(counter(0, 100).with_duration(2), linear());
    h.cu.start().unwrap();
    h.frames([0.0, 1000.0]);
    h.cu.pause_resume();
    h.cu.pause_resume();
    assert_eq!(h.cu.duration_ms(), 1000.0);

    h.cu.update(200).unwrap();
    assert!(!h.cu.is_paused());
    assert_eq!(h.cu.duration_ms(), 2000.0);
}

#[test]
fn update_with_invalid_number_leaves_state_unchanged() {
    let mut h = Harness::new(counter(0, 100), linear());
    h.cu.start().unwrap();
    h.frames([0.0, 500.0]);
    let before = h.cu.snapshot();
    let pending = h.frames.pending();

    let err = h.cu.update("lots").unwrap_err();
    assert!(matches!(err, CountUpError::InvalidNumber { .. }));
    assert_eq!(h.cu.snapshot(), before);
    assert_eq!(h.frames.pending(), pending);
    assert_eq!(h.frames.cancel_count(), 0);
}

#[test]
fn missing_target_fails_initialization() {
    common::init_logging();
    let doc = MemoryDocument::new();
    let frames = ManualScheduler::new();
    let mut cu = CountUp::new(
        AnimationSpec::new(TargetRef::Id("nowhere".into()), 0, 10),
        CountUpOptions::default(),
        doc,
        frames.clone(),
    );
    assert!(!cu.is_initialized());
    let err = cu.start().unwrap_err();
    assert_eq!(err, CountUpError::invalid_target("#nowhere"));
    assert_eq!(frames.request_count(), 0);
    assert!(cu.update(5).is_err());
}

#[test]
fn missing_element_reference_fails_initialization() {
    let mut cu: CountUp<MemoryDocument> = CountUp::new(
        AnimationSpec::new(TargetRef::Missing, 0, 10),
        CountUpOptions::default(),
        MemoryDocument::new(),
        ManualScheduler::new(),
    );
    assert!(matches!(
        cu.initialize(),
        Err(CountUpError::InvalidTarget { .. })
    ));
}

#[test]
fn non_numeric_start_fails_initialization() {
    let mut h = Harness::new(counter("abc", 10), CountUpOptions::default());
    assert!(!h.cu.is_initialized());
    assert_eq!(h.el.write_count(), 0);
    match h.cu.initialize() {
        Err(CountUpError::InvalidNumber { field, .. }) => assert_eq!(field, "startVal"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(h.cu.start().is_err());
    assert!(h.frames.pending().is_none());
}

#[test]
fn numeric_strings_are_accepted() {
    let h = Harness::new(counter(" 12 ", "0x10"), CountUpOptions::default());
    assert!(h.cu.is_initialized());
    assert_eq!(h.cu.start_value(), 12.0);
    assert_eq!(h.cu.end_value(), 16.0);
}

#[test]
fn initialize_is_idempotent() {
    let mut h = Harness::new(counter(0, 10), linear());
    h.cu.start().unwrap();
    h.frames([0.0, 500.0]);
    let before = h.cu.snapshot();
    h.cu.initialize().unwrap();
    assert_eq!(h.cu.snapshot(), before);
}

#[test]
fn direct_element_target() {
    let el = MemoryElement::with_tag("INPUT");
    let mut cu: CountUp<MemoryDocument> = CountUp::new(
        AnimationSpec::new(TargetRef::Element(el.clone()), 0, 3),
        CountUpOptions::default(),
        MemoryDocument::new(),
        ManualScheduler::new(),
    );
    assert_eq!(el.text(), "0");
    assert_eq!(el.last_channel(), Some(WriteChannel::Value));
    cu.print_value(3.0);
    assert_eq!(el.text(), "3");
}

#[test]
fn svg_text_targets_receive_text_content() {
    let h = Harness::with_tag("tspan", counter(7, 8), CountUpOptions::default());
    assert_eq!(h.el.last_channel(), Some(WriteChannel::TextContent));
}

#[test]
fn restarting_never_leaves_two_frames_pending() {
    let mut h = Harness::new(counter(0, 10), CountUpOptions::default());
    h.cu.start().unwrap();
    let first = h.frames.pending();
    h.cu.start().unwrap();
    assert_eq!(h.frames.request_count(), 2);
    assert_eq!(h.frames.cancel_count(), 1);
    assert_ne!(h.frames.pending(), first);
    assert_eq!(h.cu.pending_frame(), h.frames.pending());
}

#[test]
fn easing_override_policies_change_the_curve() {
    let falsy = OptionOverrides {
        use_easing: Some(false),
        ..Default::default()
    };

    let presence = CountUpOptions::from_overrides(&falsy.clone().with_policy(MergePolicy::Presence));
    let mut h = Harness::new(counter(0, 100), presence);
    h.cu.start().unwrap();
    h.frames([0.0, 1000.0]);
    assert_eq!(h.cu.frame_value(), 50.0);

    let truthy = CountUpOptions::from_overrides(&falsy.with_policy(MergePolicy::Truthy));
    let mut h = Harness::new(counter(0, 100), truthy);
    h.cu.start().unwrap();
    h.frames([0.0, 1000.0]);
    assert!(h.cu.frame_value() > 90.0);
}

#[test]
fn custom_formatter_and_easing() {
    let opts = CountUpOptions::from_overrides(&OptionOverrides {
        easing_fn: Some(Rc::new(|t: f64, b: f64, c: f64, d: f64| b + c * (t / d) * (t / d))),
        formatter_fn: Some(Rc::new(|v: f64| format!("{v} pts"))),
        ..Default::default()
    });
    let mut h = Harness::new(counter(0, 100), opts);
    assert_eq!(h.text(), "0 pts");
    h.cu.start().unwrap();
    h.frames([0.0, 1000.0]);
    assert_eq!(h.text(), "25 pts");
}

#[test]
fn snapshot_serializes() {
    let h = Harness::new(counter(1, 2).with_decimals(1), CountUpOptions::default());
    let json = serde_json::to_value(h.cu.snapshot()).unwrap();
    assert_eq!(json["phase"], "initialized");
    assert_eq!(json["startVal"], 1.0);
    assert_eq!(json["decimals"], 1);
    assert_eq!(json["countDown"], false);
}

#[test]
fn plain_restart_drops_earlier_callback() {
    let mut h = Harness::new(counter(0, 10).with_duration(1), linear());
    let fired = Rc::new(Cell::new(0));
    let f = fired.clone();
    h.cu.start_with_callback(move || f.set(f.get() + 1)).unwrap();
    assert_eq!(h.frame(0.0), FrameStep::Scheduled);

    h.cu.start().unwrap();
    assert_eq!(h.frames([100.0, 600.0, 1_100.0]), FrameStep::Completed);
    assert_eq!(h.text(), "10");
    assert_eq!(fired.get(), 0);
}

#[test]
fn restart_with_new_callback_replaces_the_old_one() {
    let mut h = Harness::new(counter(0, 10).with_duration(1), linear());
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let (a, b) = (first.clone(), second.clone());
    h.cu.start_with_callback(move || a.set(a.get() + 1)).unwrap();
    h.frame(0.0);
    h.cu.start_with_callback(move || b.set(b.get() + 1)).unwrap();
    assert_eq!(h.frames([0.0, 1_000.0]), FrameStep::Completed);
    assert_eq!((first.get(), second.get()), (0, 1));
}

#[test]
fn unrounded_start_values_print_ties_away_from_zero() {
    let mut h = Harness::new(counter(2.5, 10), CountUpOptions::default());
    assert_eq!(h.text(), "3");

    h.cu.print_value(0.125);
    assert_eq!(h.text(), "0");
    h.cu.reset().unwrap();
    assert_eq!(h.text(), "3");

    let h = Harness::new(counter(-2.5, 10), CountUpOptions::default());
    assert_eq!(h.text(), "-3");
}
