//! Value animator: the count-up/count-down state machine.
//!
//! ```text
//! Uninitialized -> Initialized -> Running <-> Paused
//!                                    |
//!                                    v
//!                                Completed
//! ```
//! `update` re-enters `Running` from any initialized phase; `reset` returns
//! to `Initialized` and shows the start value again.

use log::{debug, error, trace};
use serde::{Deserialize, Serialize};

use crate::config::CountUpOptions;
use crate::easing::linear;
use crate::error::CountUpError;
use crate::number::{ensure_number, js_round, NumberInput};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::target::{DisplayTarget, TargetRef, TargetResolver};
use crate::Result;

/// Used when the configured duration is missing, zero or otherwise unusable.
pub const DEFAULT_DURATION_MS: f64 = 2000.0;

/// Upper bound for decimal places (fixed-point rendering limit).
pub const MAX_DECIMALS: i32 = 100;

/// Construction parameters, kept as given so `reset` can re-read them.
#[derive(Clone, Debug)]
pub struct AnimationSpec<T> {
    pub target: TargetRef<T>,
    pub start_val: NumberInput,
    pub end_val: NumberInput,
    /// Negative values clamp to 0.
    pub decimals: i32,
    /// Seconds.
    pub duration: NumberInput,
}

impl<T> AnimationSpec<T> {
    pub fn new(
        target: TargetRef<T>,
        start_val: impl Into<NumberInput>,
        end_val: impl Into<NumberInput>,
    ) -> Self {
        Self {
            target,
            start_val: start_val.into(),
            end_val: end_val.into(),
            decimals: 0,
            duration: NumberInput::Undefined,
        }
    }

    pub fn with_decimals(mut self, decimals: i32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_duration(mut self, seconds: impl Into<NumberInput>) -> Self {
        self.duration = seconds.into();
        self
    }

    /// Duration in milliseconds after defaulting.
    pub fn duration_ms(&self) -> f64 {
        let ms = self.duration.to_number() * 1000.0;
        if ms.is_finite() && ms > 0.0 {
            ms
        } else {
            DEFAULT_DURATION_MS
        }
    }

    pub fn clamped_decimals(&self) -> u32 {
        self.decimals.clamp(0, MAX_DECIMALS) as u32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Uninitialized,
    Initialized,
    Running,
    Paused,
    Completed,
}

/// Result of one frame step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStep {
    /// Another frame was requested.
    Scheduled,
    /// Duration elapsed; the end value is on screen.
    Completed,
    /// Frame arrived while not running (stale or cancelled request).
    Skipped,
}

/// Mutable per-animator timing state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub phase: Phase,
    pub start_val: f64,
    pub end_val: f64,
    pub frame_val: f64,
    pub decimals: u32,
    /// `10^decimals`
    pub scale: f64,
    pub duration_ms: f64,
    pub remaining_ms: f64,
    pub count_down: bool,
    pub start_timestamp: Option<f64>,
    pub handle: Option<FrameHandle>,
}

/// One animated number bound to one display target.
pub struct CountUp<R: TargetResolver> {
    spec: AnimationSpec<R::Target>,
    options: CountUpOptions,
    resolver: R,
    scheduler: Box<dyn FrameScheduler>,
    target: Option<R::Target>,
    state: RunState,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl<R: TargetResolver> CountUp<R> {
    /// Build an animator and, when initialization succeeds, show the start
    /// value right away.
    pub fn new(
        spec: AnimationSpec<R::Target>,
        options: CountUpOptions,
        resolver: R,
        scheduler: impl FrameScheduler + 'static,
    ) -> Self {
        let mut cu = Self {
            spec,
            options,
            resolver,
            scheduler: Box::new(scheduler),
            target: None,
            state: RunState::default(),
            on_complete: None,
        };
        if cu.initialize().is_ok() {
            cu.print_value(cu.state.start_val);
        }
        cu
    }

    /// Resolve the target and validate the numbers. No-op once initialized.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state.phase != Phase::Uninitialized {
            return Ok(());
        }

        let target = match &self.spec.target {
            TargetRef::Element(el) => Some(el.clone()),
            TargetRef::Id(id) => self.resolver.resolve(id),
            TargetRef::Missing => None,
        };
        let Some(target) = target else {
            let described = self.spec.target.describe();
            error!("[CountUp] target is null or undefined: {described}");
            return Err(CountUpError::invalid_target(described));
        };
        self.target = Some(target);

        let start = ensure_number(self.spec.start_val.to_number());
        let end = ensure_number(self.spec.end_val.to_number());
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) => (s, e),
            (s, _) => {
                error!(
                    "[CountUp] startVal or endVal is not a number: {} {}",
                    self.spec.start_val, self.spec.end_val
                );
                let (field, value) = if s.is_none() {
                    ("startVal", &self.spec.start_val)
                } else {
                    ("endVal", &self.spec.end_val)
                };
                return Err(CountUpError::invalid_number(field, value.to_string()));
            }
        };

        let decimals = self.spec.clamped_decimals();
        let duration_ms = self.spec.duration_ms();
        self.state = RunState {
            phase: Phase::Initialized,
            start_val: start,
            end_val: end,
            frame_val: start,
            decimals,
            scale: 10f64.powi(decimals as i32),
            duration_ms,
            remaining_ms: duration_ms,
            count_down: start > end,
            start_timestamp: None,
            handle: None,
        };
        debug!(
            "[CountUp] initialized {start} -> {end} over {duration_ms}ms ({decimals} decimals)"
        );
        Ok(())
    }

    /// Start the frame loop. Drops any callback left by an earlier start.
    pub fn start(&mut self) -> Result<()> {
        self.begin(None)
    }

    /// Start the frame loop and run `on_complete` once the duration elapses.
    pub fn start_with_callback(&mut self, on_complete: impl FnOnce() + 'static) -> Result<()> {
        self.begin(Some(Box::new(on_complete)))
    }

    fn begin(&mut self, on_complete: Option<Box<dyn FnOnce()>>) -> Result<()> {
        self.initialize()?;
        self.on_complete = on_complete;
        self.cancel_pending();
        self.state.start_timestamp = None;
        self.state.phase = Phase::Running;
        self.schedule();
        Ok(())
    }

    /// Per-frame step. `timestamp` is in milliseconds.
    pub fn count(&mut self, timestamp: f64) -> FrameStep {
        if self.state.phase != Phase::Running {
            trace!("[CountUp] frame at {timestamp} skipped in {:?}", self.state.phase);
            return FrameStep::Skipped;
        }
        self.state.handle = None;

        let s = &mut self.state;
        let start_ts = *s.start_timestamp.get_or_insert(timestamp);
        let progress = (timestamp - start_ts).max(0.0);
        s.remaining_ms = s.duration_ms - progress;

        let mut frame_val = if self.options.use_easing {
            let easing = &self.options.easing;
            if s.count_down {
                s.start_val - easing.apply(progress, 0.0, s.start_val - s.end_val, s.duration_ms)
            } else {
                easing.apply(progress, s.start_val, s.end_val - s.start_val, s.duration_ms)
            }
        } else if s.count_down {
            s.start_val - linear(progress, 0.0, s.start_val - s.end_val, s.duration_ms)
        } else {
            linear(progress, s.start_val, s.end_val - s.start_val, s.duration_ms)
        };

        // the last frame can land past the duration
        if s.count_down {
            if frame_val < s.end_val {
                frame_val = s.end_val;
            }
        } else if frame_val > s.end_val {
            frame_val = s.end_val;
        }

        frame_val = js_round(frame_val * s.scale) / s.scale;
        s.frame_val = frame_val;
        trace!("[CountUp] progress {progress}ms -> {frame_val}");

        self.print_value(frame_val);

        if progress < self.state.duration_ms {
            self.schedule();
            FrameStep::Scheduled
        } else {
            self.state.phase = Phase::Completed;
            debug!("[CountUp] completed at {frame_val}");
            if let Some(cb) = self.on_complete.take() {
                cb();
            }
            FrameStep::Completed
        }
    }

    /// Pause a running animation or resume a paused one. Other phases are
    /// left untouched. Returns the phase afterwards.
    pub fn pause_resume(&mut self) -> Phase {
        match self.state.phase {
            Phase::Running => {
                self.cancel_pending();
                self.state.phase = Phase::Paused;
                debug!("[CountUp] paused at {}", self.state.frame_val);
            }
            Phase::Paused => {
                let s = &mut self.state;
                s.start_timestamp = None;
                s.duration_ms = s.remaining_ms;
                s.start_val = s.frame_val;
                s.phase = Phase::Running;
                debug!(
                    "[CountUp] resumed from {} with {}ms left",
                    s.start_val, s.duration_ms
                );
                self.schedule();
            }
            other => {
                debug!("[CountUp] pause/resume ignored in {other:?}");
            }
        }
        self.state.phase
    }

    /// Stop, re-initialize from the construction parameters and show the
    /// start value.
    pub fn reset(&mut self) -> Result<()> {
        self.cancel_pending();
        self.state.start_timestamp = None;
        self.state.phase = Phase::Uninitialized;
        self.initialize()?;
        self.print_value(self.state.start_val);
        Ok(())
    }

    /// Animate from the current frame value to `new_end_val`.
    ///
    /// An invalid number leaves the run state untouched.
    pub fn update(&mut self, new_end_val: impl Into<NumberInput>) -> Result<()> {
        self.initialize()?;

        let input = new_end_val.into();
        let Some(end) = ensure_number(input.to_number()) else {
            error!("[CountUp] update() - new endVal is not a number: {input}");
            return Err(CountUpError::invalid_number("endVal", input.to_string()));
        };

        self.cancel_pending();
        let duration_ms = self.spec.duration_ms();
        let s = &mut self.state;
        s.start_timestamp = None;
        s.start_val = s.frame_val;
        s.end_val = end;
        s.count_down = s.start_val > s.end_val;
        s.duration_ms = duration_ms;
        s.remaining_ms = duration_ms;
        s.phase = Phase::Running;
        debug!("[CountUp] update {} -> {end}", s.start_val);
        self.schedule();
        Ok(())
    }

    /// Format `value` and write it to the target.
    pub fn print_value(&mut self, value: f64) {
        let text = self.options.format(value, self.state.decimals);
        if let Some(target) = self.target.as_mut() {
            target.print(&text);
        }
    }

    /// Cancel the outstanding frame request without changing phase.
    /// Hosts call this when tearing the animator down.
    pub fn cancel_frame(&mut self) {
        self.cancel_pending();
    }

    fn schedule(&mut self) {
        self.state.handle = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.state.handle.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.state.phase != Phase::Uninitialized
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == Phase::Paused
    }

    pub fn is_count_down(&self) -> bool {
        self.state.count_down
    }

    pub fn frame_value(&self) -> f64 {
        self.state.frame_val
    }

    pub fn start_value(&self) -> f64 {
        self.state.start_val
    }

    pub fn end_value(&self) -> f64 {
        self.state.end_val
    }

    pub fn duration_ms(&self) -> f64 {
        self.state.duration_ms
    }

    pub fn remaining_ms(&self) -> f64 {
        self.state.remaining_ms
    }

    pub fn decimals(&self) -> u32 {
        self.state.decimals
    }

    /// Handle of the frame request currently outstanding.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.state.handle
    }

    pub fn options(&self) -> &CountUpOptions {
        &self.options
    }

    /// Copy of the run state for diagnostics.
    pub fn snapshot(&self) -> RunState {
        self.state.clone()
    }
}
