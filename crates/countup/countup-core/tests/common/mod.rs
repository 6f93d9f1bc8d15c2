#![allow(dead_code)]
use countup_core::target::memory::{MemoryDocument, MemoryElement};
use countup_core::{AnimationSpec, CountUp, CountUpOptions, FrameStep, ManualScheduler, TargetRef};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Animator wired to an in-memory document and a manual scheduler.
pub struct Harness {
    pub doc: MemoryDocument,
    pub el: MemoryElement,
    pub frames: ManualScheduler,
    pub cu: CountUp<MemoryDocument>,
}

impl Harness {
    pub fn new(spec: AnimationSpec<MemoryElement>, opts: CountUpOptions) -> Self {
        Self::with_tag("SPAN", spec, opts)
    }

    pub fn with_tag(tag: &str, spec: AnimationSpec<MemoryElement>, opts: CountUpOptions) -> Self {
        init_logging();
        let doc = MemoryDocument::new();
        let el = doc.insert("counter", tag);
        let frames = ManualScheduler::new();
        let cu = CountUp::new(spec, opts, doc.clone(), frames.clone());
        Self { doc, el, frames, cu }
    }

    /// Deliver a frame if one was requested.
    pub fn frame(&mut self, ts: f64) -> FrameStep {
        if self.frames.take_pending() {
            self.cu.count(ts)
        } else {
            FrameStep::Skipped
        }
    }

    /// Deliver frames at `ts` until one is not requested; returns the last step.
    pub fn frames(&mut self, ts: impl IntoIterator<Item = f64>) -> FrameStep {
        let mut last = FrameStep::Skipped;
        for t in ts {
            last = self.frame(t);
            if last != FrameStep::Scheduled {
                break;
            }
        }
        last
    }

    pub fn text(&self) -> String {
        self.el.text()
    }
}

pub fn counter(start: impl Into<countup_core::NumberInput>, end: impl Into<countup_core::NumberInput>) -> AnimationSpec<MemoryElement> {
    AnimationSpec::new(TargetRef::Id("counter".into()), start, end)
}

pub fn linear() -> CountUpOptions {
    CountUpOptions {
        use_easing: false,
        ..Default::default()
    }
}
