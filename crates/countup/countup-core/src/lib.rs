//! CountUp Core (host-agnostic)
//!
//! A value animator that interpolates a displayed number from a start value
//! to an end value over a fixed duration, eases the progress, formats the
//! result and writes it into a display target once per frame.
//!
//! The crate knows nothing about browsers. Hosts (the wasm adapter, native
//! UIs, tests) provide:
//! - a [`FrameScheduler`] that calls [`CountUp::count`] on the next frame,
//! - a [`TargetResolver`] that turns an element id into a [`DisplayTarget`].

pub mod animator;
pub mod config;
pub mod easing;
pub mod error;
pub mod format;
pub mod number;
pub mod scheduler;
pub mod target;

// Re-exports for consumers (adapters)
pub use animator::{AnimationSpec, CountUp, FrameStep, Phase, RunState};
pub use config::{CountUpOptions, MergePolicy, OptionOverrides};
pub use easing::{Easing, EasingFn, EasingKind};
pub use error::CountUpError;
pub use format::{format_number, Formatter, FormatterFn};
pub use number::{ensure_number, js_round, NumberInput};
pub use scheduler::{FallbackClock, FrameHandle, FrameScheduler, FrameSource, ManualScheduler};
pub use target::{DisplayTarget, TargetKind, TargetRef, TargetResolver};

/// Version reported by [`version`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library version string.
pub fn version() -> &'static str {
    VERSION
}

/// Crate result alias.
pub type Result<T> = core::result::Result<T, CountUpError>;
