//! Easing curves.
//!
//! All curves share the `(t, b, c, d)` signature: elapsed time, base value,
//! change in value, duration. At `t = d` every built-in curve returns
//! exactly `b + c`.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Caller supplied easing curve.
pub type EasingFn = Rc<dyn Fn(f64, f64, f64, f64) -> f64>;

/// Serializable name of a built-in curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EasingKind {
    OutExpo,
    OutQuint,
}

/// Easing used while `use_easing` is enabled.
#[derive(Clone)]
pub enum Easing {
    OutExpo,
    OutQuint,
    Custom(EasingFn),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::OutExpo
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::OutExpo => f.write_str("OutExpo"),
            Easing::OutQuint => f.write_str("OutQuint"),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<EasingKind> for Easing {
    fn from(kind: EasingKind) -> Self {
        match kind {
            EasingKind::OutExpo => Easing::OutExpo,
            EasingKind::OutQuint => Easing::OutQuint,
        }
    }
}

impl Easing {
    /// Wrap a closure as a custom curve.
    pub fn custom(f: impl Fn(f64, f64, f64, f64) -> f64 + 'static) -> Self {
        Easing::Custom(Rc::new(f))
    }

    #[inline]
    pub fn apply(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Easing::OutExpo => ease_out_expo(t, b, c, d),
            Easing::OutQuint => ease_out_quint(t, b, c, d),
            Easing::Custom(f) => f(t, b, c, d),
        }
    }
}

/// Exponential ease-out. The 1024/1023 factor cancels the `2^-10` floor so
/// the curve lands on `b + c` at `t = d`.
#[inline]
pub fn ease_out_expo(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * (-(2f64.powf(-10.0 * t / d)) + 1.0) * 1024.0 / 1023.0 + b
}

/// Quintic ease-out: `1 - (1 - t)^5` expanded.
#[inline]
pub fn ease_out_quint(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    let ts = t * t;
    let tc = ts * t;
    b + c * (tc * ts + -5.0 * ts * ts + 10.0 * tc + -10.0 * ts + 5.0 * t)
}

/// Straight-line interpolation used when easing is disabled.
#[inline]
pub fn linear(t: f64, b: f64, c: f64, d: f64) -> f64 {
    b + c * (t / d)
}
