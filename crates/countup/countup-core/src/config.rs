//! Formatting and easing options.
//!
//! [`CountUpOptions`] is the resolved configuration an animator runs with.
//! Callers describe changes with [`OptionOverrides`]; which overrides take
//! effect is decided by the [`MergePolicy`].

use serde::{Deserialize, Serialize};

use crate::easing::{Easing, EasingFn, EasingKind};
use crate::format::{format_number, Formatter, FormatterFn};

/// Resolved options. Every recognized option is listed here with its default.
#[derive(Clone, Debug)]
pub struct CountUpOptions {
    /// Apply `easing` (true) or interpolate linearly (false).
    pub use_easing: bool,
    /// 1,000,000 vs 1000000
    pub use_grouping: bool,
    /// Inserted between digit groups. Empty disables grouping.
    pub separator: String,
    /// Replaces the decimal point.
    pub decimal: String,
    pub easing: Easing,
    pub formatter: Formatter,
    pub prefix: String,
    pub suffix: String,
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self {
            use_easing: true,
            use_grouping: true,
            separator: ",".to_string(),
            decimal: ".".to_string(),
            easing: Easing::OutExpo,
            formatter: Formatter::Default,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

/// How caller overrides are applied over the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergePolicy {
    /// Every supplied override wins, including `false` and `""`.
    #[default]
    Presence,
    /// Only truthy overrides win; `false` and `""` fall back to the default.
    Truthy,
}

/// Partial options supplied by a caller.
///
/// Field names follow the markup-facing camelCase spelling so a script
/// options object deserializes directly.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionOverrides {
    pub use_easing: Option<bool>,
    pub use_grouping: Option<bool>,
    pub separator: Option<String>,
    pub decimal: Option<String>,
    /// Built-in curve by name. `easing_fn` takes precedence.
    pub easing: Option<EasingKind>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub merge_policy: MergePolicy,
    #[serde(skip)]
    pub easing_fn: Option<EasingFn>,
    #[serde(skip)]
    pub formatter_fn: Option<FormatterFn>,
}

impl std::fmt::Debug for OptionOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionOverrides")
            .field("use_easing", &self.use_easing)
            .field("use_grouping", &self.use_grouping)
            .field("separator", &self.separator)
            .field("decimal", &self.decimal)
            .field("easing", &self.easing)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("merge_policy", &self.merge_policy)
            .field("easing_fn", &self.easing_fn.is_some())
            .field("formatter_fn", &self.formatter_fn.is_some())
            .finish()
    }
}

impl OptionOverrides {
    /// Parse overrides from a JSON object.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }
}

fn pick_bool(slot: &mut bool, value: Option<bool>, policy: MergePolicy) {
    match (value, policy) {
        (Some(v), MergePolicy::Presence) => *slot = v,
        (Some(true), MergePolicy::Truthy) => *slot = true,
        _ => {}
    }
}

fn pick_string(slot: &mut String, value: &Option<String>, policy: MergePolicy) {
    match (value, policy) {
        (Some(v), MergePolicy::Presence) => *slot = v.clone(),
        (Some(v), MergePolicy::Truthy) if !v.is_empty() => *slot = v.clone(),
        _ => {}
    }
}

impl CountUpOptions {
    /// Defaults with `overrides` applied.
    pub fn from_overrides(overrides: &OptionOverrides) -> Self {
        let mut opts = Self::default();
        opts.apply(overrides);
        opts
    }

    /// Apply caller overrides according to their merge policy.
    pub fn apply(&mut self, o: &OptionOverrides) {
        let policy = o.merge_policy;
        pick_bool(&mut self.use_easing, o.use_easing, policy);
        pick_bool(&mut self.use_grouping, o.use_grouping, policy);
        pick_string(&mut self.separator, &o.separator, policy);
        pick_string(&mut self.decimal, &o.decimal, policy);
        pick_string(&mut self.prefix, &o.prefix, policy);
        pick_string(&mut self.suffix, &o.suffix, policy);

        // functions are always truthy
        if let Some(f) = &o.easing_fn {
            self.easing = Easing::Custom(f.clone());
        } else if let Some(kind) = o.easing {
            self.easing = kind.into();
        }
        if let Some(f) = &o.formatter_fn {
            self.formatter = Formatter::Custom(f.clone());
        }

        if self.separator.is_empty() {
            self.use_grouping = false;
        }
    }

    /// Format a frame value with the configured formatter.
    pub fn format(&self, value: f64, decimals: u32) -> String {
        match &self.formatter {
            Formatter::Default => format_number(value, decimals, self),
            Formatter::Custom(f) => f(value),
        }
    }
}
