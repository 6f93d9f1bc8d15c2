//! Error types for the value animator

use serde::{Deserialize, Serialize};

/// Failures reported by the animator.
///
/// Both variants are non-fatal: the operation that hit them becomes a
/// no-op and the caller decides whether to retry with corrected input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CountUpError {
    /// The display target could not be resolved
    #[error("target is null or undefined: {target}")]
    InvalidTarget { target: String },

    /// A start, end or update value is not a number
    #[error("{field} is not a number: {value}")]
    InvalidNumber { field: String, value: String },
}

impl CountUpError {
    pub fn invalid_target(target: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
        }
    }

    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTarget { .. } => "target",
            Self::InvalidNumber { .. } => "validation",
        }
    }
}
