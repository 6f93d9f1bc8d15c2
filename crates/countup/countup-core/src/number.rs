//! Numeric coercion helpers.
//!
//! Start/end values arrive from markup attributes and script callers, so they
//! may be numbers, numeric strings, booleans or nothing at all. Coercion
//! follows the host's `Number(x)` rules; validation then rejects NaN only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A loosely typed value that should become a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
    #[serde(skip)]
    Undefined,
}

impl Default for NumberInput {
    fn default() -> Self {
        NumberInput::Undefined
    }
}

impl NumberInput {
    /// Coerce to `f64`. Unparsable input yields NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(s) => parse_numeric_text(s),
            NumberInput::Bool(true) => 1.0,
            NumberInput::Bool(false) => 0.0,
            NumberInput::Null => 0.0,
            NumberInput::Undefined => f64::NAN,
        }
    }
}

impl From<f64> for NumberInput {
    fn from(v: f64) -> Self {
        NumberInput::Number(v)
    }
}

impl From<i32> for NumberInput {
    fn from(v: i32) -> Self {
        NumberInput::Number(v as f64)
    }
}

impl From<&str> for NumberInput {
    fn from(v: &str) -> Self {
        NumberInput::Text(v.to_string())
    }
}

impl From<String> for NumberInput {
    fn from(v: String) -> Self {
        NumberInput::Text(v)
    }
}

impl From<bool> for NumberInput {
    fn from(v: bool) -> Self {
        NumberInput::Bool(v)
    }
}

impl<T: Into<NumberInput>> From<Option<T>> for NumberInput {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(NumberInput::Null)
    }
}

impl fmt::Display for NumberInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberInput::Number(n) => write!(f, "{n}"),
            NumberInput::Text(s) => write!(f, "{s:?}"),
            NumberInput::Bool(b) => write!(f, "{b}"),
            NumberInput::Null => f.write_str("null"),
            NumberInput::Undefined => f.write_str("undefined"),
        }
    }
}

/// `Some(n)` unless `n` is NaN. Infinities are numbers too.
#[inline]
pub fn ensure_number(n: f64) -> Option<f64> {
    if n.is_nan() {
        None
    } else {
        Some(n)
    }
}

/// Round half toward positive infinity (`Math.round` semantics).
///
/// `f64::round` rounds half away from zero, which differs for negative ties:
/// `-2.5` must become `-2`, not `-3`.
#[inline]
pub fn js_round(x: f64) -> f64 {
    let r = x.round();
    if x < 0.0 && x - r == 0.5 {
        r + 1.0
    } else {
        r
    }
}

fn parse_numeric_text(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(radix_value) = parse_prefixed_integer(s) {
        return radix_value;
    }
    // `str::parse` also accepts "inf"/"nan" spellings; restrict to plain
    // decimal literals first.
    let decimal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut acc = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * radix as f64 + d as f64,
            None => return Some(f64::NAN),
        }
    }
    Some(acc)
}
