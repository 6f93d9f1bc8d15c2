//! Number formatting.
//!
//! The default formatter renders a fixed number of decimals, groups the
//! integer part in threes, swaps in the configured decimal separator and
//! wraps the result with prefix/suffix.

use std::fmt;
use std::rc::Rc;

use crate::config::CountUpOptions;

/// Caller supplied formatter. Receives the already rounded frame value.
pub type FormatterFn = Rc<dyn Fn(f64) -> String>;

#[derive(Clone, Default)]
pub enum Formatter {
    #[default]
    Default,
    Custom(FormatterFn),
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Default => f.write_str("Default"),
            Formatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Default formatting algorithm.
pub fn format_number(value: f64, decimals: u32, opts: &CountUpOptions) -> String {
    // -0 prints without a sign
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = if value.is_finite() {
        to_fixed(value, decimals as usize)
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    };

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let int_part = if opts.use_grouping && !opts.separator.is_empty() {
        group_thousands(int_part, &opts.separator)
    } else {
        int_part.to_string()
    };

    let mut out =
        String::with_capacity(opts.prefix.len() + fixed.len() + opts.suffix.len() + 8);
    out.push_str(&opts.prefix);
    out.push_str(&int_part);
    if let Some(frac) = frac_part {
        out.push_str(&opts.decimal);
        out.push_str(frac);
    }
    out.push_str(&opts.suffix);
    out
}

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1100;

/// Fixed-point text where an exact tie rounds away from zero.
fn to_fixed(value: f64, decimals: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let wider = format!("{:.*}", decimals + 1, magnitude);
    if wider.ends_with('5') {
        let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
        if exact.trim_end_matches('0') == wider {
            return format!("{sign}{}", increment_last_digit(&wider[..wider.len() - 1]));
        }
    }
    format!("{sign}{:.*}", decimals, magnitude)
}

/// Add one unit in the last place of a plain decimal string.
fn increment_last_digit(truncated: &str) -> String {
    let mut digits: Vec<u8> = truncated.trim_end_matches('.').bytes().collect();
    let mut i = digits.len();
    while i > 0 {
        i -= 1;
        match digits[i] {
            b'.' => {}
            b'9' => digits[i] = b'0',
            _ => {
                digits[i] += 1;
                return String::from_utf8(digits).unwrap_or_default();
            }
        }
    }
    digits.insert(0, b'1');
    String::from_utf8(digits).unwrap_or_default()
}

/// Insert `sep` every three digits from the right. A leading sign or other
/// non-digit prefix is left alone.
fn group_thousands(int_part: &str, sep: &str) -> String {
    let digits_start = int_part
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(int_part.len());
    let (sign, digits) = int_part.split_at(digits_start);
    if digits.len() <= 3 {
        return int_part.to_string();
    }

    let mut out = String::with_capacity(int_part.len() + sep.len() * (digits.len() / 3));
    out.push_str(sign);
    let lead = digits.len() % 3;
    if lead > 0 {
        out.push_str(&digits[..lead]);
    }
    for (i, chunk) in digits.as_bytes()[lead..].chunks(3).enumerate() {
        if lead > 0 || i > 0 {
            out.push_str(sep);
        }
        // chunks of ASCII digits are valid UTF-8
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
    }
    out
}
