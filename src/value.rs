//! # Captured Values
//!
//! Every field the grammar extracts from an SDP line is stored as a [`Value`].
//! A capture that is the canonical decimal rendering of a number becomes a
//! number, everything else stays a string:
//!
//! ```rust
//! use sdpio::value::{coerce, Value};
//!
//! assert_eq!(coerce("20518"), Value::Int(20518));
//! assert_eq!(coerce("0.125"), Value::Float(0.125));
//! assert_eq!(coerce("4d0028"), Value::from("4d0028"));
//! // Too large to survive the conversion, so it stays a string
//! assert_eq!(coerce("3710604898417546434"), Value::from("3710604898417546434"));
//! ```
//!
//! The same rule is used by the parser and by the helper decoders in
//! [`crate::utils`], so a value decoded either way compares equal.

use std::fmt;

/// Numbers at or beyond this magnitude render in exponent form canonically.
const PLAIN_NOTATION_MAX: f64 = 1e21;
/// Non-zero numbers below this magnitude render in exponent form canonically.
const PLAIN_NOTATION_MIN: f64 = 1e-6;

/// A single captured field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integral number, e.g. a port or payload type
    Int(i64),
    /// A fractional number, e.g. `a=ptime:0.125`
    Float(f64),
    /// Anything that is not the canonical form of a number
    Str(String),
}

impl Value {
    /// Returns the string content, or `None` for numbers
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, or `None` for floats and strings
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric content as a float, or `None` for strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Str(_) => None,
        }
    }

    /// Whether the value counts as "set" for optional template segments:
    /// empty strings and zero are not.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

/// Converts a captured substring into a number when it is the exact
/// canonical rendering of one, otherwise keeps it as a string.
pub fn coerce(raw: &str) -> Value {
    match canonical_number(raw) {
        Some(n) if !raw.contains('.') => match raw.parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(n),
        },
        Some(n) => Value::Float(n),
        None => Value::Str(raw.to_string()),
    }
}

/// Re-applies [`coerce`] to an existing value. Numbers are left untouched.
pub fn coerce_value(value: Value) -> Value {
    match value {
        Value::Str(s) => coerce(&s),
        other => other,
    }
}

fn canonical_number(raw: &str) -> Option<f64> {
    let n: f64 = raw.parse().ok()?;
    if !n.is_finite() || n.abs() >= PLAIN_NOTATION_MAX {
        return None;
    }
    if n != 0.0 && n.abs() < PLAIN_NOTATION_MIN {
        return None;
    }
    // "-0" renders as "0" canonically
    if n == 0.0 && raw != "0" {
        return None;
    }
    if format!("{}", n) == raw {
        Some(n)
    } else {
        None
    }
}
