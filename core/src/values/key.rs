use core::fmt;

use crate::{
    error::{Error, Result},
    values::Value,
};

/// A sequence key: either an integer or a string.
///
/// Keys are totally ordered: every integer sorts before every string,
/// integers compare numerically and strings byte-lexicographically. This is
/// the order `group_by` uses for its categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Converts a value into a key with array-key casting rules.
    ///
    /// # Edge Cases
    ///
    /// - Integer-looking strings become integers: `"7"` → `7`, but `"07"` stays a string
    /// - Booleans become `0` / `1`, floats are truncated toward zero
    /// - `null` becomes the empty string key
    /// - Nested sequences cannot be keys
    pub fn from_value(method: &str, value: &Value) -> Result<Key> {
        match value {
            Value::Null => Ok(Key::Str(String::new())),
            Value::Bool(b) => Ok(Key::Int(*b as i64)),
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::Float(f) => Ok(Key::Int(f.trunc() as i64)),
            Value::Str(s) => Ok(Key::from(s.as_str())),
            Value::Seq(_) => Err(Error::invalid(method, "a sequence cannot be used as a key")),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(i) => Value::Int(*i),
            Key::Str(s) => Value::Str(s.clone()),
        }
    }
}

/// Canonical decimal integers only: no sign on zero, no leading zeros, no `+`.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s.starts_with('-') && digits == "0" {
        return None;
    }
    s.parse().ok()
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i as i64)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i as i64)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match canonical_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{:?}", s),
        }
    }
}
