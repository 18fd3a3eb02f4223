//! Selection and removal: `select`, `reject`, `compact`, `grep`, `uniq`,
//! `delete`, `delete_at`.
//!
//! Survivors keep their original keys unless noted otherwise.

use hashbrown::HashSet;
use regex::Regex;

use crate::{
    callback::{Control, EachFn, ThunkFn},
    dispatch::{Args, Invoke, MethodTable, NativeMethod},
    error::Result,
    values::{Key, Sequence, Value},
};

fn retain_by_verdict(seq: &mut Sequence, f: &mut EachFn<'_>, keep_truthy: bool) {
    let mut stopped = false;
    seq.retain(|key, value| {
        if stopped {
            return true;
        }
        match f(key, value) {
            Control::Yield(verdict) => verdict.is_truthy() == keep_truthy,
            Control::Continue => true,
            Control::Break => {
                stopped = true;
                true
            }
        }
    });
}

/// Keeps the elements whose verdict is truthy.
///
/// # Edge Cases
///
/// - `Continue` keeps the current element
/// - `Break` keeps the current element and everything after it
pub fn select(seq: &mut Sequence, f: &mut EachFn<'_>) {
    retain_by_verdict(seq, f, true);
}

/// Drops the elements whose verdict is truthy. The complement of [`select`].
pub fn reject(seq: &mut Sequence, f: &mut EachFn<'_>) {
    retain_by_verdict(seq, f, false);
}

/// Drops `null` values.
///
/// Non-recursive compaction preserves keys. Recursive compaction also
/// compacts nested sequences and renumbers integer keys at every level,
/// leaving string keys alone.
pub fn compact(seq: &mut Sequence, recursive: bool) {
    seq.retain(|_, value| !value.is_null());
    if !recursive {
        return;
    }
    for (_, value) in seq.iter_mut() {
        if let Value::Seq(inner) = value {
            compact(inner, true);
        }
    }
    *seq = core::mem::take(seq).renumbered();
}

/// Keeps the values whose string form matches `pattern`.
///
/// Nested sequences never match. With a callback, every survivor is then
/// replaced by the callback's yielded value, the way `collect` does it.
pub fn grep(seq: &mut Sequence, pattern: &Regex, f: Option<&mut EachFn<'_>>) {
    seq.retain(|_, value| {
        value
            .to_pattern_subject()
            .is_some_and(|subject| pattern.is_match(&subject))
    });
    if let Some(f) = f {
        for (key, value) in seq.iter_mut() {
            match f(key, value) {
                Control::Yield(new) => *value = new,
                Control::Continue => {}
                Control::Break => break,
            }
        }
    }
}

/// A hashable stand-in for the scalars strict equality can hash.
#[derive(PartialEq, Eq, Hash)]
enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Values already seen by `uniq`. Floats (`NaN != NaN`) and sequences are
/// compared linearly.
#[derive(Default)]
struct Seen {
    hashed: HashSet<Scalar>,
    other: Vec<Value>,
}

impl Seen {
    /// Records `value`, returning whether it was new.
    fn insert(&mut self, value: Value) -> bool {
        let scalar = match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(b),
            Value::Int(i) => Scalar::Int(i),
            Value::Str(s) => Scalar::Str(s),
            Value::Float(_) | Value::Seq(_) => {
                if self.other.contains(&value) {
                    return false;
                }
                self.other.push(value);
                return true;
            }
        };
        self.hashed.insert(scalar)
    }
}

/// Stable de-duplication under strict equality; the first occurrence wins.
///
/// With a callback, elements are compared by their yielded value instead. An
/// element whose callback returns `Continue` is kept without being recorded.
pub fn uniq(seq: &mut Sequence, mut f: Option<&mut EachFn<'_>>) {
    let mut seen = Seen::default();
    let mut stopped = false;
    seq.retain(|key, value| {
        if stopped {
            return true;
        }
        let candidate = match f.as_deref_mut() {
            Some(f) => match f(key, value) {
                Control::Yield(candidate) => candidate,
                Control::Continue => return true,
                Control::Break => {
                    stopped = true;
                    return true;
                }
            },
            None => value.clone(),
        };
        seen.insert(candidate)
    });
}

/// Removes every value strictly equal to `target`.
///
/// Returns `target` when something was removed; otherwise the fallback's
/// value, or `null` without a fallback.
pub fn delete(seq: &mut Sequence, target: &Value, fallback: Option<&mut ThunkFn<'_>>) -> Value {
    let before = seq.len();
    seq.retain(|_, value| value != target);
    if seq.len() < before {
        return target.clone();
    }
    match fallback {
        Some(f) => f(),
        None => Value::Null,
    }
}

/// Removes the entry under `key` and returns its value, or `null`.
///
/// A negative integer key that is not present counts from the end by
/// position: `delete_at(-1)` removes the last entry.
pub fn delete_at(seq: &mut Sequence, key: &Key) -> Value {
    let key = match key {
        Key::Int(i) if *i < 0 && !seq.contains_key(key) => {
            match seq.resolve_position(*i).and_then(|pos| seq.key_at(pos)) {
                Some(found) => found.clone(),
                None => return Value::Null,
            }
        }
        _ => key.clone(),
    };
    seq.remove(&key).unwrap_or_default()
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_select(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("select")?;
    args.finish("select")?;
    select(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_reject(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("reject")?;
    args.finish("reject")?;
    reject(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_compact(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("compact")?;
    compact(seq, args.flag("compact", 0)?);
    Ok(Value::Null)
}

fn invoke_grep(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_each();
    args.finish("grep")?;
    let pattern = args.regex("grep", 0)?;
    grep(seq, &pattern, f.as_deref_mut());
    Ok(Value::Null)
}

fn invoke_uniq(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_each();
    args.finish("uniq")?;
    uniq(seq, f.as_deref_mut());
    Ok(Value::Null)
}

fn invoke_delete(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut fallback = args.take_thunk();
    args.finish("delete")?;
    let target = args.value("delete", 0)?;
    Ok(delete(seq, &target, fallback.as_deref_mut()))
}

fn invoke_delete_at(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("delete_at")?;
    let key = args.key("delete_at", 0)?;
    Ok(delete_at(seq, &key))
}

pub fn register_filter_methods(table: &mut MethodTable) {
    for (name, returns_collection, ptr) in [
        ("select", true, invoke_select as Invoke),
        ("reject", true, invoke_reject),
        ("compact", true, invoke_compact),
        ("grep", true, invoke_grep),
        ("uniq", true, invoke_uniq),
        ("delete", false, invoke_delete),
        ("delete_at", false, invoke_delete_at),
    ] {
        NativeMethod {
            name,
            returns_collection,
            ptr,
        }
        .register(table);
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;
