//! Lookup: `detect`, `find_index`, `rindex`, `member`, `has_value`, `assoc`,
//! `rassoc`, `at`, `fetch`, `values_at`, `min`, `max`.
//!
//! None of these reorder the sequence. `values_at` is the only one that
//! replaces it.

use core::cmp::Ordering;

use crate::{
    callback::{CompareFn, Control, EachFn, IndexFn, ThunkFn},
    dispatch::{Args, Invoke, MethodTable, NativeMethod},
    error::{Error, Result},
    values::{Key, Sequence, Value},
};

/// What [`find_index`] and [`rindex`] look for.
pub enum Needle<'a, 'f> {
    /// A value strictly equal to this one.
    Equals(&'a Value),
    /// An element whose verdict is truthy. `Break` ends the search empty-handed.
    Matches(&'a mut EachFn<'f>),
}

/// A default for [`fetch`] when the position is out of range.
pub enum Fallback<'a, 'f> {
    Value(Value),
    /// Called with the requested position and `null`.
    Call(&'a mut IndexFn<'f>),
}

/// `None` means the search was broken off.
fn hit(needle: &mut Needle<'_, '_>, key: &Key, value: &mut Value) -> Option<bool> {
    match needle {
        Needle::Equals(target) => Some(*value == **target),
        Needle::Matches(f) => match (*f)(key, value) {
            Control::Yield(verdict) => Some(verdict.is_truthy()),
            Control::Continue => Some(false),
            Control::Break => None,
        },
    }
}

/// The first value whose verdict is truthy.
///
/// When nothing matches, returns the fallback's value, or `null`.
pub fn detect(seq: &mut Sequence, f: &mut EachFn<'_>, fallback: Option<&mut ThunkFn<'_>>) -> Value {
    for (key, value) in seq.iter_mut() {
        match f(key, value) {
            Control::Yield(verdict) if verdict.is_truthy() => return value.clone(),
            Control::Break => break,
            _ => {}
        }
    }
    match fallback {
        Some(f) => f(),
        None => Value::Null,
    }
}

/// The key of the first element matching `needle`.
pub fn find_index(seq: &mut Sequence, mut needle: Needle<'_, '_>) -> Option<Key> {
    for (key, value) in seq.iter_mut() {
        if hit(&mut needle, key, value)? {
            return Some(key.clone());
        }
    }
    None
}

/// The original key of the last element matching `needle`.
pub fn rindex(seq: &mut Sequence, mut needle: Needle<'_, '_>) -> Option<Key> {
    for (key, value) in seq.iter_mut().rev() {
        if hit(&mut needle, key, value)? {
            return Some(key.clone());
        }
    }
    None
}

/// Whether some value loosely equals `needle` (`1 == "1" == 1.0`).
pub fn member(seq: &Sequence, needle: &Value) -> bool {
    seq.values().any(|value| value.loose_eq(needle))
}

/// Whether some value is strictly equal to `needle`.
pub fn has_value(seq: &Sequence, needle: &Value) -> bool {
    seq.values().any(|value| value == needle)
}

fn assoc_at(seq: &Sequence, needle: &Value, pos: usize) -> Value {
    seq.values()
        .find(|value| {
            value
                .as_seq()
                .and_then(|pair| pair.value_at(pos))
                .is_some_and(|field| field.loose_eq(needle))
        })
        .cloned()
        .unwrap_or_default()
}

/// The first nested sequence whose first element loosely equals `needle`.
pub fn assoc(seq: &Sequence, needle: &Value) -> Value {
    assoc_at(seq, needle, 0)
}

/// The first nested sequence whose second element loosely equals `needle`.
pub fn rassoc(seq: &Sequence, needle: &Value) -> Value {
    assoc_at(seq, needle, 1)
}

/// The value at a position; negative positions count from the end.
/// Out of range gives `null`.
pub fn at(seq: &Sequence, pos: i64) -> Value {
    seq.resolve_position(pos)
        .and_then(|pos| seq.value_at(pos))
        .cloned()
        .unwrap_or_default()
}

/// Like [`at`], but an out-of-range position falls back to `fallback`.
///
/// # Errors
///
/// [`Error::OutOfBounds`] when the position is out of range and there is no
/// fallback.
pub fn fetch(seq: &Sequence, pos: i64, fallback: Option<Fallback<'_, '_>>) -> Result<Value> {
    if let Some(value) = seq.resolve_position(pos).and_then(|p| seq.value_at(p)) {
        return Ok(value.clone());
    }
    match fallback {
        Some(Fallback::Value(value)) => Ok(value),
        Some(Fallback::Call(f)) => Ok(f(pos, &Value::Null)),
        None => Err(Error::OutOfBounds {
            index: pos,
            len: seq.len(),
        }),
    }
}

/// Replaces the sequence with the requested keys, in request order, each
/// mapped to its value or `null` when absent.
pub fn values_at(seq: &mut Sequence, keys: &[Key]) {
    let picked = Sequence::from_entries(
        keys.iter()
            .map(|key| (key.clone(), seq.get(key).cloned().unwrap_or_default())),
    );
    *seq = picked;
}

fn extreme(seq: &Sequence, mut cmp: Option<&mut CompareFn<'_>>, wanted: Ordering) -> Value {
    let mut best: Option<&Value> = None;
    for value in seq.values() {
        let better = match best {
            None => true,
            Some(current) => {
                let ord = match cmp.as_deref_mut() {
                    Some(f) => f(value, current),
                    None => value.compare(current),
                };
                ord == wanted
            }
        };
        if better {
            best = Some(value);
        }
    }
    best.cloned().unwrap_or_default()
}

/// The smallest value in natural order or by `cmp`. The first of equal
/// candidates wins; an empty sequence gives `null`.
pub fn min(seq: &Sequence, cmp: Option<&mut CompareFn<'_>>) -> Value {
    extreme(seq, cmp, Ordering::Less)
}

/// The largest value. See [`min`].
pub fn max(seq: &Sequence, cmp: Option<&mut CompareFn<'_>>) -> Value {
    extreme(seq, cmp, Ordering::Greater)
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_detect(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("detect")?;
    let mut thunk = args.take_thunk();
    args.finish("detect")?;
    if let Some(thunk) = thunk.as_deref_mut() {
        return Ok(detect(seq, &mut *f, Some(thunk)));
    }
    let default = args.take_value(0);
    let mut constant = || default.clone();
    Ok(detect(seq, &mut *f, Some(&mut constant)))
}

fn invoke_needle(
    method: &str,
    seq: &mut Sequence,
    args: &mut Args<'_>,
    search: fn(&mut Sequence, Needle<'_, '_>) -> Option<Key>,
) -> Result<Value> {
    let mut f = args.take_each();
    args.finish(method)?;
    let found = match f.as_deref_mut() {
        Some(f) => search(seq, Needle::Matches(f)),
        None => {
            let target = args.value(method, 0)?;
            search(seq, Needle::Equals(&target))
        }
    };
    Ok(found.map(|key| key.to_value()).unwrap_or_default())
}

fn invoke_find_index(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    invoke_needle("find_index", seq, args, find_index)
}

fn invoke_rindex(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    invoke_needle("rindex", seq, args, rindex)
}

fn invoke_member(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("member")?;
    let needle = args.value("member", 0)?;
    Ok(Value::Bool(member(seq, &needle)))
}

fn invoke_has_value(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("has_value")?;
    let needle = args.value("has_value", 0)?;
    Ok(Value::Bool(has_value(seq, &needle)))
}

fn invoke_assoc(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("assoc")?;
    let needle = args.value("assoc", 0)?;
    Ok(assoc(seq, &needle))
}

fn invoke_rassoc(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("rassoc")?;
    let needle = args.value("rassoc", 0)?;
    Ok(rassoc(seq, &needle))
}

fn invoke_at(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("at")?;
    Ok(at(seq, args.int("at", 0)?))
}

fn invoke_fetch(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_index();
    args.finish("fetch")?;
    let pos = args.int("fetch", 0)?;
    let fallback = match f.as_deref_mut() {
        Some(f) => Some(Fallback::Call(f)),
        None if args.has_value(1) => Some(Fallback::Value(args.take_value(1))),
        None => None,
    };
    fetch(seq, pos, fallback)
}

fn invoke_values_at(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("values_at")?;
    let keys = args.rest_keys("values_at", 0)?;
    values_at(seq, &keys);
    Ok(Value::Null)
}

fn invoke_min(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut cmp = args.take_compare();
    args.finish("min")?;
    Ok(min(seq, cmp.as_deref_mut()))
}

fn invoke_max(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut cmp = args.take_compare();
    args.finish("max")?;
    Ok(max(seq, cmp.as_deref_mut()))
}

pub fn register_search_methods(table: &mut MethodTable) {
    for (name, returns_collection, ptr) in [
        ("detect", false, invoke_detect as Invoke),
        ("find_index", false, invoke_find_index),
        ("rindex", false, invoke_rindex),
        ("member", false, invoke_member),
        ("has_value", false, invoke_has_value),
        ("assoc", false, invoke_assoc),
        ("rassoc", false, invoke_rassoc),
        ("at", false, invoke_at),
        ("fetch", false, invoke_fetch),
        ("values_at", true, invoke_values_at),
        ("min", false, invoke_min),
        ("max", false, invoke_max),
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
#[path = "search_test.rs"]
mod search_test;
