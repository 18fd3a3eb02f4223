//! Reordering and bucketing: `sort`, `sort_by`, `reverse`, `rotate`,
//! `group_by`, `partition`.

use core::cmp::Ordering;
use std::collections::BTreeMap;

use crate::{
    callback::{CompareFn, Control, EachFn},
    dispatch::{Args, Invoke, MethodTable, NativeMethod},
    error::Result,
    values::{Key, Sequence, Value},
};

/// Reassembles reordered entries, keeping or renumbering the keys.
pub(super) fn rebuild(entries: Vec<(Key, Value)>, preserve_keys: bool) -> Sequence {
    if preserve_keys {
        Sequence::from_entries(entries)
    } else {
        Sequence::from_values(entries.into_iter().map(|(_, value)| value))
    }
}

/// Stable sort in natural order, or by `cmp`.
///
/// Keys are renumbered `0..n` unless `preserve_keys` is set, in which case
/// every value keeps its key.
pub fn sort(seq: &mut Sequence, cmp: Option<&mut CompareFn<'_>>, preserve_keys: bool) {
    let mut entries = core::mem::take(seq).into_entries();
    match cmp {
        Some(f) => entries.sort_by(|(_, a), (_, b)| f(a, b)),
        None => entries.sort_by(|(_, a), (_, b)| a.compare(b)),
    }
    *seq = rebuild(entries, preserve_keys);
}

/// Orders derived sort keys lexically, by their string form. Nested
/// sequences have no string form; they sort after every scalar, in natural
/// order among themselves.
fn lexical(a: &(Option<String>, Value), b: &(Option<String>, Value)) -> Ordering {
    match (&a.0, &b.0) {
        (Some(x), Some(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.1.compare(&b.1),
    }
}

/// Stable sort by a derived key, compared lexically: `10` sorts before `9`.
///
/// # Edge Cases
///
/// - `Continue` uses the element's own value as its sort key
/// - After `Break` every remaining element sorts by its own value
pub fn sort_by(seq: &mut Sequence, f: &mut EachFn<'_>, preserve_keys: bool) {
    let mut stopped = false;
    let mut keyed = Vec::with_capacity(seq.len());
    for (key, mut value) in core::mem::take(seq) {
        let sort_key = if stopped {
            value.clone()
        } else {
            match f(&key, &mut value) {
                Control::Yield(sort_key) => sort_key,
                Control::Continue => value.clone(),
                Control::Break => {
                    stopped = true;
                    value.clone()
                }
            }
        };
        keyed.push(((sort_key.to_pattern_subject(), sort_key), (key, value)));
    }
    keyed.sort_by(|(a, _), (b, _)| lexical(a, b));
    let entries = keyed.into_iter().map(|(_, entry)| entry).collect();
    *seq = rebuild(entries, preserve_keys);
}

/// Reverses the order. Keys are renumbered unless `preserve_keys` is set.
pub fn reverse(seq: &mut Sequence, preserve_keys: bool) {
    let mut entries = core::mem::take(seq).into_entries();
    entries.reverse();
    *seq = rebuild(entries, preserve_keys);
}

/// Rotates left by `n` positions, so `rotate(1)` moves the first element to
/// the end. A negative `n` rotates right. Integer keys are renumbered, string
/// keys are kept.
pub fn rotate(seq: &mut Sequence, n: i64) {
    if seq.is_empty() {
        return;
    }
    let shift = n.rem_euclid(seq.len() as i64) as usize;
    let mut entries = core::mem::take(seq).into_entries();
    entries.rotate_left(shift);
    *seq = Sequence::from_merged_entries(entries);
}

/// Buckets the elements by the category each callback call yields.
///
/// The result maps category → bucket, in ascending category order. A bucket
/// is a fresh list unless `preserve_keys` is set. `Continue` leaves the
/// element out; `Break` leaves out the element and everything after it.
///
/// # Errors
///
/// A category that cannot be a key (a nested sequence). The sequence is left
/// as it was, apart from in-place edits made by the callback.
pub fn group_by(seq: &mut Sequence, f: &mut EachFn<'_>, preserve_keys: bool) -> Result<()> {
    let mut categories = Vec::with_capacity(seq.len());
    for (key, value) in seq.iter_mut() {
        match f(key, value) {
            Control::Yield(category) => {
                categories.push(Some(Key::from_value("group_by", &category)?));
            }
            Control::Continue => categories.push(None),
            Control::Break => break,
        }
    }

    let mut groups: BTreeMap<Key, Sequence> = BTreeMap::new();
    for ((key, value), category) in core::mem::take(seq).into_iter().zip(categories) {
        let Some(category) = category else {
            continue;
        };
        let bucket = groups.entry(category).or_default();
        if preserve_keys {
            bucket.insert(key, value);
        } else {
            bucket.append(value);
        }
    }
    *seq = Sequence::from_entries(
        groups
            .into_iter()
            .map(|(category, bucket)| (category, Value::Seq(bucket))),
    );
    Ok(())
}

/// Splits the values into `[truthy, falsy]`, each a fresh list in the
/// original relative order.
///
/// `Continue` leaves the element out of both; `Break` leaves out the element
/// and everything after it.
pub fn partition(seq: &mut Sequence, f: &mut EachFn<'_>) {
    let mut truthy = Sequence::new();
    let mut falsy = Sequence::new();
    for (key, mut value) in core::mem::take(seq) {
        match f(&key, &mut value) {
            Control::Yield(verdict) if verdict.is_truthy() => truthy.append(value),
            Control::Yield(_) => falsy.append(value),
            Control::Continue => continue,
            Control::Break => break,
        };
    }
    *seq = Sequence::from_values([Value::Seq(truthy), Value::Seq(falsy)]);
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_sort(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut cmp = args.take_compare();
    args.finish("sort")?;
    let preserve_keys = args.flag("sort", 0)?;
    sort(seq, cmp.as_deref_mut(), preserve_keys);
    Ok(Value::Null)
}

fn invoke_sort_by(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("sort_by")?;
    args.finish("sort_by")?;
    let preserve_keys = args.flag("sort_by", 0)?;
    sort_by(seq, &mut *f, preserve_keys);
    Ok(Value::Null)
}

fn invoke_reverse(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("reverse")?;
    reverse(seq, args.flag("reverse", 0)?);
    Ok(Value::Null)
}

fn invoke_rotate(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("rotate")?;
    rotate(seq, args.opt_int("rotate", 0)?.unwrap_or(1));
    Ok(Value::Null)
}

fn invoke_group_by(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("group_by")?;
    args.finish("group_by")?;
    let preserve_keys = args.flag("group_by", 0)?;
    group_by(seq, &mut *f, preserve_keys)?;
    Ok(Value::Null)
}

fn invoke_partition(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("partition")?;
    args.finish("partition")?;
    partition(seq, &mut *f);
    Ok(Value::Null)
}

pub fn register_order_methods(table: &mut MethodTable) {
    for (name, ptr) in [
        ("sort", invoke_sort as Invoke),
        ("sort_by", invoke_sort_by),
        ("reverse", invoke_reverse),
        ("rotate", invoke_rotate),
        ("group_by", invoke_group_by),
        ("partition", invoke_partition),
    ] {
        NativeMethod {
            name,
            returns_collection: true,
            ptr,
        }
        .register(table);
    }
}

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;
