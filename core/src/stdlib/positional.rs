//! Position-based operations: `take`, `last`, `drop`, `take_while`,
//! `drop_while`, `slice`, `fill`.
//!
//! Positions count entries in iteration order, independent of keys.

use crate::{
    callback::{Control, EachFn, IndexFn},
    dispatch::{Args, Invoke, MethodTable, NativeMethod},
    error::{Error, Result},
    values::{Sequence, Value},
};

/// What [`fill`] writes into each position.
pub enum Filler<'a, 'f> {
    Value(Value),
    /// Called with the position and the value currently there (`null` for a
    /// position past the end).
    Call(&'a mut IndexFn<'f>),
}

fn retain_positions(seq: &mut Sequence, mut keep: impl FnMut(usize) -> bool) {
    let mut pos = 0;
    seq.retain(|_, _| {
        pos += 1;
        keep(pos - 1)
    });
}

/// Keeps the first `n` entries.
pub fn take(seq: &mut Sequence, n: usize) {
    retain_positions(seq, |pos| pos < n);
}

/// Keeps the last `n` entries.
pub fn last(seq: &mut Sequence, n: usize) {
    let skip = seq.len().saturating_sub(n);
    retain_positions(seq, |pos| pos >= skip);
}

/// Drops the first `n` entries.
pub fn drop(seq: &mut Sequence, n: usize) {
    retain_positions(seq, |pos| pos >= n);
}

/// Length of the leading run of truthy verdicts. `Continue` counts as
/// truthy; `Break` ends the run.
fn prefix_len(seq: &mut Sequence, f: &mut EachFn<'_>) -> usize {
    let mut len = 0;
    for (key, value) in seq.iter_mut() {
        match f(key, value) {
            Control::Yield(verdict) if verdict.is_truthy() => {}
            Control::Continue => {}
            _ => break,
        }
        len += 1;
    }
    len
}

/// Keeps the leading run of elements with truthy verdicts.
pub fn take_while(seq: &mut Sequence, f: &mut EachFn<'_>) {
    let n = prefix_len(seq, f);
    take(seq, n);
}

/// Drops the leading run of elements with truthy verdicts.
pub fn drop_while(seq: &mut Sequence, f: &mut EachFn<'_>) {
    let n = prefix_len(seq, f);
    drop(seq, n);
}

/// Resolves `(start, length)` to a position range clamped to `len`.
fn bounds(len: usize, start: i64, length: Option<i64>) -> (usize, usize) {
    let len = len as i64;
    let begin = if start < 0 {
        (len + start).max(0)
    } else {
        start.min(len)
    };
    let end = match length {
        None => len,
        Some(n) if n < 0 => (len + n).max(begin),
        Some(n) => begin.saturating_add(n).min(len),
    };
    (begin as usize, end as usize)
}

/// Cuts out a positional range.
///
/// # Edge Cases
///
/// - A negative `start` counts from the end: `slice(-2)` is the last two
/// - A negative `length` stops that many entries short of the end
/// - A `start` past the end gives an empty range
///
/// Without `replacement` the sequence becomes the range, keys preserved, and
/// the result is `null`. With a replacement the range is replaced by its
/// entries instead, integer keys are renumbered, and the removed values are
/// returned as a list.
pub fn slice(
    seq: &mut Sequence,
    start: i64,
    length: Option<i64>,
    replacement: Option<Sequence>,
) -> Value {
    let (begin, end) = bounds(seq.len(), start, length);
    let Some(replacement) = replacement else {
        retain_positions(seq, |pos| (begin..end).contains(&pos));
        return Value::Null;
    };

    let mut entries = core::mem::take(seq).into_entries();
    let tail = entries.split_off(end);
    let removed = entries.split_off(begin);
    *seq = Sequence::from_merged_entries(entries.into_iter().chain(replacement).chain(tail));
    Value::Seq(Sequence::from_values(removed.into_iter().map(|(_, value)| value)))
}

/// The longest sequence `fill` will grow.
pub const MAX_FILL_LEN: usize = 1 << 30;

/// Overwrites a positional range with `filler`.
///
/// `start` defaults to 0 and may be negative. Without `length` the range
/// runs to the end. A range reaching past the end appends new elements,
/// padding any gap before `start` with `null`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when the range would end past
/// [`MAX_FILL_LEN`] or the sequence has no integer keys left to append
/// under. The sequence is left untouched.
pub fn fill(
    seq: &mut Sequence,
    mut filler: Filler<'_, '_>,
    start: Option<i64>,
    length: Option<usize>,
) -> Result<()> {
    let len = seq.len() as i64;
    let begin = match start {
        None => 0,
        Some(s) if s < 0 => (len + s).max(0) as usize,
        Some(s) => usize::try_from(s).unwrap_or(usize::MAX),
    };
    let end = match length {
        None => seq.len().max(begin),
        Some(n) => begin.saturating_add(n),
    };
    if end <= begin {
        return Ok(());
    }
    if end > MAX_FILL_LEN {
        return Err(Error::invalid("fill", "argument too big"));
    }
    let appended = end.saturating_sub(seq.len());
    seq.ensure_room("fill", appended)?;
    seq.try_reserve("fill", appended)?;

    while seq.len() < begin {
        seq.push(Value::Null)?;
    }
    for pos in begin..end {
        let new = match &mut filler {
            Filler::Value(value) => value.clone(),
            Filler::Call(f) => (*f)(pos as i64, seq.value_at(pos).unwrap_or(&Value::Null)),
        };
        match seq.value_at_mut(pos) {
            Some(slot) => *slot = new,
            None => {
                seq.push(new)?;
            }
        }
    }
    Ok(())
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_take(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("take")?;
    take(seq, args.opt_count("take", 0)?.unwrap_or(1));
    Ok(Value::Null)
}

fn invoke_last(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("last")?;
    last(seq, args.opt_count("last", 0)?.unwrap_or(1));
    Ok(Value::Null)
}

fn invoke_drop(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("drop")?;
    drop(seq, args.count("drop", 0)?);
    Ok(Value::Null)
}

fn invoke_take_while(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("take_while")?;
    args.finish("take_while")?;
    take_while(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_drop_while(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("drop_while")?;
    args.finish("drop_while")?;
    drop_while(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_slice(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("slice")?;
    let start = args.int("slice", 0)?;
    let length = args.opt_int("slice", 1)?;
    let replacement = if args.has_value(2) {
        Some(args.seq("slice", 2)?)
    } else {
        None
    };
    Ok(slice(seq, start, length, replacement))
}

/// `fill(value, start?, length?)` or `fill(start?, length?)` with an index
/// callback.
fn invoke_fill(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_index();
    args.finish("fill")?;
    let (filler, first) = match f.as_deref_mut() {
        Some(f) => (Filler::Call(f), 0),
        None => (Filler::Value(args.value("fill", 0)?), 1),
    };
    let start = args.opt_int("fill", first)?;
    let length = args.opt_count("fill", first + 1)?;
    fill(seq, filler, start, length)?;
    Ok(Value::Null)
}

pub fn register_positional_methods(table: &mut MethodTable) {
    for (name, returns_collection, ptr) in [
        ("take", true, invoke_take as Invoke),
        ("last", true, invoke_last),
        ("drop", true, invoke_drop),
        ("take_while", true, invoke_take_while),
        ("drop_while", true, invoke_drop_while),
        ("slice", true, invoke_slice),
        ("fill", true, invoke_fill),
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
#[path = "positional_test.rs"]
mod positional_test;
