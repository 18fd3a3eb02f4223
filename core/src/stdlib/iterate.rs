//! Traversal and transformation: `collect`, `each`, `reverse_collect`,
//! `collect_concat`, `inject`, `cycle`, `each_slice`, `each_cons`,
//! `slice_before`.

use regex::Regex;

use crate::{
    callback::{ChunkFn, Control, EachFn, IterFn, MemoFn},
    dispatch::{Args, Invoke, MethodTable, NativeMethod},
    error::{Error, Result},
    stdlib::order,
    values::{Sequence, Value},
};

/// Replaces every value with the callback's yielded value. Keys are kept.
///
/// # Edge Cases
///
/// - `Continue` leaves the current value as the callback left it
/// - `Break` stops: the current value and everything after it are untouched
///
/// # Examples
///
/// ```
/// use enumerable_core::{Value, seq, stdlib};
///
/// let mut s = seq![1, 2, 3];
/// stdlib::collect(&mut s, &mut |_, v| Value::Int(v.as_int().unwrap_or(0) * 10).into());
/// assert_eq!(s, seq![10, 20, 30]);
/// ```
pub fn collect(seq: &mut Sequence, f: &mut EachFn<'_>) {
    for (key, value) in seq.iter_mut() {
        match f(key, value) {
            Control::Yield(new) => *value = new,
            Control::Continue => {}
            Control::Break => break,
        }
    }
}

/// Visits every element for its side effects; yielded values are ignored.
pub fn each(seq: &mut Sequence, f: &mut EachFn<'_>) {
    for (key, value) in seq.iter_mut() {
        if let Control::Break = f(key, value) {
            break;
        }
    }
}

/// Reverses the sequence into a fresh list, then collects over it.
pub fn reverse_collect(seq: &mut Sequence, f: &mut EachFn<'_>) {
    order::reverse(seq, false);
    collect(seq, f);
}

/// Collects and flattens one level: yielded sequences are spliced into the
/// result, any other yielded value is appended. The result is a fresh list.
///
/// `Continue` contributes nothing for the current element; `Break` stops and
/// drops the unvisited elements.
pub fn collect_concat(seq: &mut Sequence, f: &mut EachFn<'_>) {
    let mut out = Sequence::with_capacity(seq.len());
    for (key, value) in seq.iter_mut() {
        match f(key, value) {
            Control::Yield(Value::Seq(inner)) => {
                for item in inner.into_values() {
                    out.append(item);
                }
            }
            Control::Yield(item) => {
                out.append(item);
            }
            Control::Continue => {}
            Control::Break => break,
        }
    }
    *seq = out;
}

/// Threads `memo` through the callback and returns it.
///
/// The callback updates the accumulator through its `&mut` argument; its
/// yielded value is ignored.
pub fn inject(seq: &mut Sequence, memo: Value, f: &mut MemoFn<'_>) -> Value {
    let mut memo = memo;
    for (key, value) in seq.iter_mut() {
        if let Control::Break = f(key, value, &mut memo) {
            break;
        }
    }
    memo
}

/// Runs the callback over every element, `times` passes over the sequence.
///
/// The third callback argument is the pass number. Without `times` the
/// passes continue until the callback returns `Break`. An empty sequence
/// never calls the callback.
pub fn cycle(seq: &mut Sequence, times: Option<usize>, f: &mut IterFn<'_>) {
    if seq.is_empty() {
        return;
    }
    let mut pass = 0;
    while times.is_none_or(|n| pass < n) {
        for (key, value) in seq.iter_mut() {
            if let Control::Break = f(key, value, pass) {
                return;
            }
        }
        pass += 1;
    }
}

/// Splits the values into chunks of `size`; the last chunk may be short.
///
/// The callback receives each chunk by `&mut`, and its edits end up in the
/// result. After `Break` the remaining chunks are still produced but no
/// longer passed to the callback.
pub fn each_slice(seq: &mut Sequence, size: usize, mut f: Option<&mut ChunkFn<'_>>) -> Result<()> {
    if size == 0 {
        return Err(Error::invalid("each_slice", "slice size must be positive"));
    }
    let mut values = core::mem::take(seq).into_values().peekable();
    let mut out = Sequence::new();
    let mut stopped = false;
    while values.peek().is_some() {
        let mut chunk: Sequence = values.by_ref().take(size).collect();
        if !stopped {
            if let Some(f) = f.as_deref_mut() {
                stopped = matches!(f(&mut chunk), Control::Break);
            }
        }
        out.append(Value::Seq(chunk));
    }
    *seq = out;
    Ok(())
}

/// Sliding windows of `size` consecutive values. Incomplete trailing windows
/// are dropped, so a sequence shorter than `size` yields no windows.
///
/// The callback runs for every element of every window, with the window index
/// as its third argument. Edits it makes land in that window only.
pub fn each_cons(seq: &mut Sequence, size: usize, mut f: Option<&mut IterFn<'_>>) -> Result<()> {
    if size == 0 {
        return Err(Error::invalid("each_cons", "window size must be positive"));
    }
    let values: Vec<Value> = core::mem::take(seq).into_values().collect();
    let mut out = Sequence::with_capacity(values.len().saturating_sub(size - 1));
    let mut stopped = false;
    for (index, window) in values.windows(size).enumerate() {
        let mut window: Sequence = window.iter().cloned().collect();
        if !stopped {
            if let Some(f) = f.as_deref_mut() {
                stopped = window
                    .iter_mut()
                    .any(|(key, value)| matches!(f(key, value, index), Control::Break));
            }
        }
        out.append(Value::Seq(window));
    }
    *seq = out;
    Ok(())
}

/// Chunks the values, starting a new chunk at every value matching
/// `pattern`. Values before the first match form the first chunk.
pub fn slice_before(seq: &mut Sequence, pattern: &Regex) {
    let mut out = Sequence::new();
    let mut chunk = Sequence::new();
    for value in core::mem::take(seq).into_values() {
        let starts = value
            .to_pattern_subject()
            .is_some_and(|subject| pattern.is_match(&subject));
        if starts && !chunk.is_empty() {
            out.append(Value::Seq(core::mem::take(&mut chunk)));
        }
        chunk.append(value);
    }
    if !chunk.is_empty() {
        out.append(Value::Seq(chunk));
    }
    *seq = out;
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_collect(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("collect")?;
    args.finish("collect")?;
    collect(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_each(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("each")?;
    args.finish("each")?;
    each(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_reverse_collect(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("reverse_collect")?;
    args.finish("reverse_collect")?;
    reverse_collect(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_collect_concat(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_each("collect_concat")?;
    args.finish("collect_concat")?;
    collect_concat(seq, &mut *f);
    Ok(Value::Null)
}

fn invoke_inject(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_memo("inject")?;
    args.finish("inject")?;
    let memo = if args.has_value(0) {
        args.take_value(0)
    } else {
        Value::Int(0)
    };
    Ok(inject(seq, memo, &mut *f))
}

fn invoke_cycle(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.require_iter("cycle")?;
    args.finish("cycle")?;
    let times = args.opt_count("cycle", 0)?;
    cycle(seq, times, &mut *f);
    Ok(Value::Null)
}

fn invoke_each_slice(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_chunk();
    args.finish("each_slice")?;
    let size = args.count("each_slice", 0)?;
    each_slice(seq, size, f.as_deref_mut())?;
    Ok(Value::Null)
}

fn invoke_each_cons(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_iter();
    args.finish("each_cons")?;
    let size = args.count("each_cons", 0)?;
    each_cons(seq, size, f.as_deref_mut())?;
    Ok(Value::Null)
}

fn invoke_slice_before(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("slice_before")?;
    let pattern = args.regex("slice_before", 0)?;
    slice_before(seq, &pattern);
    Ok(Value::Null)
}

pub fn register_iterate_methods(table: &mut MethodTable) {
    for (name, returns_collection, ptr) in [
        ("collect", true, invoke_collect as Invoke),
        ("each", true, invoke_each),
        ("reverse_collect", true, invoke_reverse_collect),
        ("collect_concat", true, invoke_collect_concat),
        ("inject", false, invoke_inject),
        ("cycle", true, invoke_cycle),
        ("each_slice", true, invoke_each_slice),
        ("each_cons", true, invoke_each_cons),
        ("slice_before", true, invoke_slice_before),
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
#[path = "iterate_test.rs"]
mod iterate_test;
