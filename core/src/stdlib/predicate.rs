//! Predicate aggregates: `all`, `any`, `none`, `one`, `count`.
//!
//! Without a callback the verdict for an element is the element itself,
//! judged with Ruby truthiness (only `null` and `false` are falsy). A
//! callback returning `Continue` abstains for that element; `Break` ends the
//! scan with the verdict reached so far.

use crate::{
    callback::{Control, EachFn},
    dispatch::{Args, Invoke, MethodTable, NativeMethod},
    error::Result,
    values::{Sequence, Value},
};

/// Feeds each element's verdict to `verdict` until it returns `false`.
fn verdicts(
    seq: &mut Sequence,
    mut f: Option<&mut EachFn<'_>>,
    mut verdict: impl FnMut(bool) -> bool,
) {
    for (key, value) in seq.iter_mut() {
        let truthy = match f.as_deref_mut() {
            Some(f) => match f(key, value) {
                Control::Yield(result) => result.is_truthy(),
                Control::Continue => continue,
                Control::Break => return,
            },
            None => value.is_truthy(),
        };
        if !verdict(truthy) {
            return;
        }
    }
}

/// Whether every verdict is truthy. Vacuously true for an empty sequence.
pub fn all(seq: &mut Sequence, f: Option<&mut EachFn<'_>>) -> bool {
    let mut result = true;
    verdicts(seq, f, |truthy| {
        result = truthy;
        truthy
    });
    result
}

/// Whether at least one verdict is truthy.
pub fn any(seq: &mut Sequence, f: Option<&mut EachFn<'_>>) -> bool {
    let mut result = false;
    verdicts(seq, f, |truthy| {
        result = truthy;
        !truthy
    });
    result
}

/// Whether no verdict is truthy.
pub fn none(seq: &mut Sequence, f: Option<&mut EachFn<'_>>) -> bool {
    !any(seq, f)
}

/// Whether exactly one verdict is truthy.
///
/// Stops as soon as a second truthy verdict is seen.
pub fn one(seq: &mut Sequence, f: Option<&mut EachFn<'_>>) -> bool {
    let mut hits = 0;
    verdicts(seq, f, |truthy| {
        if truthy {
            hits += 1;
        }
        hits < 2
    });
    hits == 1
}

/// Counts elements.
///
/// - With `target`, counts values strictly equal to it
/// - With a callback, counts truthy verdicts (the callback may still edit
///   values in place)
/// - With neither, returns the length
pub fn count(seq: &mut Sequence, target: Option<&Value>, f: Option<&mut EachFn<'_>>) -> usize {
    if let Some(target) = target {
        return seq.values().filter(|v| *v == target).count();
    }
    if f.is_none() {
        return seq.len();
    }
    let mut hits = 0;
    verdicts(seq, f, |truthy| {
        if truthy {
            hits += 1;
        }
        true
    });
    hits
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_all(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_each();
    args.finish("all")?;
    Ok(Value::Bool(all(seq, f.as_deref_mut())))
}

fn invoke_any(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_each();
    args.finish("any")?;
    Ok(Value::Bool(any(seq, f.as_deref_mut())))
}

fn invoke_none(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_each();
    args.finish("none")?;
    Ok(Value::Bool(none(seq, f.as_deref_mut())))
}

fn invoke_one(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_each();
    args.finish("one")?;
    Ok(Value::Bool(one(seq, f.as_deref_mut())))
}

fn invoke_count(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    let mut f = args.take_each();
    args.finish("count")?;
    let target = args.has_value(0).then(|| args.take_value(0));
    Ok(Value::from(count(seq, target.as_ref(), f.as_deref_mut())))
}

pub fn register_predicate_methods(table: &mut MethodTable) {
    for (name, ptr) in [
        ("all", invoke_all as Invoke),
        ("any", invoke_any),
        ("none", invoke_none),
        ("one", invoke_one),
        ("count", invoke_count),
    ] {
        NativeMethod {
            name,
            returns_collection: false,
            ptr,
        }
        .register(table);
    }
}

#[cfg(test)]
#[path = "predicate_test.rs"]
mod predicate_test;
