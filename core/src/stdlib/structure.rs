//! Structural operations: `flatten`, `merge`, `zip`, `array_column`,
//! `combination`.

use smallvec::{SmallVec, smallvec};

use crate::{
    dispatch::{Args, Invoke, MethodTable, NativeMethod},
    error::Result,
    values::{Key, Sequence, Value},
};

fn flatten_into(out: &mut Sequence, value: Value, depth: Option<usize>, changed: &mut bool) {
    match value {
        Value::Seq(inner) if depth != Some(0) => {
            *changed = true;
            let depth = depth.map(|d| d - 1);
            for item in inner.into_values() {
                flatten_into(out, item, depth, changed);
            }
        }
        other => {
            out.append(other);
        }
    }
}

/// Merges nested sequences into the outer one, up to `depth` levels
/// (unbounded when `None`). Every key is discarded.
///
/// Returns whether anything was flattened, so an input that was already flat
/// reports `false`.
pub fn flatten(seq: &mut Sequence, depth: Option<usize>) -> bool {
    let mut changed = false;
    let mut out = Sequence::with_capacity(seq.len());
    for value in core::mem::take(seq).into_values() {
        flatten_into(&mut out, value, depth, &mut changed);
    }
    *seq = out;
    changed
}

/// Appends `others` in order with array-merge semantics: integer keys are
/// renumbered, string keys from later sequences overwrite earlier ones.
pub fn merge(seq: &mut Sequence, others: Vec<Sequence>) {
    let base = core::mem::take(seq);
    *seq = Sequence::from_merged_entries(base.into_iter().chain(others.into_iter().flatten()));
}

/// Pairs every value with the values at the same position in `others`.
///
/// # Edge Cases
///
/// - The number of rows is the length of `seq`; longer `others` are cut short
/// - A shorter sequence in `others` pads its missing positions with `null`
pub fn zip(seq: &mut Sequence, others: &[Sequence]) {
    *seq = core::mem::take(seq)
        .into_values()
        .enumerate()
        .map(|(pos, value)| {
            let mut row = Sequence::with_capacity(others.len() + 1);
            row.append(value);
            for other in others {
                row.append(other.value_at(pos).cloned().unwrap_or_default());
            }
            Value::Seq(row)
        })
        .collect();
}

/// Projects `column` out of every nested sequence.
///
/// Without `column` the whole row is taken. Rows that are not sequences, or
/// that lack the column, are skipped. With `index_key`, each projected value
/// is keyed by that row's `index_key` value; rows without a usable one are
/// appended.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when a row has to be appended after an index
/// value of `i64::MAX`. The sequence is left untouched.
///
/// [`Error::InvalidArgument`]: crate::Error::InvalidArgument
pub fn array_column(
    seq: &mut Sequence,
    column: Option<&Key>,
    index_key: Option<&Key>,
) -> Result<()> {
    let mut out = Sequence::new();
    for row in seq.values() {
        let Value::Seq(row) = row else {
            continue;
        };
        let key = index_key
            .and_then(|k| row.get(k))
            .and_then(|v| Key::from_value("array_column", v).ok());
        let value = match column {
            None => Value::Seq(row.clone()),
            Some(column) => match row.get(column) {
                Some(value) => value.clone(),
                None => continue,
            },
        };
        match key {
            Some(key) => {
                out.insert(key, value);
            }
            None => {
                out.push(value)?;
            }
        }
    }
    *seq = out;
    Ok(())
}

type Combo = SmallVec<[usize; 8]>;

/// Index combinations of `limit` out of `0..size`, in lexicographic order.
fn combine(size: usize, limit: usize) -> Vec<Combo> {
    match limit {
        0 => vec![Combo::new()],
        _ if limit > size => Vec::new(),
        _ if limit == size => vec![(0..size).collect()],
        1 => (0..size).map(|i| smallvec![i]).collect(),
        _ => combine(size, limit - 1)
            .into_iter()
            .flat_map(|partial| {
                let next = partial.last().map_or(0, |&last| last + 1);
                (next..size).map(move |i| {
                    let mut combo = partial.clone();
                    combo.push(i);
                    combo
                })
            })
            .collect(),
    }
}

/// Replaces the sequence with every `limit`-sized combination of its values.
///
/// Each combination keeps source order and never repeats a position.
///
/// # Examples
///
/// ```
/// use enumerable_core::{seq, stdlib};
///
/// let mut s = seq![1, 2, 3];
/// stdlib::combination(&mut s, 2);
/// assert_eq!(s, seq![seq![1, 2], seq![1, 3], seq![2, 3]]);
/// ```
pub fn combination(seq: &mut Sequence, limit: usize) {
    let values: Vec<Value> = core::mem::take(seq).into_values().collect();
    *seq = combine(values.len(), limit)
        .into_iter()
        .map(|combo| combo.iter().map(|&i| values[i].clone()).collect::<Sequence>())
        .collect();
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_flatten(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("flatten")?;
    let depth = args.opt_count("flatten", 0)?;
    Ok(Value::Bool(flatten(seq, depth)))
}

fn invoke_merge(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("merge")?;
    let others = args.rest_seqs("merge", 0)?;
    merge(seq, others);
    Ok(Value::Null)
}

fn invoke_zip(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("zip")?;
    let others = args.rest_seqs("zip", 0)?;
    zip(seq, &others);
    Ok(Value::Null)
}

fn invoke_array_column(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("array_column")?;
    let column = args.opt_key("array_column", 0)?;
    let index_key = args.opt_key("array_column", 1)?;
    array_column(seq, column.as_ref(), index_key.as_ref())?;
    Ok(Value::Null)
}

fn invoke_combination(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("combination")?;
    combination(seq, args.count("combination", 0)?);
    Ok(Value::Null)
}

pub fn register_structure_methods(table: &mut MethodTable) {
    for (name, ptr) in [
        ("flatten", invoke_flatten as Invoke),
        ("merge", invoke_merge),
        ("zip", invoke_zip),
        ("array_column", invoke_array_column),
        ("combination", invoke_combination),
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
#[path = "structure_test.rs"]
mod structure_test;
