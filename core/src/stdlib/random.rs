//! Randomized operations: `shuffle` and `random`.
//!
//! The static functions take the random source as an argument so callers can
//! seed it. Dispatched calls use the thread-local generator.

use rand::{
    Rng,
    seq::{IteratorRandom, SliceRandom},
};

use crate::{
    dispatch::{Args, MethodTable, NativeMethod},
    error::Result,
    stdlib::order,
    values::{Sequence, Value},
};

/// Fisher–Yates shuffle.
///
/// Without `preserve_keys` the values are shuffled into a fresh list. With it,
/// whole entries are reordered and every value keeps its key.
pub fn shuffle<R: Rng + ?Sized>(seq: &mut Sequence, preserve_keys: bool, rng: &mut R) {
    let mut entries = core::mem::take(seq).into_entries();
    entries.shuffle(rng);
    *seq = order::rebuild(entries, preserve_keys);
}

/// Picks elements at random without repetition.
///
/// A `count` of 1 returns the picked value itself (`null` for an empty
/// sequence). Any other count returns a fresh list of `min(count, len)`
/// distinct elements in random order.
pub fn random<R: Rng + ?Sized>(seq: &Sequence, count: usize, rng: &mut R) -> Value {
    if count == 1 {
        return seq.values().choose(rng).cloned().unwrap_or_default();
    }
    let mut values: Vec<Value> = seq.values().cloned().collect();
    let amount = count.min(values.len());
    let (picked, _) = values.partial_shuffle(rng, amount);
    Value::Seq(Sequence::from_values(picked.to_vec()))
}

// ============================================================================
// Method Registration
// ============================================================================

fn invoke_shuffle(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("shuffle")?;
    let preserve_keys = args.flag("shuffle", 0)?;
    shuffle(seq, preserve_keys, &mut rand::thread_rng());
    Ok(Value::Null)
}

fn invoke_random(seq: &mut Sequence, args: &mut Args<'_>) -> Result<Value> {
    args.finish("random")?;
    let count = args.opt_count("random", 0)?.unwrap_or(1);
    Ok(random(seq, count, &mut rand::thread_rng()))
}

pub fn register_random_methods(table: &mut MethodTable) {
    NativeMethod {
        name: "shuffle",
        returns_collection: true,
        ptr: invoke_shuffle,
    }
    .register(table);
    NativeMethod {
        name: "random",
        returns_collection: false,
        ptr: invoke_random,
    }
    .register(table);
}

#[cfg(test)]
#[path = "random_test.rs"]
mod random_test;
