//! The chainable collection wrapper.
//!
//! A [`Collection`] stores every element in its own [`Slot`], a shared cell.
//! Calls run on a plain [`Sequence`] snapshot through the dispatcher; a
//! destructive call then writes the snapshot back slot by slot, so that
//! collections linked to this one (see [`crate::linked`]) observe the
//! change.

use core::{cell::RefCell, fmt};
use std::rc::Rc;

use enumerable_core::{
    Args, Error, Key, Outcome, Result, Sequence, Value,
    dispatch::{self, Resolution},
};
use hashbrown::HashMap;

/// Shared storage for a single element.
pub type Slot = Rc<RefCell<Value>>;

/// The result of [`Collection::call`].
#[derive(Debug, PartialEq)]
pub enum Chained {
    /// A fresh collection, ready for the next call.
    Collection(Collection),
    /// A scalar, or the side result of a destructive call.
    Value(Value),
}

impl Chained {
    pub fn into_collection(self) -> Option<Collection> {
        match self {
            Chained::Collection(c) => Some(c),
            Chained::Value(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Chained::Collection(_) => None,
            Chained::Value(v) => Some(v),
        }
    }
}

/// An ordered collection of shared element slots.
#[derive(Default)]
pub struct Collection {
    entries: Vec<(Key, Slot)>,
    index: HashMap<Key, usize>,
}

// Slots are `Rc`: a collection and its linked ranges stay on one thread.
static_assertions::assert_not_impl_any!(Collection: Send, Sync);

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection over existing slots. Later duplicates of a key
    /// replace the earlier slot but keep its position.
    pub(crate) fn from_slots(slots: impl IntoIterator<Item = (Key, Slot)>) -> Self {
        let mut collection = Collection::new();
        for (key, slot) in slots {
            match collection.index.get(&key) {
                Some(&pos) => collection.entries[pos].1 = slot,
                None => {
                    collection.index.insert(key.clone(), collection.entries.len());
                    collection.entries.push((key, slot));
                }
            }
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn position(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// The slot stored under `key`, shared.
    pub fn slot(&self, key: &Key) -> Option<Slot> {
        self.position(key).map(|pos| Rc::clone(&self.entries[pos].1))
    }

    pub(crate) fn slots(&self) -> &[(Key, Slot)] {
        &self.entries
    }

    /// A copy of the value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.position(key)
            .map(|pos| self.entries[pos].1.borrow().clone())
    }

    /// Overwrites the value under an existing key. Every collection sharing
    /// the slot sees the new value.
    pub fn set(&self, key: &Key, value: Value) -> Result<()> {
        let pos = self
            .position(key)
            .ok_or_else(|| Error::invalid("set", format!("no element with key {}", key)))?;
        *self.entries[pos].1.borrow_mut() = value;
        Ok(())
    }

    /// Inserts or overwrites. A new key is appended with a fresh slot.
    pub fn insert(&mut self, key: Key, value: Value) {
        match self.position(&key) {
            Some(pos) => *self.entries[pos].1.borrow_mut() = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, Rc::new(RefCell::new(value))));
            }
        }
    }

    /// Copies the current values out into a plain sequence.
    pub fn to_sequence(&self) -> Sequence {
        Sequence::from_entries(
            self.entries
                .iter()
                .map(|(key, slot)| (key.clone(), slot.borrow().clone())),
        )
    }

    /// Whether calling `name` yields a collection that can be chained.
    /// Unknown names are not chainable.
    pub fn chainable(name: &str) -> bool {
        dispatch::resolve(name).is_ok_and(|r: Resolution| r.chainable())
    }

    /// Calls a method by name.
    ///
    /// A non-destructive collection method returns a new, unlinked
    /// collection and leaves this one untouched. A destructive call mutates
    /// this collection in place and returns the side result.
    ///
    /// # Errors
    ///
    /// Whatever the dispatcher reports. A failed destructive call leaves the
    /// collection as it was.
    pub fn call(&mut self, name: &str, args: Args<'_>) -> Result<Chained> {
        let resolution = dispatch::resolve(name)?;
        let mut snapshot = self.to_sequence();
        match dispatch::call_resolved(&resolution, &mut snapshot, args)? {
            Outcome::Collection(seq) => Ok(Chained::Collection(Collection::from(seq))),
            Outcome::Value(value) => {
                if resolution.destructive {
                    self.write_back(snapshot);
                }
                Ok(Chained::Value(value))
            }
        }
    }

    /// Replaces the contents with `seq`, reusing the slot of every key that
    /// survives.
    fn write_back(&mut self, seq: Sequence) {
        let before = self.len();
        let mut reused = 0usize;
        let mut slots = Vec::with_capacity(seq.len());
        for (key, value) in seq.into_entries() {
            let slot = match self.slot(&key) {
                Some(slot) => {
                    reused += 1;
                    *slot.borrow_mut() = value;
                    slot
                }
                None => Rc::new(RefCell::new(value)),
            };
            slots.push((key, slot));
        }
        tracing::trace!(
            reused,
            created = slots.len() - reused,
            dropped = before - reused,
            "write back"
        );
        *self = Collection::from_slots(slots);
    }
}

impl From<Sequence> for Collection {
    fn from(seq: Sequence) -> Self {
        Collection::from_slots(
            seq.into_entries()
                .into_iter()
                .map(|(key, value)| (key, Rc::new(RefCell::new(value)))),
        )
    }
}

impl From<Collection> for Sequence {
    fn from(collection: Collection) -> Self {
        collection.to_sequence()
    }
}

impl PartialEq for Collection {
    /// Compares keys and current values, not slot identity.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((ka, a), (kb, b))| ka == kb && *a.borrow() == *b.borrow())
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection{:?}", self.to_sequence())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_sequence(), f)
    }
}

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;
