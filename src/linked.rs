//! Linked sub-range extraction.
//!
//! The collections returned here hold the same [`Slot`](crate::Slot)s as their source.
//! Writing through either side with [`Collection::set`], or a destructive
//! call that keeps a key, is visible on the other side. Structural changes
//! are not: a key added to or removed from one collection does not appear
//! in or vanish from the other.

use std::rc::Rc;

use enumerable_core::{Error, Key, Result};

use crate::collection::Collection;

impl Collection {
    /// The contiguous run of elements from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if either key is absent or `end` comes
    /// before `start`.
    pub fn get_range(&self, start: &Key, end: &Key) -> Result<Collection> {
        let from = self.require_position("get_range", start)?;
        let to = self.require_position("get_range", end)?;
        if to < from {
            return Err(Error::invalid(
                "get_range",
                format!("end key {} comes before start key {}", end, start),
            ));
        }
        Ok(self.share(from, to + 1))
    }

    /// Up to `length` elements starting at `start`. The run stops early at
    /// the end of the collection.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `start` is absent.
    pub fn get_set(&self, start: &Key, length: usize) -> Result<Collection> {
        let from = self.require_position("get_set", start)?;
        let to = from.saturating_add(length).min(self.len());
        Ok(self.share(from, to))
    }

    fn require_position(&self, method: &str, key: &Key) -> Result<usize> {
        self.position(key)
            .ok_or_else(|| Error::invalid(method, format!("no element with key {}", key)))
    }

    fn share(&self, from: usize, to: usize) -> Collection {
        tracing::trace!(from, to, "sharing slots");
        Collection::from_slots(
            self.slots()[from..to]
                .iter()
                .map(|(key, slot)| (key.clone(), Rc::clone(slot))),
        )
    }

    /// Whether `self` and `other` share the slot under `key`.
    pub fn is_linked(&self, other: &Collection, key: &Key) -> bool {
        match (self.slot(key), other.slot(key)) {
            (Some(a), Some(b)) => Rc::ptr_eq(&a, &b),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "linked_test.rs"]
mod linked_test;
