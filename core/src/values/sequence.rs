use core::fmt;

use hashbrown::HashMap;

use crate::{
    error::{Error, Result},
    values::{Key, Value},
};

/// An ordered map from [`Key`] to [`Value`].
///
/// Insertion order is significant and survives overwrites: assigning to an
/// existing key replaces the value in place. Appending with [`Sequence::push`]
/// uses the next integer key, one past the largest integer key ever stored,
/// so removing the tail does not recycle keys.
///
/// Cloning is a deep copy; two sequences never share element storage.
#[derive(Clone, Default)]
pub struct Sequence {
    entries: Vec<(Key, Value)>,
    index: HashMap<Key, usize>,
    next_index: i64,
}

static_assertions::assert_impl_all!(Sequence: Clone, Default, PartialEq, fmt::Debug);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Sequence {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    /// Builds a list: values keyed `0..n`.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut seq = Sequence::new();
        for value in values {
            seq.append(value.into());
        }
        seq
    }

    /// Builds a sequence from `(key, value)` pairs. A repeated key overwrites
    /// the earlier value but keeps its original position.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Key, Value)>,
    {
        let mut seq = Sequence::new();
        for (key, value) in entries {
            seq.insert(key, value);
        }
        seq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The key the next [`Sequence::push`] will use.
    pub fn next_index(&self) -> i64 {
        self.next_index
    }

    // ===== Keyed access =====

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Position of `key` in iteration order.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Appends `value` under the next integer key and returns that key.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] once the next key is already occupied,
    /// which only happens after `i64::MAX` has been used as a key.
    pub fn push(&mut self, value: Value) -> Result<Key> {
        self.ensure_room("push", 1)?;
        let key = Key::Int(self.next_index);
        self.insert(key.clone(), value);
        Ok(key)
    }

    /// Checks that `count` more elements can be pushed without reusing a key.
    pub fn ensure_room(&self, method: &str, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        // Every integer key is below `next_index` unless it saturated at `i64::MAX`.
        let free = !self.index.contains_key(&Key::Int(self.next_index));
        let last = i64::try_from(count - 1)
            .ok()
            .and_then(|extra| self.next_index.checked_add(extra));
        match (free, last) {
            (true, Some(_)) => Ok(()),
            _ => Err(Error::invalid(
                method,
                "cannot add element: the next integer key is already occupied",
            )),
        }
    }

    /// Reserves room for `additional` more entries.
    pub fn try_reserve(&mut self, method: &str, additional: usize) -> Result<()> {
        self.entries
            .try_reserve(additional)
            .map_err(|_| Error::invalid(method, "argument too big"))?;
        self.index
            .try_reserve(additional)
            .map_err(|_| Error::invalid(method, "argument too big"))
    }

    /// Appends to a sequence built up from empty by appends and string-keyed
    /// inserts only, whose next key is therefore never taken.
    pub(crate) fn append(&mut self, value: Value) {
        debug_assert!(!self.index.contains_key(&Key::Int(self.next_index)));
        let key = Key::Int(self.next_index);
        self.insert(key, value);
    }

    /// Sets `key` to `value`, returning the previous value if the key existed.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        if let Some(&pos) = self.index.get(&key) {
            return Some(core::mem::replace(&mut self.entries[pos].1, value));
        }
        if let Key::Int(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Removes `key`, shifting later entries up by one position.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let pos = self.index.remove(key)?;
        let (_, value) = self.entries.remove(pos);
        self.reindex_from(pos);
        Some(value)
    }

    /// Keeps the entries for which `keep` returns true, in order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Key, &mut Value) -> bool) {
        self.entries.retain_mut(|(k, v)| keep(k, v));
        self.reindex_from(0);
    }

    fn reindex_from(&mut self, start: usize) {
        if start == 0 {
            self.index.clear();
        }
        for (pos, (key, _)) in self.entries.iter().enumerate().skip(start) {
            self.index.insert(key.clone(), pos);
        }
    }

    // ===== Positional access =====

    pub fn entry_at(&self, pos: usize) -> Option<(&Key, &Value)> {
        self.entries.get(pos).map(|(k, v)| (k, v))
    }

    pub fn entry_at_mut(&mut self, pos: usize) -> Option<(&Key, &mut Value)> {
        self.entries.get_mut(pos).map(|(k, v)| (&*k, v))
    }

    pub fn key_at(&self, pos: usize) -> Option<&Key> {
        self.entries.get(pos).map(|(k, _)| k)
    }

    pub fn value_at(&self, pos: usize) -> Option<&Value> {
        self.entries.get(pos).map(|(_, v)| v)
    }

    pub fn value_at_mut(&mut self, pos: usize) -> Option<&mut Value> {
        self.entries.get_mut(pos).map(|(_, v)| v)
    }

    /// Resolves a possibly negative position against the current length.
    ///
    /// `-1` is the last element. Returns `None` when the position falls
    /// outside the sequence.
    pub fn resolve_position(&self, pos: i64) -> Option<usize> {
        let len = self.len() as i64;
        let pos = if pos < 0 { len + pos } else { pos };
        (0..len).contains(&pos).then_some(pos as usize)
    }

    // ===== Iteration =====

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> + ExactSizeIterator {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = (&Key, &mut Value)> + ExactSizeIterator {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn into_values(self) -> impl DoubleEndedIterator<Item = Value> + ExactSizeIterator {
        self.entries.into_iter().map(|(_, v)| v)
    }

    pub fn into_entries(self) -> Vec<(Key, Value)> {
        self.entries
    }

    // ===== Renumbering =====

    /// Discards every key and renumbers the values `0..n`.
    pub fn into_list(self) -> Self {
        Sequence::from_values(self.into_values())
    }

    /// Renumbers integer keys `0..` while keeping string keys, the way an
    /// array merge does. A later string key overwrites an earlier one.
    pub fn renumbered(self) -> Self {
        Sequence::from_merged_entries(self.entries)
    }

    /// Builds a sequence with array-merge semantics: every integer-keyed
    /// entry is appended under a fresh key, string keys are assigned and
    /// overwrite earlier entries with the same key.
    pub fn from_merged_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Key, Value)>,
    {
        let mut seq = Sequence::new();
        for (key, value) in entries {
            match key {
                Key::Int(_) => seq.append(value),
                Key::Str(_) => {
                    seq.insert(key, value);
                }
            }
        }
        seq
    }

    /// Whether the keys are exactly `0..n` in order.
    pub fn is_list(&self) -> bool {
        self.keys()
            .enumerate()
            .all(|(i, k)| *k == Key::Int(i as i64))
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.is_list();
        write!(f, "[")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if !list {
                write!(f, "{} => ", key)?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

impl IntoIterator for Sequence {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Sequence::from_values(iter)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Sequence {
    fn from(values: Vec<V>) -> Self {
        Sequence::from_values(values)
    }
}
