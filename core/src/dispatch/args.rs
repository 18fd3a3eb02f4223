//! Argument lists for dispatched calls.
//!
//! Positional values and callbacks travel separately: a method reads the
//! values it needs by position and takes callbacks by shape. Anything a
//! method does not consume is reported by [`Args::finish`], so a callback of
//! the wrong shape fails fast instead of being silently ignored.

use regex::Regex;

use crate::{
    callback::{Callback, ChunkFn, CompareFn, EachFn, IndexFn, IterFn, MemoFn, ThunkFn},
    error::{Error, Result},
    values::{Key, Sequence, Value},
};

#[derive(Debug, Default)]
pub struct Args<'f> {
    values: Vec<Value>,
    callbacks: Vec<Callback<'f>>,
}

macro_rules! take_callback {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> Option<Box<$ty<'f>>> {
            let pos = self
                .callbacks
                .iter()
                .position(|cb| matches!(cb, Callback::$variant(_)))?;
            match self.callbacks.remove(pos) {
                Callback::$variant(f) => Some(f),
                _ => None,
            }
        }
    };
}

impl<'f> Args<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional value.
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Attaches a callback.
    pub fn callback(mut self, callback: Callback<'f>) -> Self {
        self.callbacks.push(callback);
        self
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    // ===== Positional values =====

    fn present(&self, pos: usize) -> Option<&Value> {
        self.values.get(pos).filter(|v| !v.is_null())
    }

    /// Moves the value at `pos` out, leaving `null` behind.
    pub fn take_value(&mut self, pos: usize) -> Value {
        self.values
            .get_mut(pos)
            .map(core::mem::take)
            .unwrap_or_default()
    }

    pub fn has_value(&self, pos: usize) -> bool {
        pos < self.values.len()
    }

    /// Moves out a value that must be present (it may be `null`).
    pub fn value(&mut self, method: &str, pos: usize) -> Result<Value> {
        if !self.has_value(pos) {
            return Err(Error::invalid(method, format!("missing argument #{}", pos)));
        }
        Ok(self.take_value(pos))
    }

    pub fn int(&self, method: &str, pos: usize) -> Result<i64> {
        self.opt_int(method, pos)?
            .ok_or_else(|| Error::invalid(method, format!("missing integer argument #{}", pos)))
    }

    pub fn opt_int(&self, method: &str, pos: usize) -> Result<Option<i64>> {
        match self.present(pos) {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            Some(other) => Err(Error::invalid(
                method,
                format!("argument #{} must be an int, got {}", pos, other.type_name()),
            )),
        }
    }

    /// A non-negative count; negative values are rejected.
    pub fn opt_count(&self, method: &str, pos: usize) -> Result<Option<usize>> {
        match self.opt_int(method, pos)? {
            Some(n) if n < 0 => Err(Error::invalid(
                method,
                format!("argument #{} must not be negative, got {}", pos, n),
            )),
            n => Ok(n.map(|n| n as usize)),
        }
    }

    pub fn count(&self, method: &str, pos: usize) -> Result<usize> {
        self.opt_count(method, pos)?
            .ok_or_else(|| Error::invalid(method, format!("missing count argument #{}", pos)))
    }

    pub fn flag(&self, method: &str, pos: usize) -> Result<bool> {
        match self.present(pos) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(Error::invalid(
                method,
                format!("argument #{} must be a bool, got {}", pos, other.type_name()),
            )),
        }
    }

    pub fn key(&self, method: &str, pos: usize) -> Result<Key> {
        match self.values.get(pos) {
            Some(value) => Key::from_value(method, value),
            None => Err(Error::invalid(method, format!("missing key argument #{}", pos))),
        }
    }

    pub fn opt_key(&self, method: &str, pos: usize) -> Result<Option<Key>> {
        match self.present(pos) {
            Some(value) => Key::from_value(method, value).map(Some),
            None => Ok(None),
        }
    }

    pub fn seq(&mut self, method: &str, pos: usize) -> Result<Sequence> {
        match self.take_value(pos) {
            Value::Seq(s) => Ok(s),
            other => Err(Error::invalid(
                method,
                format!("argument #{} must be a sequence, got {}", pos, other.type_name()),
            )),
        }
    }

    /// Every value from `pos` onward, each of which must be a sequence.
    pub fn rest_seqs(&mut self, method: &str, pos: usize) -> Result<Vec<Sequence>> {
        (pos..self.values.len()).map(|i| self.seq(method, i)).collect()
    }

    /// Every value from `pos` onward, cast to keys.
    pub fn rest_keys(&self, method: &str, pos: usize) -> Result<Vec<Key>> {
        self.values
            .iter()
            .skip(pos)
            .map(|v| Key::from_value(method, v))
            .collect()
    }

    /// Compiles the string at `pos` as a regular expression.
    pub fn regex(&self, method: &str, pos: usize) -> Result<Regex> {
        match self.present(pos) {
            Some(Value::Str(pattern)) => Regex::new(pattern)
                .map_err(|e| Error::invalid(method, format!("invalid pattern: {}", e))),
            Some(other) => Err(Error::invalid(
                method,
                format!("pattern must be a string, got {}", other.type_name()),
            )),
            None => Err(Error::invalid(method, "missing pattern")),
        }
    }

    // ===== Callbacks =====

    take_callback!(
        /// Takes the first `(key, value)` callback.
        take_each, Each, EachFn
    );
    take_callback!(take_memo, Memo, MemoFn);
    take_callback!(take_iter, Iter, IterFn);
    take_callback!(take_chunk, Chunk, ChunkFn);
    take_callback!(take_compare, Compare, CompareFn);
    take_callback!(take_thunk, Thunk, ThunkFn);
    take_callback!(take_index, Index, IndexFn);

    pub fn require_each(&mut self, method: &str) -> Result<Box<EachFn<'f>>> {
        self.take_each()
            .ok_or_else(|| Error::invalid(method, "requires a (key, value) callback"))
    }

    pub fn require_memo(&mut self, method: &str) -> Result<Box<MemoFn<'f>>> {
        self.take_memo()
            .ok_or_else(|| Error::invalid(method, "requires a (key, value, memo) callback"))
    }

    pub fn require_iter(&mut self, method: &str) -> Result<Box<IterFn<'f>>> {
        self.take_iter()
            .ok_or_else(|| Error::invalid(method, "requires a (key, value, iteration) callback"))
    }

    /// Fails if a callback was supplied that the method never took.
    pub fn finish(&self, method: &str) -> Result<()> {
        match self.callbacks.first() {
            None => Ok(()),
            Some(cb) => Err(Error::invalid(
                method,
                format!("unexpected callback of shape {}", cb.shape()),
            )),
        }
    }
}
