//! Callbacks and the in-band control signal.
//!
//! A callback never unwinds to stop an iteration. Instead it returns a
//! [`Control`]: either a yielded value, or a request to skip (`Continue`) or
//! stop (`Break`). The iterating operation interprets the signal and it never
//! travels further than that operation's own call frame.
//!
//! Elements are handed to callbacks as `&mut Value`, so in-place edits made by
//! a callback are observed by the algorithm (and by the caller, for a
//! destructive call). `collect` additionally assigns the yielded value back.

use core::cmp::Ordering;

use crate::values::{Key, Sequence, Value};

/// What a callback asks of the iteration that invoked it.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Normal completion with a result value.
    Yield(Value),
    /// Skip the rest of the work for the current element.
    Continue,
    /// Stop iterating; elements not yet visited are left alone.
    Break,
}

impl Control {
    /// Whether this is a yielded, Ruby-truthy value.
    pub fn is_truthy(&self) -> bool {
        matches!(self, Control::Yield(v) if v.is_truthy())
    }
}

impl From<Value> for Control {
    fn from(value: Value) -> Self {
        Control::Yield(value)
    }
}

impl From<()> for Control {
    fn from(_: ()) -> Self {
        Control::Yield(Value::Null)
    }
}

impl From<bool> for Control {
    fn from(b: bool) -> Self {
        Control::Yield(Value::Bool(b))
    }
}

impl From<i64> for Control {
    fn from(i: i64) -> Self {
        Control::Yield(Value::Int(i))
    }
}

impl From<i32> for Control {
    fn from(i: i32) -> Self {
        Control::Yield(Value::Int(i as i64))
    }
}

impl From<&str> for Control {
    fn from(s: &str) -> Self {
        Control::Yield(Value::from(s))
    }
}

impl From<String> for Control {
    fn from(s: String) -> Self {
        Control::Yield(Value::Str(s))
    }
}

impl From<Sequence> for Control {
    fn from(s: Sequence) -> Self {
        Control::Yield(Value::Seq(s))
    }
}

// ============================================================================
// Callback shapes
// ============================================================================

/// `(key, value)`: the common shape.
pub type EachFn<'f> = dyn FnMut(&Key, &mut Value) -> Control + 'f;
/// `(key, value, memo)`: `inject`.
pub type MemoFn<'f> = dyn FnMut(&Key, &mut Value, &mut Value) -> Control + 'f;
/// `(key, value, iteration)`: `each_cons` (window index) and `cycle` (pass number).
pub type IterFn<'f> = dyn FnMut(&Key, &mut Value, usize) -> Control + 'f;
/// `(chunk)`: `each_slice`.
pub type ChunkFn<'f> = dyn FnMut(&mut Sequence) -> Control + 'f;
/// `(a, b)`: comparators for `sort`, `min` and `max`.
pub type CompareFn<'f> = dyn FnMut(&Value, &Value) -> Ordering + 'f;
/// `()`: not-found fallbacks.
pub type ThunkFn<'f> = dyn FnMut() -> Value + 'f;
/// `(position, old value)`: `fill` and `fetch` defaults.
pub type IndexFn<'f> = dyn FnMut(i64, &Value) -> Value + 'f;

/// A boxed callback of any supported shape, as passed through the dispatcher.
pub enum Callback<'f> {
    Each(Box<EachFn<'f>>),
    Memo(Box<MemoFn<'f>>),
    Iter(Box<IterFn<'f>>),
    Chunk(Box<ChunkFn<'f>>),
    Compare(Box<CompareFn<'f>>),
    Thunk(Box<ThunkFn<'f>>),
    Index(Box<IndexFn<'f>>),
}

impl<'f> Callback<'f> {
    pub fn each<F, R>(mut f: F) -> Self
    where
        F: FnMut(&Key, &mut Value) -> R + 'f,
        R: Into<Control>,
    {
        Callback::Each(Box::new(move |k: &Key, v: &mut Value| -> Control { f(k, v).into() }))
    }

    pub fn memo<F, R>(mut f: F) -> Self
    where
        F: FnMut(&Key, &mut Value, &mut Value) -> R + 'f,
        R: Into<Control>,
    {
        Callback::Memo(Box::new(
            move |k: &Key, v: &mut Value, memo: &mut Value| -> Control { f(k, v, memo).into() },
        ))
    }

    pub fn iter<F, R>(mut f: F) -> Self
    where
        F: FnMut(&Key, &mut Value, usize) -> R + 'f,
        R: Into<Control>,
    {
        Callback::Iter(Box::new(move |k: &Key, v: &mut Value, i: usize| -> Control {
            f(k, v, i).into()
        }))
    }

    pub fn chunk<F, R>(mut f: F) -> Self
    where
        F: FnMut(&mut Sequence) -> R + 'f,
        R: Into<Control>,
    {
        Callback::Chunk(Box::new(move |chunk: &mut Sequence| -> Control {
            f(chunk).into()
        }))
    }

    pub fn compare<F>(f: F) -> Self
    where
        F: FnMut(&Value, &Value) -> Ordering + 'f,
    {
        Callback::Compare(Box::new(f))
    }

    pub fn thunk<F, R>(mut f: F) -> Self
    where
        F: FnMut() -> R + 'f,
        R: Into<Value>,
    {
        Callback::Thunk(Box::new(move || -> Value { f().into() }))
    }

    pub fn index<F, R>(mut f: F) -> Self
    where
        F: FnMut(i64, &Value) -> R + 'f,
        R: Into<Value>,
    {
        Callback::Index(Box::new(move |i: i64, old: &Value| -> Value { f(i, old).into() }))
    }

    /// Human-readable shape, used in argument errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Callback::Each(_) => "(key, value)",
            Callback::Memo(_) => "(key, value, memo)",
            Callback::Iter(_) => "(key, value, iteration)",
            Callback::Chunk(_) => "(chunk)",
            Callback::Compare(_) => "(a, b)",
            Callback::Thunk(_) => "()",
            Callback::Index(_) => "(position, old)",
        }
    }
}

impl core::fmt::Debug for Callback<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Callback{}", self.shape())
    }
}
