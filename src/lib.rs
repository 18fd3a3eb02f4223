//! enumerable - Ruby-style `Enumerable` operations over ordered key-value
//! sequences
//!
//! # Overview
//!
//! The algorithms and the name-based dispatcher live in `enumerable_core`.
//! This crate adds [`Collection`], an owning wrapper that makes calls
//! chainable and can hand out linked sub-ranges whose elements stay shared
//! with the collection they came from.
//!
//! # Quick Start
//!
//! ```
//! use enumerable::{Args, Callback, Chained, Collection, Value, seq};
//!
//! let mut numbers = Collection::from(seq![3, 1, 2]);
//!
//! // Non-destructive calls return a new collection, ready for the next call
//! let sorted = numbers.call("sort", Args::new()).unwrap();
//! let doubled = sorted
//!     .into_collection()
//!     .unwrap()
//!     .call(
//!         "map",
//!         Args::new().callback(Callback::each(|_, v| Value::Int(v.as_int().unwrap_or(0) * 2))),
//!     )
//!     .unwrap();
//! assert_eq!(doubled.into_collection().unwrap().to_sequence(), seq![2, 4, 6]);
//!
//! // Destructive calls mutate in place and return the side result
//! assert_eq!(numbers.call("reverse!", Args::new()).unwrap(), Chained::Value(Value::Null));
//! assert_eq!(numbers.to_sequence(), seq![2, 1, 3]);
//! ```
//!
//! # Linked ranges
//!
//! ```
//! use enumerable::{Collection, Key, Value, seq};
//!
//! let source = Collection::from(seq!{"a" => 1, "b" => 2, "c" => 3});
//! let middle = source.get_range(&Key::from("b"), &Key::from("c")).unwrap();
//!
//! middle.set(&Key::from("b"), Value::Int(20)).unwrap();
//! assert_eq!(source.get(&Key::from("b")), Some(Value::Int(20)));
//! ```

pub mod collection;
pub mod linked;

pub use collection::{Chained, Collection, Slot};

// Re-export the core API
pub use enumerable_core::{
    Args, Callback, Control, Error, Key, Outcome, Resolution, Result, Sequence, Value, callback,
    dispatch, null, seq, stdlib, values,
};
