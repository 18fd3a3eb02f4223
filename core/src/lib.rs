//! Ruby-style `Enumerable` / `Array` operations over ordered key-value
//! sequences.
//!
//! The crate has two layers:
//!
//! - [`stdlib`]: the algorithms themselves. Every operation takes the
//!   sequence by `&mut` (its destructive form) and returns a side result.
//! - [`dispatch`]: calls by name. Resolves aliases, runs destructive
//!   (`"select!"`) or non-destructive (`"select"`) forms and shapes the result.
//!
//! ```
//! use enumerable_core::{seq, callback::Callback, dispatch::{self, Args, Outcome}};
//!
//! let mut numbers = seq![1, 2, 3, 4];
//! let evens = dispatch::call(
//!     "select",
//!     &mut numbers,
//!     Args::new().callback(Callback::each(|_, v| v.as_int().is_some_and(|n| n % 2 == 0))),
//! )
//! .unwrap();
//!
//! assert_eq!(evens, Outcome::Collection(enumerable_core::seq!{1 => 2, 3 => 4}));
//! assert_eq!(numbers.len(), 4);
//! ```

#[macro_use]
mod macros;

pub mod callback;
pub mod dispatch;
pub mod error;
pub mod stdlib;
pub mod values;

pub use callback::{Callback, Control};
pub use dispatch::{Args, Outcome, Resolution};
pub use error::{Error, Result};
pub use values::{Key, Sequence, Value};
