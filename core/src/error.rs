//! Error types surfaced by the algorithm library and the dispatcher.
//!
//! Only genuine failures live here. Control signals raised from callbacks
//! (`Control::Break` / `Control::Continue`) are absorbed by the operation that
//! receives them, and a destructive request for a query-only alias is
//! downgraded with a warning rather than reported as an error.

use thiserror::Error;

/// Public error type for all enumerable operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested name is neither an alias nor a known method.
    #[error("unsupported operation `{name}`")]
    UnsupportedOperation { name: String },

    /// `fetch`-style access past either end of the sequence with no fallback.
    #[error("index {index} is out of bounds for a sequence of length {len}")]
    OutOfBounds { index: i64, len: usize },

    /// A method received an argument it cannot work with.
    #[error("invalid argument for `{method}`: {reason}")]
    InvalidArgument { method: String, reason: String },
}

impl Error {
    pub fn unsupported(name: impl Into<String>) -> Self {
        Error::UnsupportedOperation { name: name.into() }
    }

    pub fn invalid(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            method: method.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
