//! Method resolution and dispatch.
//!
//! Calls are made by name. The resolver maps aliases onto canonical methods,
//! decides between the destructive and non-destructive forms, and shapes
//! the result. Both tables are exposed read-only so that wrappers can decide
//! chainability without duplicating the logic.

pub mod alias;
pub mod args;
pub mod resolver;
pub mod table;

pub use alias::{Alias, aliases};
pub use args::Args;
pub use resolver::{DESTRUCTIVE_MARKER, Outcome, Resolution, apply, call, call_resolved, resolve};
pub use table::{Invoke, MethodTable, NativeMethod, methods};
