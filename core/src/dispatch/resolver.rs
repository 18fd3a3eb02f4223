//! Name resolution and destructive / non-destructive dispatch.
//!
//! A call goes through three steps:
//!
//! 1. [`resolve`] strips the destructive marker, follows the alias table and
//!    checks the method table.
//! 2. A destructive call runs the method on the caller's sequence. A
//!    non-destructive call runs it on a deep copy.
//! 3. The result is shaped: destructive calls return the side result only;
//!    non-destructive calls return either the copy or the side result,
//!    depending on the method's `returns_collection` flag.

use crate::{
    dispatch::{Args, NativeMethod, alias, methods},
    error::{Error, Result},
    values::{Sequence, Value},
};

/// Suffix requesting the destructive form of a method, e.g. `"select!"`.
pub const DESTRUCTIVE_MARKER: char = '!';

/// What a requested name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The canonical method name.
    pub canonical: &'static str,
    /// Whether the call will mutate the caller's sequence.
    pub destructive: bool,
    /// Whether a non-destructive call yields a collection.
    pub returns_collection: bool,
    /// A destructive request was made through a query-only alias and was
    /// turned into a non-destructive one.
    pub downgraded: bool,
}

impl Resolution {
    /// Whether the call's result is a collection that can be chained.
    pub fn chainable(&self) -> bool {
        !self.destructive && self.returns_collection
    }
}

/// The result of a dispatched call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Collection(Sequence),
    Value(Value),
}

impl Outcome {
    pub fn into_collection(self) -> Option<Sequence> {
        match self {
            Outcome::Collection(s) => Some(s),
            Outcome::Value(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Collection(_) => None,
            Outcome::Value(v) => Some(v),
        }
    }
}

fn lookup(resolution: &Resolution) -> Result<&'static NativeMethod> {
    methods()
        .get(resolution.canonical)
        .ok_or_else(|| Error::unsupported(resolution.canonical))
}

/// Resolves a requested method name without calling anything.
pub fn resolve(name: &str) -> Result<Resolution> {
    let (base, destructive) = match name.strip_suffix(DESTRUCTIVE_MARKER) {
        Some(base) => (base, true),
        None => (name, false),
    };

    let (canonical, downgraded) = match alias::lookup(base) {
        Some(alias) => {
            let downgraded = destructive && alias.query_only;
            if downgraded {
                tracing::warn!(
                    alias = base,
                    target = alias.target,
                    "destructive form requested for a query-only alias; running non-destructively"
                );
            }
            (alias.target, downgraded)
        }
        None => (base, false),
    };

    let method = methods()
        .get(canonical)
        .ok_or_else(|| Error::unsupported(name))?;

    Ok(Resolution {
        canonical: method.name,
        destructive: destructive && !downgraded,
        returns_collection: method.returns_collection,
        downgraded,
    })
}

/// Calls `name` on `seq`.
///
/// A destructive name (`"select!"`) mutates `seq` and returns
/// `Outcome::Value` with the method's side result. A non-destructive name
/// leaves `seq` untouched.
///
/// # Errors
///
/// - [`Error::UnsupportedOperation`] when the name resolves to nothing
/// - Whatever the method itself reports for bad arguments
pub fn call(name: &str, seq: &mut Sequence, args: Args<'_>) -> Result<Outcome> {
    let resolution = resolve(name)?;
    call_resolved(&resolution, seq, args)
}

/// Like [`call`], for a name already passed through [`resolve`].
pub fn call_resolved(
    resolution: &Resolution,
    seq: &mut Sequence,
    mut args: Args<'_>,
) -> Result<Outcome> {
    let method = lookup(resolution)?;
    tracing::debug!(
        canonical = resolution.canonical,
        destructive = resolution.destructive,
        "dispatching"
    );

    if resolution.destructive {
        let side = (method.ptr)(seq, &mut args)?;
        return Ok(Outcome::Value(side));
    }
    run_on_copy(method, seq, args)
}

/// Calls the non-destructive form of `name` on a shared sequence.
///
/// Requesting a destructive form here is an error since there is nothing
/// the call could mutate; a downgraded query-only alias is fine.
pub fn apply(name: &str, seq: &Sequence, args: Args<'_>) -> Result<Outcome> {
    let resolution = resolve(name)?;
    if resolution.destructive {
        return Err(Error::invalid(
            resolution.canonical,
            "a destructive call needs a mutable sequence",
        ));
    }
    let method = lookup(&resolution)?;
    tracing::debug!(method = name, canonical = resolution.canonical, "applying");
    run_on_copy(method, seq, args)
}

fn run_on_copy(method: &NativeMethod, seq: &Sequence, mut args: Args<'_>) -> Result<Outcome> {
    let mut copy = seq.clone();
    let side = (method.ptr)(&mut copy, &mut args)?;
    if method.returns_collection {
        Ok(Outcome::Collection(copy))
    } else {
        Ok(Outcome::Value(side))
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;
