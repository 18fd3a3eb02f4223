//! The method table: canonical name → native implementation.
//!
//! Each `stdlib` module registers its methods here, the same way every
//! package contributes its functions to the global environment. The table is
//! built once on first use and never mutated afterwards.

use hashbrown::HashMap;
use lazy_static::lazy_static;

use crate::{
    dispatch::Args,
    error::Result,
    stdlib,
    values::{Sequence, Value},
};

/// Destructive entry point of a method: mutates the sequence in place and
/// returns the method's side result.
pub type Invoke = fn(&mut Sequence, &mut Args<'_>) -> Result<Value>;

/// A native method registered in the table.
#[derive(Clone, Copy)]
pub struct NativeMethod {
    pub name: &'static str,
    /// Whether a non-destructive call returns the (possibly mutated) copy of
    /// the sequence rather than the method's own result.
    pub returns_collection: bool,
    pub ptr: Invoke,
}

impl NativeMethod {
    pub fn register(self, table: &mut MethodTable) {
        let previous = table.methods.insert(self.name, self);
        debug_assert!(previous.is_none(), "duplicate method `{}`", self.name);
    }
}

impl core::fmt::Debug for NativeMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NativeMethod")
            .field("name", &self.name)
            .field("returns_collection", &self.returns_collection)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct MethodTable {
    methods: HashMap<&'static str, NativeMethod>,
}

impl MethodTable {
    pub fn get(&self, name: &str) -> Option<&NativeMethod> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Canonical names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

lazy_static! {
    static ref METHODS: MethodTable = {
        let mut table = MethodTable::default();
        stdlib::register_stdlib(&mut table);
        table
    };
}

/// The process-wide method table.
pub fn methods() -> &'static MethodTable {
    &METHODS
}
