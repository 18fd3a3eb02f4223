//! The alias table: alternate method name → canonical method name.

use hashbrown::HashMap;
use lazy_static::lazy_static;

/// An alternate name for a canonical method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub target: &'static str,
    /// Query-only aliases read the sequence and never mutate it: a
    /// destructive request through one is downgraded to a non-destructive
    /// call, with a warning.
    pub query_only: bool,
}

const fn alias(target: &'static str) -> Alias {
    Alias {
        target,
        query_only: false,
    }
}

const fn query(target: &'static str) -> Alias {
    Alias {
        target,
        query_only: true,
    }
}

const ALIASES: &[(&str, Alias)] = &[
    ("concat", alias("merge")),
    ("delete_if", alias("reject")),
    ("filter", alias("select")),
    ("find", query("detect")),
    ("find_all", alias("select")),
    ("first", query("take")),
    ("flat_map", alias("collect_concat")),
    ("include", query("member")),
    ("index", query("find_index")),
    ("keep_if", alias("select")),
    ("length", query("count")),
    ("map", alias("collect")),
    ("pluck", alias("array_column")),
    ("reduce", alias("inject")),
    ("reverse_map", alias("reverse_collect")),
    ("sample", query("random")),
    ("size", query("count")),
];

lazy_static! {
    static ref ALIAS_TABLE: HashMap<&'static str, Alias> = ALIASES.iter().copied().collect();
}

/// The process-wide alias table.
pub fn aliases() -> &'static HashMap<&'static str, Alias> {
    &ALIAS_TABLE
}

pub fn lookup(name: &str) -> Option<Alias> {
    ALIAS_TABLE.get(name).copied()
}
