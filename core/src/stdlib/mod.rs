//! The algorithm library.
//!
//! Operations are grouped by family:
//! - `predicate`: all, any, none, one, count
//! - `filter`: select, reject, compact, grep, uniq, delete, delete_at
//! - `iterate`: collect, each, reverse_collect, collect_concat, inject, cycle,
//!   each_slice, each_cons, slice_before
//! - `search`: detect, find_index, rindex, member, has_value, assoc, rassoc,
//!   at, fetch, values_at, min, max
//! - `order`: sort, sort_by, reverse, rotate, group_by, partition
//! - `random`: shuffle, random
//! - `positional`: take, last, drop, take_while, drop_while, slice, fill
//! - `structure`: flatten, merge, zip, array_column, combination
//!
//! Every operation is the destructive form: it takes the sequence by `&mut`,
//! rewrites it in place and returns its side result. Pure lookups take
//! `&Sequence`. Each module also registers its operations in the dispatch
//! [`MethodTable`].

use crate::dispatch::MethodTable;

pub mod filter;
pub mod iterate;
pub mod order;
pub mod positional;
pub mod predicate;
pub mod random;
pub mod search;
pub mod structure;

pub use filter::{compact, delete, delete_at, grep, reject, select, uniq};
pub use iterate::{
    collect, collect_concat, cycle, each, each_cons, each_slice, inject, reverse_collect,
    slice_before,
};
pub use order::{group_by, partition, reverse, rotate, sort, sort_by};
pub use positional::{Filler, drop, drop_while, fill, last, slice, take, take_while};
pub use predicate::{all, any, count, none, one};
pub use random::{random, shuffle};
pub use search::{
    Fallback, Needle, assoc, at, detect, fetch, find_index, has_value, max, member, min, rassoc,
    rindex, values_at,
};
pub use structure::{array_column, combination, flatten, merge, zip};

/// Registers every operation of the library.
///
/// # Panics
///
/// Debug builds panic on a duplicate method name, which indicates a bug in
/// the registration code.
pub fn register_stdlib(table: &mut MethodTable) {
    predicate::register_predicate_methods(table);
    filter::register_filter_methods(table);
    iterate::register_iterate_methods(table);
    search::register_search_methods(table);
    order::register_order_methods(table);
    random::register_random_methods(table);
    positional::register_positional_methods(table);
    structure::register_structure_methods(table);
}
