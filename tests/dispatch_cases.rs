//! Table-driven dispatch tests, one module per case.

#[macro_use]
mod cases;

use enumerable::{Args, Callback, Control, Error, Key, Value, null, seq};

fn is_even(_: &Key, v: &mut Value) -> Control {
    v.as_int().is_some_and(|n| n % 2 == 0).into()
}

fn parity(_: &Key, v: &mut Value) -> Control {
    match v.as_int() {
        Some(n) if n % 2 == 0 => "even".into(),
        Some(_) => "odd".into(),
        None => Control::Continue,
    }
}

test_case! {
    name: select_keeps_keys,
    input: seq![1, 2, 3, 4],
    method: "select",
    args: Args::new().callback(Callback::each(is_even)),
    collection: { seq!{1 => 2, 3 => 4} },
    mutated: { seq!{1 => 2, 3 => 4} },
}

test_case! {
    name: filter_alias,
    input: seq![1, 2, 3, 4],
    method: "filter",
    args: Args::new().callback(Callback::each(is_even)),
    collection: { seq!{1 => 2, 3 => 4} },
}

test_case! {
    name: reject_keeps_keys,
    input: seq!{"a" => 1, "b" => 2},
    method: "reject",
    args: Args::new().callback(Callback::each(is_even)),
    collection: { seq!{"a" => 1} },
}

test_case! {
    name: compact_top_level,
    input: seq![1, null!(), seq![null!()], 2],
    method: "compact",
    args: Args::new(),
    collection: { seq!{0 => 1, 2 => seq![null!()], 3 => 2} },
}

test_case! {
    name: compact_recursive,
    input: seq![1, null!(), seq![null!(), 3]],
    method: "compact",
    args: Args::new().with(true),
    collection: { seq![1, seq![3]] },
}

test_case! {
    name: grep_by_pattern,
    input: seq!["apple", "banana", "avocado", 7],
    method: "grep",
    args: Args::new().with("^a"),
    collection: { seq!{0 => "apple", 2 => "avocado"} },
}

test_case! {
    name: grep_bad_pattern,
    input: seq!["a"],
    method: "grep",
    args: Args::new().with("("),
    result: { Err(Error::InvalidArgument { .. }) },
}

test_case! {
    name: uniq_keeps_first,
    input: seq![1, 2, 1, 3, 2],
    method: "uniq",
    args: Args::new(),
    collection: { seq!{0 => 1, 1 => 2, 3 => 3} },
}

test_case! {
    name: size_alias,
    input: seq![1, 2, 3],
    method: "size",
    args: Args::new(),
    value: { Value::Int(3) },
}

test_case! {
    name: all_of_empty,
    input: seq![],
    method: "all",
    args: Args::new(),
    value: { Value::Bool(true) },
}

test_case! {
    name: one_even,
    input: seq![1, 2, 3],
    method: "one",
    args: Args::new().callback(Callback::each(is_even)),
    value: { Value::Bool(true) },
}

test_case! {
    name: inject_with_memo,
    input: seq![1, 2, 3],
    method: "reduce",
    args: Args::new().with(10).callback(Callback::memo(|_, v: &mut Value, memo: &mut Value| {
        *memo = Value::Int(memo.as_int().unwrap_or(0) + v.as_int().unwrap_or(0));
    })),
    value: { Value::Int(16) },
}

test_case! {
    name: group_by_parity,
    input: seq![1, 2, 3, 4],
    method: "group_by",
    args: Args::new().callback(Callback::each(parity)),
    collection: { seq!{"even" => seq![2, 4], "odd" => seq![1, 3]} },
}

test_case! {
    name: partition_evens,
    input: seq![1, 2, 3, 4],
    method: "partition",
    args: Args::new().callback(Callback::each(is_even)),
    collection: { seq![seq![2, 4], seq![1, 3]] },
}

test_case! {
    name: rotate_left,
    input: seq!["a", "b", "c"],
    method: "rotate",
    args: Args::new(),
    collection: { seq!["b", "c", "a"] },
}

test_case! {
    name: each_slice_pairs,
    input: seq![1, 2, 3, 4, 5],
    method: "each_slice",
    args: Args::new().with(2),
    collection: { seq![seq![1, 2], seq![3, 4], seq![5]] },
}

test_case! {
    name: each_slice_zero,
    input: seq![1],
    method: "each_slice",
    args: Args::new().with(0),
    result: { Err(Error::InvalidArgument { .. }) },
}

test_case! {
    name: first_alias_is_query_only,
    input: seq![1, 2, 3],
    method: "first",
    args: Args::new().with(2),
    collection: { seq![1, 2] },
    mutated: { seq![1, 2, 3] },
}

test_case! {
    name: fetch_with_default,
    input: seq![1, 2],
    method: "fetch",
    args: Args::new().with(5).with("none"),
    value: { Value::from("none") },
}

test_case! {
    name: fetch_negative,
    input: seq![1, 2],
    method: "fetch",
    args: Args::new().with(-1),
    value: { Value::Int(2) },
}

test_case! {
    name: fetch_out_of_bounds,
    input: seq![1, 2],
    method: "fetch",
    args: Args::new().with(-3),
    result: { Err(Error::OutOfBounds { index: -3, len: 2 }) },
}

test_case! {
    name: values_at_absent_keys,
    input: seq!{"a" => 1, "b" => 2},
    method: "values_at",
    args: Args::new().with("b").with("x"),
    collection: { seq!{"b" => 2, "x" => null!()} },
}

test_case! {
    name: min_natural_order,
    input: seq![3, 1, 2],
    method: "min",
    args: Args::new(),
    value: { Value::Int(1) },
}

test_case! {
    name: unexpected_callback,
    input: seq![3, 1, 2],
    method: "reverse",
    args: Args::new().callback(Callback::each(is_even)),
    result: { Err(Error::InvalidArgument { .. }) },
}

test_case! {
    name: merge_concat_alias,
    input: seq!["a"],
    method: "concat",
    args: Args::new().with(seq!["b"]).with(seq!["c"]),
    collection: { seq!["a", "b", "c"] },
}

test_case! {
    name: pluck_alias,
    input: seq![seq!{"n" => 1}, seq!{"n" => 2}],
    method: "pluck",
    args: Args::new().with("n"),
    collection: { seq![1, 2] },
}

test_case! {
    name: delete_returns_removed,
    input: seq![1, 2, 1],
    method: "delete",
    args: Args::new().with(1),
    value: { Value::Int(1) },
    mutated: { seq!{1 => 2} },
}

test_case! {
    name: unknown_method,
    input: seq![],
    method: "frobnicate",
    args: Args::new(),
    result: { Err(Error::UnsupportedOperation { .. }) },
}
