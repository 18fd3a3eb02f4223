//! Tests for name resolution and destructive / non-destructive dispatch

use pretty_assertions::assert_eq;

use super::*;
use crate::{
    callback::{Callback, Control},
    dispatch::aliases,
    test_utils::init_test_logging,
    values::Key,
};

fn is_odd(_: &Key, v: &mut Value) -> Control {
    v.as_int().is_some_and(|n| n % 2 == 1).into()
}

fn fixture() -> Sequence {
    seq! {
        "a" => 3,
        "b" => null!(),
        0 => 1,
        1 => seq![2, null!(), 3],
        "c" => "x1",
        5 => 3,
    }
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_canonical_and_alias() {
    let r = resolve("collect").unwrap();
    assert_eq!(r.canonical, "collect");
    assert!(!r.destructive);
    assert!(r.returns_collection);
    assert!(r.chainable());

    let r = resolve("map").unwrap();
    assert_eq!(r.canonical, "collect");

    let r = resolve("map!").unwrap();
    assert_eq!(r.canonical, "collect");
    assert!(r.destructive);
    assert!(!r.chainable());

    let r = resolve("count").unwrap();
    assert!(!r.returns_collection);
    assert!(!r.chainable());
}

#[test]
fn test_query_only_alias_is_downgraded() {
    init_test_logging();

    let r = resolve("find!").unwrap();
    assert_eq!(r.canonical, "detect");
    assert!(!r.destructive);
    assert!(r.downgraded);

    // The canonical name itself is not downgraded
    let r = resolve("detect!").unwrap();
    assert!(r.destructive);
    assert!(!r.downgraded);
}

#[test]
fn test_unknown_names() {
    assert_eq!(resolve("frobnicate"), Err(Error::unsupported("frobnicate")));
    assert_eq!(resolve("frobnicate!"), Err(Error::unsupported("frobnicate!")));
    assert_eq!(resolve("!"), Err(Error::unsupported("!")));
    // Only one marker is stripped
    assert_eq!(resolve("select!!"), Err(Error::unsupported("select!!")));
}

#[test]
fn test_alias_table_is_consistent() {
    for (name, alias) in aliases() {
        assert!(methods().contains(alias.target), "{} -> {}", name, alias.target);
        assert!(!methods().contains(name), "alias {} shadows a method", name);
    }
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn test_non_destructive_call_leaves_source_untouched() {
    let mut s = fixture();
    let result = call("select", &mut s, Args::new().callback(Callback::each(is_odd))).unwrap();
    assert_eq!(
        result,
        Outcome::Collection(seq! {"a" => 3, 0 => 1, 5 => 3})
    );
    assert_eq!(s, fixture());
}

#[test]
fn test_callback_edits_do_not_leak_through_copies() {
    let mut s = seq![seq![1, 2]];
    call(
        "each",
        &mut s,
        Args::new().callback(Callback::each(|_, v: &mut Value| {
            if let Some(inner) = v.as_seq_mut() {
                inner.push(Value::Int(99)).unwrap();
            }
        })),
    )
    .unwrap();
    assert_eq!(s, seq![seq![1, 2]]);
}

#[test]
fn test_destructive_call_returns_side_result_only() {
    let mut s = seq![1, seq![2, seq![3]]];
    let result = call("flatten!", &mut s, Args::new()).unwrap();
    assert_eq!(result, Outcome::Value(Value::Bool(true)));
    assert_eq!(s, seq![1, 2, 3]);

    let result = call("flatten!", &mut s, Args::new()).unwrap();
    assert_eq!(result, Outcome::Value(Value::Bool(false)));
}

#[test]
fn test_downgraded_call_does_not_mutate() {
    let mut s = seq![1, 2, 3];
    let result = call("first!", &mut s, Args::new().with(2)).unwrap();
    assert_eq!(result, Outcome::Collection(seq![1, 2]));
    assert_eq!(s, seq![1, 2, 3]);
}

#[test]
fn test_call_resolved_follows_the_resolution() {
    let mut s = seq![1, 2, 3];
    let resolution = resolve("first!").unwrap();
    let result = call_resolved(&resolution, &mut s, Args::new().with(2)).unwrap();
    assert_eq!(result, Outcome::Collection(seq![1, 2]));
    assert_eq!(s, seq![1, 2, 3]);

    let resolution = resolve("take!").unwrap();
    let result = call_resolved(&resolution, &mut s, Args::new().with(2)).unwrap();
    assert!(result.into_value().is_some());
    assert_eq!(s, seq![1, 2]);
}

#[test]
fn test_scalar_results() {
    let mut s = fixture();
    assert_eq!(
        call("size", &mut s, Args::new()).unwrap(),
        Outcome::Value(Value::Int(6))
    );
    assert_eq!(
        call("include", &mut s, Args::new().with("3")).unwrap(),
        Outcome::Value(Value::Bool(true))
    );
    assert_eq!(
        call("index", &mut s, Args::new().with(3)).unwrap(),
        Outcome::Value(Value::from("a"))
    );
    assert_eq!(
        call("rindex", &mut s, Args::new().with(3)).unwrap(),
        Outcome::Value(Value::Int(5))
    );

    let sum = Callback::memo(|_, v: &mut Value, memo: &mut Value| {
        *memo = Value::Int(memo.as_int().unwrap_or(0) + v.as_int().unwrap_or(0));
    });
    assert_eq!(
        call("reduce", &mut seq![1, 2, 3], Args::new().callback(sum)).unwrap(),
        Outcome::Value(Value::Int(6))
    );
}

#[test]
fn test_apply_rejects_destructive_names() {
    let s = fixture();
    assert!(matches!(
        apply("compact!", &s, Args::new()),
        Err(Error::InvalidArgument { .. })
    ));
    assert_eq!(
        apply("compact", &s, Args::new()).unwrap(),
        Outcome::Collection(seq! {"a" => 3, 0 => 1, 1 => seq![2, null!(), 3], "c" => "x1", 5 => 3})
    );
    // A downgraded alias is fine
    assert!(apply("length!", &s, Args::new()).is_ok());
}

#[test]
fn test_argument_errors() {
    let mut s = fixture();
    // Missing callback
    assert!(matches!(
        call("select", &mut s, Args::new()),
        Err(Error::InvalidArgument { .. })
    ));
    // Callback of the wrong shape
    assert!(matches!(
        call("sort", &mut s, Args::new().callback(Callback::thunk(|| 1))),
        Err(Error::InvalidArgument { .. })
    ));
    // Out of bounds without a fallback
    assert_eq!(
        call("fetch", &mut s, Args::new().with(10)),
        Err(Error::OutOfBounds { index: 10, len: 6 })
    );
    assert_eq!(s, fixture());
}

#[test]
fn test_break_never_escapes() {
    let mut s = seq![1, 2, 3];
    let result = call(
        "map!",
        &mut s,
        Args::new().callback(Callback::each(|_, v: &mut Value| {
            if *v == Value::Int(2) {
                Control::Break
            } else {
                Control::Yield(Value::Int(0))
            }
        })),
    );
    assert_eq!(result, Ok(Outcome::Value(Value::Null)));
    assert_eq!(s, seq![0, 2, 3]);
}

// ============================================================================
// Destructive and non-destructive forms agree
// ============================================================================

type ArgsFn = fn() -> Args<'static>;

fn collection_cases() -> Vec<(&'static str, ArgsFn)> {
    vec![
        ("select", || Args::new().callback(Callback::each(is_odd))),
        ("reject", || Args::new().callback(Callback::each(is_odd))),
        ("compact", || Args::new().with(true)),
        ("grep", || Args::new().with("^x")),
        ("uniq", Args::new),
        ("collect", || Args::new().callback(Callback::each(|k: &Key, _: &mut Value| k.to_value()))),
        ("each", || Args::new().callback(Callback::each(|_, _: &mut Value| Control::Continue))),
        ("reverse_collect", || Args::new().callback(Callback::each(|_, v: &mut Value| v.clone()))),
        ("collect_concat", || {
            Args::new().callback(Callback::each(|_, v: &mut Value| v.clone()))
        }),
        ("cycle", || {
            Args::new()
                .with(2)
                .callback(Callback::iter(|_, _: &mut Value, _| Control::Continue))
        }),
        ("each_slice", || Args::new().with(4)),
        ("each_cons", || Args::new().with(2)),
        ("slice_before", || Args::new().with("^x")),
        ("values_at", || Args::new().with("c").with(0).with(42)),
        ("sort", || Args::new().with(true)),
        ("sort_by", || Args::new().callback(Callback::each(|k: &Key, _: &mut Value| k.to_value()))),
        ("reverse", Args::new),
        ("rotate", || Args::new().with(-2)),
        ("group_by", || {
            Args::new().callback(Callback::each(|_, v: &mut Value| v.type_name()))
        }),
        ("partition", || Args::new().callback(Callback::each(is_odd))),
        ("take", || Args::new().with(3)),
        ("last", || Args::new().with(3)),
        ("drop", || Args::new().with(3)),
        ("take_while", || Args::new().callback(Callback::each(is_odd))),
        ("drop_while", || Args::new().callback(Callback::each(is_odd))),
        ("slice", || Args::new().with(1).with(2)),
        ("fill", || Args::new().with("z").with(-2)),
        ("flatten", Args::new),
        ("merge", || Args::new().with(seq!["m"])),
        ("zip", || Args::new().with(seq![1, 2])),
        ("array_column", || Args::new().with(0)),
        ("combination", || Args::new().with(2)),
    ]
}

#[test]
fn test_destructive_matches_non_destructive() {
    for (name, args) in collection_cases() {
        let mut source = fixture();
        let expected = call(name, &mut source, args())
            .unwrap()
            .into_collection()
            .unwrap_or_else(|| panic!("{} should return a collection", name));
        assert_eq!(source, fixture(), "{} mutated its source", name);

        let destructive = format!("{}{}", name, DESTRUCTIVE_MARKER);
        let mut target = fixture();
        let side = call(&destructive, &mut target, args()).unwrap();
        assert!(side.into_value().is_some(), "{} returned a collection", destructive);
        assert_eq!(target, expected, "{} disagrees with {}", destructive, name);
    }
}

#[test]
fn test_every_collection_method_is_covered() {
    let covered: Vec<_> = collection_cases().into_iter().map(|(name, _)| name).collect();
    for name in methods().names() {
        let method = methods().get(name).unwrap();
        if method.returns_collection && name != "shuffle" {
            assert!(covered.contains(&name), "{} has no case", name);
        }
    }
}
