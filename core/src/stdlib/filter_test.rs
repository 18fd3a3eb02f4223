//! Tests for selection and removal

use pretty_assertions::assert_eq;
use regex::Regex;

use super::*;

fn odd(_: &Key, v: &mut Value) -> Control {
    v.as_int().is_some_and(|n| n % 2 == 1).into()
}

// ============================================================================
// select / reject
// ============================================================================

#[test]
fn test_select_preserves_keys() {
    let mut s = seq![1, 2, 3, 4, 5];
    select(&mut s, &mut odd);
    assert_eq!(s, seq! {0 => 1, 2 => 3, 4 => 5});
}

#[test]
fn test_reject_preserves_keys() {
    let mut s = seq! {"a" => 1, "b" => 2, "c" => 3};
    reject(&mut s, &mut odd);
    assert_eq!(s, seq! {"b" => 2});
}

#[test]
fn test_select_break_keeps_the_rest() {
    let mut s = seq![1, 2, 3, 4, 5];
    select(&mut s, &mut |_, v| match v.as_int() {
        Some(4) => Control::Break,
        Some(n) => (n % 2 == 1).into(),
        None => false.into(),
    });
    assert_eq!(s, seq! {0 => 1, 2 => 3, 3 => 4, 4 => 5});
}

#[test]
fn test_reject_continue_keeps_element() {
    let mut s = seq![1, 2, 3];
    reject(&mut s, &mut |_, v| {
        if *v == Value::Int(1) {
            Control::Continue
        } else {
            Control::Yield(Value::Bool(true))
        }
    });
    assert_eq!(s, seq![1]);
}

// ============================================================================
// compact
// ============================================================================

#[test]
fn test_compact_shallow_preserves_keys() {
    let mut s = seq![1, null!(), 2, seq![null!(), 3]];
    compact(&mut s, false);
    assert_eq!(s, seq! {0 => 1, 2 => 2, 3 => seq![null!(), 3]});
}

#[test]
fn test_compact_recursive_renumbers() {
    let mut s = seq! {0 => null!(), 1 => seq![null!(), 3], "k" => 4, 5 => null!()};
    compact(&mut s, true);
    assert_eq!(s, seq! {0 => seq![3], "k" => 4});
}

// ============================================================================
// grep
// ============================================================================

#[test]
fn test_grep_matches_string_forms() {
    let pattern = Regex::new("^a").unwrap();
    let mut s = seq! {"x" => "apple", "y" => "banana", "z" => "avocado", "w" => seq!["apple"]};
    grep(&mut s, &pattern, None);
    assert_eq!(s, seq! {"x" => "apple", "z" => "avocado"});

    let digits = Regex::new(r"^\d+$").unwrap();
    let mut s = seq![1, "22", 3.5, true];
    grep(&mut s, &digits, None);
    // true matches as "1"
    assert_eq!(s, seq! {0 => 1, 1 => "22", 3 => true});
}

#[test]
fn test_grep_with_rewrite() {
    let pattern = Regex::new("an").unwrap();
    let mut s = seq!["banana", "kiwi", "mango"];
    grep(
        &mut s,
        &pattern,
        Some(&mut |_, v| Value::from(v.as_str().unwrap_or("").to_uppercase()).into()),
    );
    assert_eq!(s, seq! {0 => "BANANA", 2 => "MANGO"});
}

// ============================================================================
// uniq
// ============================================================================

#[test]
fn test_uniq_first_occurrence_wins() {
    let mut s = seq! {"a" => 1, "b" => 2, "c" => 1, "d" => "1", "e" => 2};
    uniq(&mut s, None);
    // Strict equality keeps "1" apart from 1
    assert_eq!(s, seq! {"a" => 1, "b" => 2, "d" => "1"});
}

#[test]
fn test_uniq_by_derived_value() {
    let mut s = seq!["apple", "avocado", "banana", "blueberry", "cherry"];
    uniq(
        &mut s,
        Some(&mut |_, v| Value::from(v.as_str().and_then(|s| s.get(..1)).unwrap_or("")).into()),
    );
    assert_eq!(s, seq! {0 => "apple", 2 => "banana", 4 => "cherry"});
}

#[test]
fn test_uniq_mixed_types() {
    let mut s = seq![
        null!(),
        false,
        0,
        0.0,
        "",
        null!(),
        false,
        0,
        0.0,
        "",
        f64::NAN,
        f64::NAN,
        seq![1],
        seq![1],
        seq!["1"],
    ];
    uniq(&mut s, None);
    // NaN never equals itself, so both survive
    assert_eq!(
        s.keys().cloned().collect::<Vec<_>>(),
        [0, 1, 2, 3, 4, 10, 11, 12, 14].map(Key::Int)
    );
}

#[test]
fn test_uniq_large_input() {
    let mut s = Sequence::from_values((0..20_000i64).map(|n| n % 1_000));
    uniq(&mut s, None);
    assert_eq!(s, Sequence::from_values(0..1_000i64));
}

#[test]
fn test_uniq_is_idempotent() {
    let mut once = seq![3, 1, 3, 2, 1];
    uniq(&mut once, None);
    let mut twice = once.clone();
    uniq(&mut twice, None);
    assert_eq!(once, twice);
}

// ============================================================================
// delete / delete_at
// ============================================================================

#[test]
fn test_delete_removes_every_match() {
    let mut s = seq![1, 2, 1, "1", 3];
    assert_eq!(delete(&mut s, &Value::Int(1), None), Value::Int(1));
    assert_eq!(s, seq! {1 => 2, 3 => "1", 4 => 3});
}

#[test]
fn test_delete_not_found_uses_fallback() {
    let mut s = seq![1, 2];
    assert_eq!(delete(&mut s, &Value::Int(9), None), Value::Null);
    assert_eq!(
        delete(&mut s, &Value::Int(9), Some(&mut || Value::from("not found"))),
        Value::from("not found")
    );
    assert_eq!(s, seq![1, 2]);
}

#[test]
fn test_delete_at() {
    let mut s = seq! {"a" => 1, 5 => 2, 6 => 3};
    assert_eq!(delete_at(&mut s, &Key::Int(5)), Value::Int(2));
    assert_eq!(delete_at(&mut s, &Key::Int(5)), Value::Null);
    // Absent negative key: counts from the end
    assert_eq!(delete_at(&mut s, &Key::Int(-1)), Value::Int(3));
    assert_eq!(delete_at(&mut s, &Key::Int(-9)), Value::Null);
    assert_eq!(s, seq! {"a" => 1});
}

#[test]
fn test_delete_at_prefers_present_negative_key() {
    let mut s = seq! {-1 => "neg", 0 => "zero"};
    assert_eq!(delete_at(&mut s, &Key::Int(-1)), Value::from("neg"));
    assert_eq!(s, seq! {0 => "zero"});
}
