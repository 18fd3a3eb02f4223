/// Builds a [`Sequence`](crate::values::Sequence).
///
/// Two forms are accepted:
///
/// ```
/// use enumerable_core::{seq, values::{Key, Value}};
///
/// // A list, keyed 0..n
/// let list = seq![1, "two", 3.0];
/// assert_eq!(list.get(&Key::Int(1)), Some(&Value::from("two")));
///
/// // Explicit keys, in insertion order
/// let map = seq!{"a" => 1, 10 => seq![true]};
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::values::Sequence::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::values::Sequence::from_entries([
            $((
                $crate::values::Key::from($key),
                $crate::values::Value::from($value),
            )),+
        ])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::values::Sequence::from_values([
            $($crate::values::Value::from($value)),+
        ])
    };
}

/// Shorthand for [`Value::Null`](crate::values::Value::Null) in fixtures.
#[macro_export]
macro_rules! null {
    () => {
        $crate::values::Value::Null
    };
}
