// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    ($result:expr, { Ok($($pattern:tt)*) }) => {
        match $result {
            Ok($($pattern)*) => {},
            other => panic!("Expected Ok({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        match $result {
            Ok(actual) => {
                pretty_assertions::assert_eq!($expected, actual, "< expected / got >");
            },
            other => panic!("Expected Ok(...) but got {:?}", other),
        }
    };
}

// Helper macro to generate test functions based on field names
#[macro_export]
macro_rules! handle_case {
    // The non-destructive call returns a collection and leaves the input alone
    ([$($attrs:meta)*] collection, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_collection() {
            let mut source = input();
            let result = enumerable::dispatch::call(method(), &mut source, args()).map(|outcome| {
                match outcome {
                    enumerable::Outcome::Collection(seq) => seq,
                    other => panic!("Expected a collection but got {:?}", other),
                }
            });
            assert_case!(result, $expected);
            pretty_assertions::assert_eq!(source, input(), "the input was mutated");
        }
    };

    // The non-destructive call returns a scalar
    ([$($attrs:meta)*] value, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_value() {
            let mut source = input();
            let result = enumerable::dispatch::call(method(), &mut source, args()).map(|outcome| {
                match outcome {
                    enumerable::Outcome::Value(value) => value,
                    other => panic!("Expected a value but got {:?}", other),
                }
            });
            assert_case!(result, $expected);
            pretty_assertions::assert_eq!(source, input(), "the input was mutated");
        }
    };

    // The input after the destructive call
    ([$($attrs:meta)*] mutated, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_mutated() {
            let name = format!("{}{}", method(), enumerable::dispatch::DESTRUCTIVE_MARKER);
            let mut source = input();
            let result = enumerable::dispatch::call(&name, &mut source, args()).map(|_| source);
            assert_case!(result, $expected);
        }
    };

    // The raw dispatch result, usually an error pattern
    ([$($attrs:meta)*] result, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_result() {
            let mut source = input();
            let result = enumerable::dispatch::call(method(), &mut source, args());
            assert_case!(result, $expected);
        }
    };

    // Generic case for unknown field names
    ([$($attrs:meta)*] $field_name:ident, $expected:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*]) => {
        $($test_functions)*
    };

    (@parse [$($test_functions:tt)*] $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value}
        ] $($rest)*}
    };
}

// Main macro - name, input, method and arguments first, then any order for
// assertions
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        method: $method:expr,
        args: $args:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, dead_code)]

            use super::*;
            use once_cell::sync::OnceCell;

            fn input() -> enumerable::Sequence {
                $input
            }

            fn method() -> &'static str {
                static METHOD_CELL: OnceCell<&'static str> = OnceCell::new();
                METHOD_CELL.get_or_init(|| $method)
            }

            // Callbacks are not `Clone`, so every test builds its own arguments
            fn args() -> enumerable::Args<'static> {
                $args
            }

            // Generate all test functions
            parse_assertions! {@parse [] $($assertion_fields)*}
        }
    };
}
