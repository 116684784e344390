// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Assertion, registry and entry-point macros.
//!
//! The assertion macros are rewritten by `#[def_test]` into their `@tally`
//! form, which names the counter of the enclosing test and the test itself.
//! Written anywhere else they refuse to compile.

/// Asserts that a condition holds, without aborting the test.
///
/// ```ignore
/// #[ctest::def_test]
/// fn bounds() {
///     assert!(LIMIT > 0);
///     assert!(LIMIT < 100, "limit is {}", LIMIT);
/// }
/// ```
#[macro_export]
macro_rules! assert {
    (@tally $failed:ident, $test:literal; $cond:expr $(,)?) => {{
        if !$crate::assert::evaluate(
            $cond,
            stringify!($cond),
            $crate::assert::Location::new(file!(), $test, line!()),
            None,
        ) {
            $failed += 1;
        }
    }};
    (@tally $failed:ident, $test:literal; $cond:expr, $($arg:tt)+) => {{
        if !$crate::assert::evaluate(
            $cond,
            stringify!($cond),
            $crate::assert::Location::new(file!(), $test, line!()),
            Some(format_args!($($arg)+)),
        ) {
            $failed += 1;
        }
    }};
    ($($rest:tt)*) => {
        compile_error!("`ctest::assert!` can only be used inside a `#[def_test]` function")
    };
}

/// Asserts that two values are equal, without aborting the test.
#[macro_export]
macro_rules! assert_eq {
    (@tally $failed:ident, $test:literal; $left:expr, $right:expr $(,)?) => {{
        if !$crate::assert::evaluate(
            ($left) == ($right),
            concat!("(", stringify!($left), ") == (", stringify!($right), ")"),
            $crate::assert::Location::new(file!(), $test, line!()),
            None,
        ) {
            $failed += 1;
        }
    }};
    (@tally $failed:ident, $test:literal; $left:expr, $right:expr, $($arg:tt)+) => {{
        if !$crate::assert::evaluate(
            ($left) == ($right),
            concat!("(", stringify!($left), ") == (", stringify!($right), ")"),
            $crate::assert::Location::new(file!(), $test, line!()),
            Some(format_args!($($arg)+)),
        ) {
            $failed += 1;
        }
    }};
    ($($rest:tt)*) => {
        compile_error!("`ctest::assert_eq!` can only be used inside a `#[def_test]` function")
    };
}

/// Asserts that two strings are equal byte for byte, without aborting the
/// test. Both sides may be anything that is `AsRef<str>`.
#[macro_export]
macro_rules! assert_eq_str {
    (@tally $failed:ident, $test:literal; $left:expr, $right:expr $(,)?) => {{
        if !$crate::assert::evaluate(
            $crate::assert::string_compare(
                ::core::convert::AsRef::<str>::as_ref(&$left),
                ::core::convert::AsRef::<str>::as_ref(&$right),
            ) == ::core::cmp::Ordering::Equal,
            concat!("string_compare(", stringify!($left), ", ", stringify!($right), ") == Equal"),
            $crate::assert::Location::new(file!(), $test, line!()),
            None,
        ) {
            $failed += 1;
        }
    }};
    (@tally $failed:ident, $test:literal; $left:expr, $right:expr, $($arg:tt)+) => {{
        if !$crate::assert::evaluate(
            $crate::assert::string_compare(
                ::core::convert::AsRef::<str>::as_ref(&$left),
                ::core::convert::AsRef::<str>::as_ref(&$right),
            ) == ::core::cmp::Ordering::Equal,
            concat!("string_compare(", stringify!($left), ", ", stringify!($right), ") == Equal"),
            $crate::assert::Location::new(file!(), $test, line!()),
            Some(format_args!($($arg)+)),
        ) {
            $failed += 1;
        }
    }};
    ($($rest:tt)*) => {
        compile_error!("`ctest::assert_eq_str!` can only be used inside a `#[def_test]` function")
    };
}

/// Builds a [`Registry`](crate::registry::Registry) that runs the listed test
/// functions in the order given. A test is named after its function, without
/// the module path it was listed with.
#[macro_export]
macro_rules! registry {
    () => {
        $crate::registry::Registry::default()
    };
    ($($test:path),+ $(,)?) => {
        $crate::registry::Registry::new([
            $($crate::registry::TestCase::new(
                $crate::registry::entry_name(stringify!($test)),
                module_path!(),
                file!(),
                line!(),
                $test,
            )),+
        ])
    };
}

/// Defines `fn main` for a test binary.
///
/// Without arguments every `#[def_test]` linked into the binary runs; with a
/// list, exactly the listed tests run in that order. The process exits with
/// status 0 when all tests pass and 1 otherwise.
#[macro_export]
macro_rules! main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::entry::run_main($crate::registry::Registry::collected)
        }
    };
    ($($test:path),+ $(,)?) => {
        fn main() -> ::std::process::ExitCode {
            $crate::entry::run_main(|| $crate::registry![$($test),+])
        }
    };
}
