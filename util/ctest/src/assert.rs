// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Assertion evaluation.
//!
//! [`evaluate`] is stateless: it reports a failed condition and hands the
//! verdict back. Counting failures is left to the call site, which is what the
//! `assert!` family of macros does inside a `#[def_test]` body.

use core::{cmp::Ordering, fmt};

use crate::report::{self, Event};

/// Where an assertion was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub test_name: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, test_name: &'static str, line: u32) -> Self {
        Self {
            file,
            test_name,
            line,
        }
    }
}

/// A failed assertion, as handed to the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub expression: String,
    pub location: Location,
    /// The formatted user message, empty when none was given
    pub message: String,
}

/// Reports `condition` if it is false and returns it unchanged.
///
/// The condition must already be evaluated; `expression` is only its source
/// text. `message` is formatted on failure and never otherwise.
pub fn evaluate(
    condition: bool,
    expression: &str,
    location: Location,
    message: Option<fmt::Arguments<'_>>,
) -> bool {
    if condition {
        return true;
    }

    report::emit(Event::AssertionFailed(Diagnostic {
        expression: expression.into(),
        location,
        message: message.map(|args| args.to_string()).unwrap_or_default(),
    }));
    false
}

/// Byte-wise comparison of two strings.
#[inline]
pub fn string_compare(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}
