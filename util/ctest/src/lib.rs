// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! A small unit-test harness.
//!
//! Tests are plain functions marked with [`def_test`]. Inside them, `assert!`,
//! `assert_eq!` and `assert_eq_str!` record failures without aborting, and the
//! function returns how many assertions failed. A test binary runs them with
//! [`main!`]:
//!
//! ```ignore
//! use ctest::def_test;
//!
//! #[def_test]
//! fn add_returns_sum() {
//!     assert_eq!(2 + 2, 4);
//! }
//!
//! #[def_test]
//! fn string_equality_check() {
//!     assert_eq_str!("a", "a");
//! }
//!
//! ctest::main!(add_returns_sum, string_equality_check);
//! ```

#[macro_use]
extern crate log;

pub mod assert;
pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
mod macros;
pub mod registry;
pub mod report;
pub mod runner;

// Re-export the def_test attribute from the ctest-macros crate
pub use ctest_macros::def_test;
// Re-export the pieces most test binaries touch
pub use crate::assert::{Diagnostic, Location, evaluate, string_compare};
pub use crate::error::CtestError;
pub use crate::registry::{Registry, TESTS, TestCase, TestResult};
pub use crate::runner::{RunSummary, Runner, run_all};

#[doc(hidden)]
pub mod __private {
    pub use linkme;
}
