// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test cases and the ordered registry the runner walks.
//!
//! Tests reach a registry in one of two ways:
//!
//! - `#[def_test]` places a [`TestCase`] in the [`TESTS`] linker section, and
//!   [`Registry::collected`] reads them back in declaration order.
//! - [`registry!`](crate::registry!) builds a registry from an explicit list,
//!   whose order is the run order.

use core::fmt;

use linkme::distributed_slice;

/// Body of a test: runs the assertions and returns how many of them failed.
pub type TestFn = fn() -> usize;

/// Every test declared with `#[def_test]` in the linked binary.
#[distributed_slice]
pub static TESTS: [TestCase];

/// A named test body.
#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub module: &'static str,
    pub file: &'static str,
    pub line: u32,
    run: TestFn,
}

impl TestCase {
    pub const fn new(
        name: &'static str,
        module: &'static str,
        file: &'static str,
        line: u32,
        run: TestFn,
    ) -> Self {
        Self {
            name,
            module,
            file,
            line,
            run,
        }
    }

    /// Runs the body once.
    pub fn invoke(&self) -> TestResult {
        TestResult {
            name: self.name,
            failed_assertions: (self.run)(),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

/// Outcome of one test invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestResult {
    pub name: &'static str,
    pub failed_assertions: usize,
}

impl TestResult {
    #[inline]
    pub fn passed(&self) -> bool {
        self.failed_assertions == 0
    }
}

/// Ordered, fixed list of tests for one run.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    /// Builds a registry that runs `cases` in iteration order.
    pub fn new(cases: impl IntoIterator<Item = TestCase>) -> Self {
        let cases: Vec<_> = cases.into_iter().collect();
        trace!("registry built with {} tests", cases.len());
        Self { cases }
    }

    /// Every `#[def_test]` in the binary, ordered by file, line, then name.
    ///
    /// The linker gives no ordering guarantee for [`TESTS`], so the source
    /// position is what keeps reports reproducible between builds.
    pub fn collected() -> Self {
        let mut cases: Vec<TestCase> = TESTS.iter().copied().collect();
        sort_by_position(&mut cases);
        Self::new(cases)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }
}

/// Orders cases by source file, then line, then name.
fn sort_by_position(cases: &mut [TestCase]) {
    cases.sort_by_key(|case| (case.file, case.line, case.name));
}

/// Name a `registry!` entry runs under: the last segment of its path, which is
/// also the name `#[def_test]` gives the test's diagnostics.
#[doc(hidden)]
pub fn entry_name(path: &'static str) -> &'static str {
    path.rsplit("::").next().unwrap_or(path).trim()
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TestCase;
    type IntoIter = core::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}
