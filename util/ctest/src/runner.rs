// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test runner
//!
//! The runner walks a [`Registry`] in order, invokes every test exactly once
//! and turns each returned failure count into a pass or fail line. The run
//! summary is reported after the last test.

use chrono::{DateTime, Local, TimeDelta};

use crate::{
    clock::{Clock, SystemClock, Timestamp},
    error::{CtestError, Result},
    registry::Registry,
    report::{self, Event},
};

/// Aggregate counters of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub test_count: usize,
    pub fail_test_count: usize,
    pub pass_test_count: usize,
    pub start: DateTime<Local>,
    pub duration: TimeDelta,
}

impl RunSummary {
    /// Whether every test passed.
    #[inline]
    pub fn passed(&self) -> bool {
        self.fail_test_count == 0
    }

    pub fn start_timestamp(&self) -> Timestamp {
        Timestamp::of(&self.start)
    }

    /// Run duration truncated to whole seconds.
    pub fn duration_secs(&self) -> i64 {
        self.duration.num_seconds()
    }
}

/// Runs the tests of one registry.
pub struct Runner<'r, C = SystemClock> {
    registry: &'r Registry,
    clock: C,
}

impl<'r> Runner<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_clock(registry, SystemClock)
    }
}

impl<'r, C: Clock> Runner<'r, C> {
    pub fn with_clock(registry: &'r Registry, clock: C) -> Self {
        Self { registry, clock }
    }

    /// Invokes every test in registry order and reports the outcome.
    ///
    /// An empty registry is rejected before anything is reported.
    pub fn run(&self) -> Result<RunSummary> {
        let test_count = self.registry.len();
        if test_count == 0 {
            return Err(CtestError::EmptyRegistry);
        }

        report::emit(Event::RunStarted { test_count });

        let start = self.clock.now();
        let mut fail_test_count = 0;
        for case in self.registry {
            debug!("running test `{}` ({}:{})", case.name, case.file, case.line);
            let result = case.invoke();
            if result.passed() {
                report::emit(Event::TestPassed { name: result.name });
            } else {
                report::emit(Event::TestFailed {
                    name: result.name,
                    failed_assertions: result.failed_assertions,
                });
                fail_test_count += 1;
            }
        }
        let end = self.clock.now();

        let summary = RunSummary {
            test_count,
            fail_test_count,
            pass_test_count: test_count - fail_test_count,
            start,
            duration: end - start,
        };
        report::emit(Event::Summary(summary.clone()));
        Ok(summary)
    }
}

/// Runs `registry` against the system clock, returning whether all tests
/// passed.
///
/// A registry that cannot be run is a configuration error: it is reported and
/// the process exits with status 1.
pub fn run_all(registry: &Registry) -> bool {
    match Runner::new(registry).run() {
        Ok(summary) => summary.passed(),
        Err(err) => fatal(err),
    }
}

/// Reports `err` and terminates the process with a failure status.
pub fn fatal(err: CtestError) -> ! {
    debug!("aborting: {err:?}");
    report::emit(Event::Fatal(err));
    std::process::exit(1)
}
