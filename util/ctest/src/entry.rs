// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Process entry point used by [`main!`](crate::main!).

use std::process::ExitCode;

use crate::{
    config::Config,
    registry::Registry,
    report::{self, ConsoleReporter},
    runner,
};

/// Maps a run verdict to the process exit status.
pub fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Configures logging and reporting from the environment, then runs the
/// registry produced by `registry`.
///
/// Invalid settings and an empty registry terminate the process.
pub fn run_main(registry: impl FnOnce() -> Registry) -> ExitCode {
    let config = Config::from_env().unwrap_or_else(|err| runner::fatal(err));
    clogger::init_logger(config.log_level);
    report::install(Box::new(ConsoleReporter::with_choice(config.color)));

    let registry = registry();
    info!("{} tests registered", registry.len());
    exit_code(runner::run_all(&registry))
}

