// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Settings read from the environment when a test binary starts.

use std::io::{self, IsTerminal};

use log::LevelFilter;

use crate::{
    error::{CtestError, Result},
    report::Stream,
};

/// Controls ANSI styling of the console report (`CTEST_COLOR`).
pub const COLOR_VAR: &str = "CTEST_COLOR";
/// Disables styling when set and non-empty, unless `CTEST_COLOR` says otherwise.
pub const NO_COLOR_VAR: &str = "NO_COLOR";
/// Maximum level of harness diagnostics logged through `log` (`CTEST_LOG`).
pub const LOG_VAR: &str = "CTEST_LOG";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Style a stream only when it is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Whether output written to `stream` is styled.
    pub fn enabled_for(self, stream: Stream) -> bool {
        let is_terminal = match stream {
            Stream::Stdout => io::stdout().is_terminal(),
            Stream::Stderr => io::stderr().is_terminal(),
        };
        self.resolve(is_terminal)
    }

    /// Resolves the choice for a stream that is or is not a terminal.
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl core::str::FromStr for ColorChoice {
    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub color: ColorChoice,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        match lookup(COLOR_VAR) {
            Some(value) => {
                config.color = value.parse().map_err(|_| CtestError::InvalidSetting {
                    key: COLOR_VAR,
                    value,
                })?;
            }
            None => {
                if lookup(NO_COLOR_VAR).is_some_and(|v| !v.is_empty()) {
                    config.color = ColorChoice::Never;
                }
            }
        }

        if let Some(value) = lookup(LOG_VAR) {
            config.log_level = value.parse().map_err(|_| CtestError::InvalidSetting {
                key: LOG_VAR,
                value,
            })?;
        }

        Ok(config)
    }
}
