// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Console logger and ANSI helpers shared by the ctest crates.
//!
//! Two kinds of output leave a test binary: the harness report, which has a
//! fixed layout, and diagnostics emitted through the [`log`] facade. Both are
//! written through [`print_fmt`] / [`eprint_fmt`], which serialize writers so
//! that lines never interleave.

extern crate log;

use std::{
    fmt,
    io::{self, Write},
};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Wraps formatted arguments in an SGR escape sequence and a trailing reset.
///
/// The first argument is anything implementing `Display` that renders the SGR
/// parameters, e.g. an [`AnsiColor`] or a [`Paint`].
#[macro_export]
macro_rules! color_fmt {
    ($style:expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[0m", $style, format_args!($($arg)*))
    };
}

#[repr(u8)]
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black         = 30,
    Red           = 31,
    Green         = 32,
    Yellow        = 33,
    Blue          = 34,
    Magenta       = 35,
    Cyan          = 36,
    White         = 37,
    BrightBlack   = 90,
    BrightRed     = 91,
    BrightGreen   = 92,
    BrightYellow  = 93,
    BrightBlue    = 94,
    BrightMagenta = 95,
    BrightCyan    = 96,
    BrightWhite   = 97,
}

impl fmt::Display for AnsiColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// A foreground color with an intensity flag, rendered as `"{0|1};{color}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub color: AnsiColor,
    pub bold: bool,
}

impl Paint {
    pub const fn plain(color: AnsiColor) -> Self {
        Self { color, bold: false }
    }

    pub const fn bold(color: AnsiColor) -> Self {
        Self { color, bold: true }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.bold as u8, self.color)
    }
}

static LOCK: spin::Mutex<()> = spin::Mutex::new(());

/// Writes formatted arguments to stdout while holding the console lock.
pub fn print_fmt(args: fmt::Arguments) -> io::Result<()> {
    let _guard = LOCK.lock();
    let mut out = io::stdout().lock();
    out.write_fmt(args)?;
    out.flush()
}

/// Writes formatted arguments to stderr while holding the console lock.
pub fn eprint_fmt(args: fmt::Arguments) -> io::Result<()> {
    let _guard = LOCK.lock();
    io::stderr().lock().write_fmt(args)
}

struct ConsoleLogger;

impl Log for ConsoleLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = record.line().unwrap_or(0);
        let path = record.target();
        let color = match record.level() {
            Level::Error => AnsiColor::Red,
            Level::Warn => AnsiColor::Yellow,
            Level::Info => AnsiColor::Green,
            Level::Debug => AnsiColor::Cyan,
            Level::Trace => AnsiColor::BrightBlack,
        };

        let _ = eprint_fmt(format_args!(
            "{}\n",
            color_fmt!(
                AnsiColor::White,
                "[{time} {path}:{line}] {args}",
                time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                path = path,
                line = line,
                args = color_fmt!(color, "{}", record.args()),
            )
        ));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger and sets the maximum level.
///
/// Installing twice is harmless: the second call only changes the level.
pub fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_renders_sgr_parameters() {
        assert_eq!(Paint::plain(AnsiColor::White).to_string(), "0;37");
        assert_eq!(Paint::bold(AnsiColor::Red).to_string(), "1;31");
        assert_eq!(AnsiColor::BrightBlack.to_string(), "90");
    }

    #[test]
    fn color_fmt_wraps_and_resets() {
        let text = format!("{}", color_fmt!(Paint::bold(AnsiColor::Green), "{} passed", 3));
        assert_eq!(text, "\u{1B}[1;32m3 passed\u{1B}[0m");
    }

    #[test]
    fn reinstall_only_changes_level() {
        init_logger(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        init_logger(LevelFilter::Error);
        assert_eq!(log::max_level(), LevelFilter::Error);
    }
}
