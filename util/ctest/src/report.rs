// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Report events and the process-wide sink they are written to.
//!
//! The evaluator and the runner never format text themselves. They build an
//! [`Event`] and hand it to [`emit`], which forwards it to the installed
//! [`Reporter`]. The default reporter is a [`ConsoleReporter`]; tests can
//! record events instead with [`capture`].

use core::{cell::RefCell, fmt};

use clogger::{AnsiColor, Paint, color_fmt};

use crate::{assert::Diagnostic, config::ColorChoice, error::CtestError, runner::RunSummary};

const GRAY: Paint = Paint::plain(AnsiColor::White);
const GRAY_BOLD: Paint = Paint::bold(AnsiColor::White);
const RED: Paint = Paint::bold(AnsiColor::Red);
const GREEN: Paint = Paint::bold(AnsiColor::Green);

/// One logical report message.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An assertion evaluated to false
    AssertionFailed(Diagnostic),
    /// The runner is about to invoke `test_count` tests
    RunStarted { test_count: usize },
    /// A test returned with no failed assertions
    TestPassed { name: &'static str },
    /// A test returned with at least one failed assertion
    TestFailed {
        name: &'static str,
        failed_assertions: usize,
    },
    /// Every test has run
    Summary(RunSummary),
    /// The harness cannot continue
    Fatal(CtestError),
}

/// Output stream an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Event {
    /// Stream the console reporter writes this event to.
    pub fn stream(&self) -> Stream {
        match self {
            Event::RunStarted { .. } | Event::Summary(_) => Stream::Stdout,
            _ => Stream::Stderr,
        }
    }

    /// Renders the event in console layout, with or without ANSI styling.
    pub fn render(&self, color: bool) -> String {
        struct Rendered<'a>(&'a Event, bool);

        impl fmt::Display for Rendered<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write_to(f, self.1)
            }
        }

        Rendered(self, color).to_string()
    }

    fn write_to(&self, f: &mut fmt::Formatter<'_>, color: bool) -> fmt::Result {
        match self {
            Event::AssertionFailed(d) => writeln!(
                f,
                "❌ {}:{} -> {}\n💬 Assertion of '{}' failed\n📝 {}",
                d.location.file, d.location.line, d.location.test_name, d.expression, d.message
            ),
            Event::RunStarted { test_count } => {
                paint(
                    f,
                    color,
                    GRAY,
                    format_args!("INFO: Running a total of {test_count} tests."),
                )?;
                f.write_str("\n\n")
            }
            Event::TestPassed { name } => {
                f.write_str("✅ Test ")?;
                paint(f, color, GRAY_BOLD, format_args!("{name}"))?;
                f.write_str(" passed.\n")
            }
            Event::TestFailed {
                name,
                failed_assertions,
            } => {
                f.write_str("💥 Test ")?;
                paint(f, color, GRAY_BOLD, format_args!("{name}"))?;
                writeln!(f, " failed {failed_assertions} assertions!")
            }
            Event::Summary(summary) => {
                f.write_str("\n")?;
                paint(f, color, GRAY, format_args!("    Tests  "))?;
                paint(
                    f,
                    color,
                    RED,
                    format_args!("{} failed", summary.fail_test_count),
                )?;
                paint(f, color, GRAY, format_args!(" | "))?;
                paint(
                    f,
                    color,
                    GREEN,
                    format_args!("{} passed", summary.pass_test_count),
                )?;
                paint(f, color, GRAY, format_args!(" ({})", summary.test_count))?;
                f.write_str("\n")?;
                paint(f, color, GRAY, format_args!(" Start at  "))?;
                writeln!(f, "{}", summary.start_timestamp())?;
                paint(f, color, GRAY, format_args!(" Duration  "))?;
                writeln!(f, "{}s", summary.duration_secs())
            }
            Event::Fatal(err) => writeln!(f, "ERROR: {err}"),
        }
    }
}

/// Writes `text`, styled with `style` when `color` is set.
fn paint(f: &mut fmt::Formatter<'_>, color: bool, style: Paint, text: fmt::Arguments<'_>) -> fmt::Result {
    if color {
        write!(f, "{}", color_fmt!(style, "{}", text))
    } else {
        f.write_fmt(text)
    }
}

/// Receiver of report events.
pub trait Reporter: Send {
    fn report(&mut self, event: &Event);
}

/// Writes events to the terminal in the fixed console layout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    stdout_color: bool,
    stderr_color: bool,
}

impl ConsoleReporter {
    /// Styles both streams, or neither.
    pub const fn new(color: bool) -> Self {
        Self::per_stream(color, color)
    }

    pub const fn per_stream(stdout_color: bool, stderr_color: bool) -> Self {
        Self {
            stdout_color,
            stderr_color,
        }
    }

    /// Resolves `choice` separately for stdout and stderr, so redirecting one
    /// of them to a file keeps escape codes out of it.
    pub fn with_choice(choice: ColorChoice) -> Self {
        Self::per_stream(
            choice.enabled_for(Stream::Stdout),
            choice.enabled_for(Stream::Stderr),
        )
    }

    /// Whether text written to `stream` is styled.
    pub fn color_for(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => self.stdout_color,
            Stream::Stderr => self.stderr_color,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &Event) {
        let text = event.render(self.color_for(event.stream()));
        let written = match event.stream() {
            Stream::Stdout => clogger::print_fmt(format_args!("{text}")),
            Stream::Stderr => clogger::eprint_fmt(format_args!("{text}")),
        };
        if let Err(err) = written {
            warn!("failed to write report: {err}");
        }
    }
}

static SINK: spin::Mutex<Option<Box<dyn Reporter>>> = spin::Mutex::new(None);

std::thread_local! {
    static CAPTURE: RefCell<Option<Vec<Event>>> = const { RefCell::new(None) };
}

/// Replaces the process-wide reporter.
pub fn install(reporter: Box<dyn Reporter>) {
    *SINK.lock() = Some(reporter);
}

/// Sends an event to the sink.
///
/// When the current thread is inside [`capture`], the event is recorded
/// there instead.
pub fn emit(event: Event) {
    let Some(event) = CAPTURE.with_borrow_mut(|buf| match buf {
        Some(events) => {
            events.push(event);
            None
        }
        None => Some(event),
    }) else {
        return;
    };

    let mut sink = SINK.lock();
    sink.get_or_insert_with(|| Box::new(ConsoleReporter::with_choice(ColorChoice::Auto)))
        .report(&event);
}

/// Runs `f`, collecting the events it emits on this thread instead of
/// reporting them.
///
/// Nested captures are flattened into the outermost one. If `f` panics, the
/// capture still ends and the events recorded so far reach the enclosing one.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Event>) {
    let mut scope = CaptureScope::enter();
    let value = f();
    let events = scope.finish();
    (value, events)
}

/// Restores the enclosing capture buffer when dropped.
struct CaptureScope {
    outer: Option<Vec<Event>>,
}

impl CaptureScope {
    fn enter() -> Self {
        Self {
            outer: CAPTURE.with_borrow_mut(|buf| buf.replace(Vec::new())),
        }
    }

    /// Takes the events recorded in this scope, copying them to the outer one.
    fn finish(&mut self) -> Vec<Event> {
        let events = CAPTURE
            .with_borrow_mut(|buf| buf.replace(Vec::new()))
            .unwrap_or_default();
        if let Some(outer) = &mut self.outer {
            outer.extend(events.iter().cloned());
        }
        events
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        let outer = self.outer.take();
        CAPTURE.with_borrow_mut(|buf| {
            let pending = buf.take().unwrap_or_default();
            *buf = outer.map(|mut outer| {
                outer.extend(pending);
                outer
            });
        });
    }
}
