//! Self-overwriting progress reporting for long-running iterative tasks.
//!
//! A [`ProgressReporter`] tracks how many of a known total number of work
//! units have completed, measures a windowed throughput rate, and redraws
//! a single status line in place:
//!
//! ```text
//!     [########............] 412/1000@92.5 ETA: 00:00:07 - Doing task 3
//! ```
//!
//! The caller drives it imperatively: construct with the total and a
//! description, call [`report`](ProgressReporter::report) once per
//! completed unit, and [`finish`](ProgressReporter::finish) exactly once
//! after the loop to force a final draw and terminate the line.
//!
//! ```
//! use paceline::ProgressReporter;
//!
//! let mut report = ProgressReporter::new(100, "Doing something");
//! report.set_interval(10); // redraw every 10 units
//! for _item in 0..100 {
//!     report.report();
//! }
//! report.finish();
//! ```
//!
//! Rendering is suppressed by default when the process is not attached to
//! an interactive console; counters still advance so the reporter can be
//! queried either way. Redraw frequency is bounded by a
//! [`ThrottlePolicy`], either per N units or per elapsed duration.

mod rate;
mod render;
mod throttle;

pub use render::BarStyle;
pub use throttle::ThrottlePolicy;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use rate::RateWindow;
use render::{CURSOR_LEFT, ERASE_LINE};

const DEFAULT_BAR_WIDTH: usize = 20;
const DEFAULT_INDENT: usize = 4;

/// Options controlling how the progress line is rendered and throttled.
///
/// Cheap to copy; one options value can seed any number of reporters.
#[derive(Clone, Copy, Debug)]
pub struct ReporterOptions {
    /// Redraw throttling policy. Defaults to redrawing on every report.
    pub throttle: ThrottlePolicy,
    /// Suppress all output when not attached to an interactive console.
    /// Defaults to true.
    pub console_only: bool,
    /// Whether process output is an interactive console. Detected once at
    /// options construction; injected here so the reporter itself never
    /// queries the environment and tests can pin it either way.
    pub console_attached: bool,
    /// Bar width in cells.
    pub width: usize,
    /// Left indent in spaces.
    pub indent: usize,
    /// Glyph palette for the bar.
    pub style: BarStyle,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            throttle: ThrottlePolicy::default(),
            console_only: true,
            console_attached: is_terminal::is_terminal(std::io::stdout()),
            width: DEFAULT_BAR_WIDTH,
            indent: DEFAULT_INDENT,
            style: BarStyle::default(),
        }
    }
}

impl ReporterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_throttle(mut self, throttle: ThrottlePolicy) -> Self {
        self.throttle = throttle;
        self
    }

    /// Set the bar width (clamped to at least 1 cell).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn console_only(mut self, value: bool) -> Self {
        self.console_only = value;
        self
    }

    pub fn console_attached(mut self, value: bool) -> Self {
        self.console_attached = value;
        self
    }
}

/// Tracks completed units against a fixed total and redraws one status
/// line in place.
///
/// The reporter owns all of its state and is driven from a single control
/// flow: every operation takes `&mut self` and runs to completion without
/// blocking. Concurrent reporting on one counter is out of contract; wrap
/// the reporter in a mutex externally if that is ever needed.
///
/// `total` is fixed at construction. A zero total is accepted: the bar
/// stays empty and no ETA is shown regardless of how many units are
/// reported against it.
pub struct ProgressReporter<W: Write> {
    total: u64,
    current: u64,
    description: String,
    started_at: Instant,
    window: RateWindow,
    rate: f64,
    last_render_at: Option<Instant>,
    options: ReporterOptions,
    sink: W,
}

impl ProgressReporter<io::Stdout> {
    /// Create a reporter writing to stdout with default options.
    pub fn new(total: u64, description: impl Into<String>) -> Self {
        Self::with_options(total, description, ReporterOptions::default())
    }

    /// Create a reporter writing to stdout with custom options.
    pub fn with_options(
        total: u64,
        description: impl Into<String>,
        options: ReporterOptions,
    ) -> Self {
        Self::with_sink(total, description, options, io::stdout())
    }
}

impl<W: Write> ProgressReporter<W> {
    /// Create a reporter writing to an arbitrary sink.
    ///
    /// The sink receives raw frames (erase-line escape, indented progress
    /// text, carriage return) and a final newline from
    /// [`finish`](Self::finish); it is flushed after every frame.
    pub fn with_sink(
        total: u64,
        description: impl Into<String>,
        options: ReporterOptions,
        sink: W,
    ) -> Self {
        let now = Instant::now();
        Self {
            total,
            current: 0,
            description: description.into(),
            started_at: now,
            window: RateWindow::new(now),
            rate: 0.0,
            last_render_at: None,
            options,
            sink,
        }
    }

    /// Switch to iteration-based throttling: redraw whenever the completed
    /// count is a multiple of `step`.
    ///
    /// `step` must be at least 1; a zero step makes the next report panic
    /// on the remainder check.
    pub fn set_interval(&mut self, step: u64) {
        self.options.throttle = ThrottlePolicy::Interval(step);
    }

    /// Switch to time-based throttling: redraw at most once per `timeout`.
    ///
    /// A zero duration keeps iteration-based throttling instead: the
    /// active interval step if one is configured, otherwise the default.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.options.throttle = if timeout.is_zero() {
            match self.options.throttle {
                interval @ ThrottlePolicy::Interval(_) => interval,
                ThrottlePolicy::Timeout(_) => ThrottlePolicy::default(),
            }
        } else {
            ThrottlePolicy::Timeout(timeout)
        };
    }

    /// Control whether output is suppressed off-console. When `false`,
    /// rendering proceeds regardless of console attachment.
    pub fn set_console_only(&mut self, value: bool) {
        self.options.console_only = value;
    }

    /// Replace the description shown beside the bar. Visible from the next
    /// rendered frame onward.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Record one completed unit of work and redraw if the throttle allows.
    ///
    /// Never fails: when rendering is suppressed or the sink rejects the
    /// write, the call is a no-op beyond the counter updates.
    ///
    /// # Panics
    ///
    /// If an interval throttle was configured with a zero step.
    pub fn report(&mut self) {
        self.report_at(Instant::now());
    }

    /// [`report`](Self::report), also replacing the description first.
    pub fn report_with(&mut self, description: impl Into<String>) {
        self.report_with_at(Instant::now(), description);
    }

    /// Force a final draw (throttle ignored, console suppression still
    /// honored) and terminate the line.
    ///
    /// Call exactly once after the work loop: without it the cursor is
    /// left sitting on the progress line. Extra calls re-render and emit
    /// extra terminators, which is harmless but redundant.
    pub fn finish(&mut self) {
        self.finish_at(Instant::now());
    }

    /// Clock-explicit form of [`report`](Self::report) for callers that
    /// drive time themselves (simulations, tests).
    pub fn report_at(&mut self, now: Instant) {
        self.current += 1;
        self.window.record();
        self.rate = self.window.measure(now);
        if self
            .options
            .throttle
            .render_required(self.current, self.last_render_at, now)
        {
            self.render(now);
        }
    }

    /// Clock-explicit form of [`report_with`](Self::report_with).
    pub fn report_with_at(&mut self, now: Instant, description: impl Into<String>) {
        self.description = description.into();
        self.report_at(now);
    }

    /// Clock-explicit form of [`finish`](Self::finish).
    pub fn finish_at(&mut self, now: Instant) {
        self.rate = self.window.measure(now);
        if !self.render_allowed() {
            return;
        }
        self.last_render_at = Some(now);
        let mut frame = self.compose_frame();
        frame.push('\n');
        self.write_frame(&frame);
    }

    /// Units completed so far.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Units of work expected in total.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Most recent windowed ops/sec measurement.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time since construction. Informational: the displayed rate is
    /// measured over a trailing window, not over this.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// The description currently shown beside the bar.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Borrow the output sink (useful for inspecting capture buffers).
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Consume the reporter and return its sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn render_allowed(&self) -> bool {
        !self.options.console_only || self.options.console_attached
    }

    fn render(&mut self, now: Instant) {
        if !self.render_allowed() {
            return;
        }
        self.last_render_at = Some(now);
        let frame = self.compose_frame();
        self.write_frame(&frame);
    }

    /// One full frame: erase the line, indent, progress text, optional
    /// description, then return the cursor so the next frame overwrites
    /// this one. No newline; only `finish` terminates the line.
    fn compose_frame(&self) -> String {
        let mut frame = String::new();
        frame.push_str(ERASE_LINE);
        frame.push_str(&" ".repeat(self.options.indent));
        frame.push_str(&render::progress_text(
            self.current,
            self.total,
            self.rate,
            self.options.width,
            self.options.style,
        ));
        if !self.description.is_empty() {
            frame.push_str(" - ");
            frame.push_str(&self.description);
        }
        frame.push_str(CURSOR_LEFT);
        frame
    }

    fn write_frame(&mut self, frame: &str) {
        // Sink failures are not part of the report contract.
        let _ = self.sink.write_all(frame.as_bytes());
        let _ = self.sink.flush();
    }
}
