//! Integration tests for the progress reporter lifecycle.
//!
//! All rendering goes into an in-memory sink and time is driven through
//! the `*_at` variants, so frame output is deterministic.

use std::time::{Duration, Instant};

use paceline::{BarStyle, ProgressReporter, ReporterOptions};

fn test_options() -> ReporterOptions {
    // Pin console attachment so results do not depend on the test runner
    ReporterOptions::new().console_attached(true)
}

fn reporter(total: u64, description: &str) -> ProgressReporter<Vec<u8>> {
    ProgressReporter::with_sink(total, description, test_options(), Vec::new())
}

fn frame_count(sink: &[u8]) -> usize {
    String::from_utf8_lossy(sink).matches("\x1b[K").count()
}

#[test]
fn test_renders_every_report_by_default() {
    let mut report = reporter(10, "");
    for _ in 0..10 {
        report.report();
    }
    assert_eq!(frame_count(report.sink()), 10);
}

#[test]
fn test_interval_renders_on_multiples_only() {
    let mut report = reporter(10, "");
    report.set_interval(3);
    let now = Instant::now();
    for _ in 0..10 {
        report.report_at(now);
    }
    // Rendered at units 3, 6, and 9
    assert_eq!(frame_count(report.sink()), 3);
    assert_eq!(report.current(), 10);
}

#[test]
fn test_timeout_coalesces_rapid_reports() {
    let mut report = reporter(100, "");
    report.set_timeout(Duration::from_millis(250));
    let start = Instant::now();
    report.report_at(start);
    report.report_at(start + Duration::from_millis(100));
    report.report_at(start + Duration::from_millis(200));
    report.report_at(start + Duration::from_millis(300));
    // First report always draws; next draw waits out the timeout
    assert_eq!(frame_count(report.sink()), 2);
}

#[test]
fn test_timeout_boundary_is_inclusive() {
    let mut report = reporter(100, "");
    report.set_timeout(Duration::from_millis(250));
    let start = Instant::now();
    report.report_at(start);
    report.report_at(start + Duration::from_millis(250));
    assert_eq!(frame_count(report.sink()), 2);
}

#[test]
fn test_suppressed_reporter_stays_silent() {
    let options = ReporterOptions::new().console_attached(false);
    let mut report = ProgressReporter::with_sink(5, "quiet", options, Vec::new());
    for _ in 0..5 {
        report.report();
    }
    report.finish();
    // Counters advance even though nothing is written
    assert_eq!(report.current(), 5);
    assert!(report.sink().is_empty());
}

#[test]
fn test_console_only_off_renders_without_console() {
    let options = ReporterOptions::new()
        .console_attached(false)
        .console_only(false);
    let mut report = ProgressReporter::with_sink(5, "", options, Vec::new());
    report.report();
    report.finish();
    assert_eq!(frame_count(report.sink()), 2);
}

#[test]
fn test_finish_bypasses_throttle_and_terminates_line() {
    let mut report = reporter(50, "");
    report.set_interval(100);
    let now = Instant::now();
    for _ in 0..7 {
        report.report_at(now);
    }
    assert_eq!(frame_count(report.sink()), 0);

    report.finish_at(now);
    let output = String::from_utf8(report.into_sink()).unwrap();
    assert_eq!(output.matches("\x1b[K").count(), 1);
    assert!(output.contains("7/50"));
    assert!(output.ends_with("\r\n"));
}

#[test]
fn test_rate_and_eta_reflect_windowed_throughput() {
    let mut report = reporter(100, "");
    report.set_interval(1000); // keep intermediate frames out of the sink
    let start = Instant::now();
    for i in 0..5 {
        report.report_at(start + Duration::from_secs(i));
    }
    report.finish_at(start + Duration::from_secs(25));

    // 5 units over 25 seconds of window
    assert_eq!(report.rate(), 0.2);
    let output = String::from_utf8(report.into_sink()).unwrap();
    assert!(output.contains("5/100@0.2 "));
    // 95 units left at 0.2/s
    assert!(output.contains("ETA: 00:07:55"));
}

#[test]
fn test_window_resets_after_inactivity_gap() {
    let mut report = reporter(100, "");
    report.set_interval(1000);
    let start = Instant::now();
    for i in 0..5 {
        report.report_at(start + Duration::from_millis(i * 100));
    }
    report.finish_at(start + Duration::from_secs(40));

    // The trailing window expired, so the stale throughput is discarded
    assert_eq!(report.rate(), 0.0);
    let output = String::from_utf8(report.into_sink()).unwrap();
    assert!(output.contains("5/100@0\r"));
    assert!(!output.contains("ETA:"));
}

#[test]
fn test_report_with_shows_updated_description() {
    let mut report = reporter(4, "first phase");
    let now = Instant::now();
    report.report_at(now);
    report.report_with_at(now, "second phase");
    let output = String::from_utf8(report.into_sink()).unwrap();
    let frames: Vec<&str> = output.split_terminator('\r').collect();
    assert!(frames[0].ends_with(" - first phase"));
    assert!(frames[1].ends_with(" - second phase"));
}

#[test]
fn test_zero_total_shows_empty_bar_and_no_eta() {
    let mut report = reporter(0, "");
    let start = Instant::now();
    for i in 1..=3 {
        report.report_at(start + Duration::from_secs(i));
    }
    let output = String::from_utf8(report.into_sink()).unwrap();
    assert!(output.contains("[....................] 3/0"));
    // Throughput is measured, but a remaining-time estimate is meaningless
    assert!(output.contains('@'));
    assert!(!output.contains("ETA:"));
}

#[test]
fn test_block_style_changes_glyphs() {
    let options = test_options().with_style(BarStyle::Block);
    let mut report = ProgressReporter::with_sink(2, "", options, Vec::new());
    report.report();
    let output = String::from_utf8(report.into_sink()).unwrap();
    assert!(output.contains('█'));
    assert!(output.contains('░'));
    assert!(!output.contains('#'));
}

#[test]
fn test_switching_throttle_mid_run() {
    let mut report = reporter(100, "");
    report.set_interval(2);
    let start = Instant::now();
    report.report_at(start);
    report.report_at(start); // unit 2 draws
    assert_eq!(frame_count(report.sink()), 1);

    report.set_timeout(Duration::from_millis(300));
    report.report_at(start + Duration::from_secs(1)); // past the timeout, draws
    report.report_at(start + Duration::from_millis(1050)); // too soon
    assert_eq!(frame_count(report.sink()), 2);
}
