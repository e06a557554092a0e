//! Formatting for the progress line.
//!
//! Everything here is pure string/number work: percentage and cell
//! arithmetic, the glyph palettes, and the `[bar] current/total@rate`
//! line grammar with its optional ETA segment. The reporter composes
//! these into full frames; no I/O happens in this module.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Escape sequence that erases from the cursor to the end of the line.
pub(crate) const ERASE_LINE: &str = "\x1b[K";
/// Returns the cursor to column zero without advancing a line.
pub(crate) const CURSOR_LEFT: &str = "\r";

/// Glyph palettes for the progress bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarStyle {
    /// `#` cells with `.` fill, the classic ASCII bar.
    #[default]
    Hash,
    /// Full block (`█`) cells with light shade (`░`) fill.
    Block,
    /// Dark shade (`▓`) cells with light shade (`░`) fill.
    Shade,
}

impl BarStyle {
    /// Glyph used for filled segments of the bar.
    pub fn filled_cell(self) -> &'static str {
        match self {
            BarStyle::Hash => "#",
            BarStyle::Block => "█",
            BarStyle::Shade => "▓",
        }
    }

    /// Glyph used for empty segments of the bar.
    pub fn empty_cell(self) -> &'static str {
        match self {
            BarStyle::Hash => ".",
            BarStyle::Block | BarStyle::Shade => "░",
        }
    }
}

impl FromStr for BarStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hash" => Ok(BarStyle::Hash),
            "block" => Ok(BarStyle::Block),
            "shade" => Ok(BarStyle::Shade),
            other => Err(format!(
                "unknown bar style '{other}' (expected hash, block or shade)"
            )),
        }
    }
}

/// Round to three decimal places, half away from zero.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Completed percentage, rounded to three decimals.
///
/// A zero `total` pins the percentage at zero, so the bar never fills no
/// matter how many units are reported against it.
pub(crate) fn percent_done(current: u64, total: u64) -> f64 {
    if total > 0 {
        round3(current as f64 * 100.0 / total as f64)
    } else {
        0.0
    }
}

/// Split the bar into filled and empty cell counts.
///
/// Filled cells are the ceiling of the proportional width, so any nonzero
/// percentage lights at least one cell; the count is clamped to `width`
/// when the reported units overshoot the total.
pub(crate) fn bar_cells(percent: f64, width: usize) -> (usize, usize) {
    let done = ((percent * width as f64 / 100.0).ceil() as usize).min(width);
    (done, width - done)
}

/// Seconds until completion at the given rate. Callers guard `rate > 0`.
pub(crate) fn eta_secs(remaining: u64, rate: f64) -> u64 {
    (remaining as f64 / rate).ceil() as u64
}

/// Zero-padded `HH:MM:SS`. Hours wrap at 24; there is no day field.
pub(crate) fn format_hms(total_secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600 % 24,
        total_secs / 60 % 60,
        total_secs % 60
    )
}

/// Format the `[bar] current/total@rate` segment, appending
/// ` ETA: HH:MM:SS` when a positive rate against a nonzero total gives
/// the estimate meaning.
pub(crate) fn progress_text(
    current: u64,
    total: u64,
    rate: f64,
    width: usize,
    style: BarStyle,
) -> String {
    let (done, undone) = bar_cells(percent_done(current, total), width);
    let mut text = format!(
        "[{}{}] {current}/{total}@{rate}",
        style.filled_cell().repeat(done),
        style.empty_cell().repeat(undone)
    );
    if rate > 0.0 && total > 0 {
        let remaining = total.saturating_sub(current);
        let _ = write!(text, " ETA: {}", format_hms(eta_secs(remaining, rate)));
    }
    text
}
