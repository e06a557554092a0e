//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;
use std::str::FromStr;

use crate::reporter::BarStyle;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Live progress reporting for terminal tasks
#[derive(Parser)]
#[command(
    name = "paceline",
    version = env!("CARGO_PKG_VERSION"),
    about = "Live progress reporting for long-running terminal tasks",
    long_about = "Render a self-overwriting progress line with throughput and ETA.",
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true, env = "PACELINE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run simulated tasks with a live progress line
    #[command(
        about = "Run simulated tasks with a live progress line",
        after_help = "Examples:\n  paceline demo\n  paceline demo --tasks 3 --interval 50\n  paceline demo --timeout-ms 250 --style block\n  paceline demo --force-render --delay-us 0"
    )]
    Demo {
        /// Number of tasks to simulate
        #[arg(long, default_value = "10")]
        tasks: u32,

        /// Minimum units of work per task
        #[arg(long, default_value = "1000", value_name = "N")]
        min_items: u64,

        /// Maximum units of work per task
        #[arg(long, default_value = "3000", value_name = "N")]
        max_items: u64,

        /// Simulated work time per unit, in microseconds
        #[arg(long, default_value = "1000", value_name = "MICROS")]
        delay_us: u64,

        /// Redraw every N units (overrides config)
        #[arg(short, long, conflicts_with = "timeout_ms")]
        interval: Option<u64>,

        /// Redraw at most once per N milliseconds, 0 to throttle by
        /// units instead (overrides config)
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Bar glyph palette: hash, block, or shade (overrides config)
        #[arg(long, value_parser = BarStyle::from_str)]
        style: Option<BarStyle>,

        /// Render even when output is not an interactive console
        #[arg(long)]
        force_render: bool,
    },

    /// Initialize configuration
    #[command(about = "Set up .paceline directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .paceline/settings.toml")]
    Config,
}
