//! Demo command: a simulated workload driving the progress reporter.
//!
//! Runs a batch of tasks, each with a random number of work units and a
//! small per-unit delay, so throttling and the live line can be seen
//! without a real workload.

use std::thread;
use std::time::Duration;

use anyhow::bail;
use console::style;
use rand::prelude::*;

use crate::config::Settings;
use crate::reporter::{BarStyle, ProgressReporter, ThrottlePolicy};

/// Arguments for the demo command.
pub struct DemoArgs {
    pub tasks: u32,
    pub min_items: u64,
    pub max_items: u64,
    pub delay_us: u64,
    pub interval: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub style: Option<BarStyle>,
    pub force_render: bool,
}

/// Run the demo command.
///
/// Reporter options come from settings, with CLI flags layered on top.
pub fn run(args: DemoArgs, settings: &Settings) -> anyhow::Result<()> {
    let DemoArgs {
        tasks,
        min_items,
        max_items,
        delay_us,
        interval,
        timeout_ms,
        style: bar_style,
        force_render,
    } = args;

    if max_items < min_items {
        bail!("--max-items ({max_items}) must be at least --min-items ({min_items})");
    }

    let mut options = settings.reporter.to_options();
    if let Some(step) = interval {
        options = options.with_throttle(ThrottlePolicy::Interval(step.max(1)));
    }
    if let Some(ms) = timeout_ms {
        // Zero means iteration-based, same as update_timeout_ms = 0 in config
        options = options.with_throttle(if ms > 0 {
            ThrottlePolicy::Timeout(Duration::from_millis(ms))
        } else {
            ThrottlePolicy::Interval(settings.reporter.update_interval.max(1))
        });
    }
    if let Some(chosen) = bar_style {
        options = options.with_style(chosen);
    }
    if force_render {
        options = options.console_only(false);
    }

    let mut rng = rand::rng();

    println!("{}", style("Starting tasks...").cyan());
    for task in 1..=tasks {
        let total = rng.random_range(min_items..=max_items);
        tracing::debug!(target: "demo", task, total, "starting task");

        let mut report =
            ProgressReporter::with_options(total, format!("Doing task {task}"), options);
        for _item in 0..total {
            report.report();
            if delay_us > 0 {
                thread::sleep(Duration::from_micros(delay_us));
            }
        }
        report.finish();

        tracing::debug!(target: "demo", task, rate = report.rate(), "task done");
    }
    println!("{}", style("Process finished").green());

    Ok(())
}
