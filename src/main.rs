//! Binary entry point: parse arguments, load settings, dispatch commands.

use clap::Parser;

use paceline::cli::commands::{demo, init};
use paceline::cli::{Cli, Commands};
use paceline::config::Settings;

fn main() {
    let cli = Cli::parse();

    // Settings come first so the logging section can configure the filter
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is not up yet, report directly
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    paceline::logging::init_with_config(&settings.logging);
    tracing::debug!(target: "cli", version = env!("CARGO_PKG_VERSION"), "settings loaded");

    let result = match cli.command {
        Commands::Demo {
            tasks,
            min_items,
            max_items,
            delay_us,
            interval,
            timeout_ms,
            style,
            force_render,
        } => demo::run(
            demo::DemoArgs {
                tasks,
                min_items,
                max_items,
                delay_us,
                interval,
                timeout_ms,
                style,
                force_render,
            },
            &settings,
        ),
        Commands::Init { force } => init::run_init(force),
        Commands::Config => init::run_config(&settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
