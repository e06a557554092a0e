pub mod cli;
pub mod config;
pub mod logging;
pub mod reporter;

pub use config::{Settings, SettingsError};
pub use reporter::{BarStyle, ProgressReporter, ReporterOptions, ThrottlePolicy};
