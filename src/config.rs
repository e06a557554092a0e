//! Configuration for the progress reporting tool.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `PACELINE_` and use double
//! underscores to separate nested levels:
//! - `PACELINE_REPORTER__UPDATE_INTERVAL=100` sets `reporter.update_interval`
//! - `PACELINE_REPORTER__STYLE=block` sets `reporter.style`
//! - `PACELINE_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::reporter::{BarStyle, ReporterOptions, ThrottlePolicy};

/// Directory holding the settings file, searched for from the current
/// directory upward.
pub const CONFIG_DIR: &str = ".paceline";

/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "settings.toml";

/// Errors from loading, saving, or initializing settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to write config file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file already exists at {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Progress reporter defaults
    #[serde(default)]
    pub reporter: ReporterConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReporterConfig {
    /// Bar width in cells
    #[serde(default = "default_width")]
    pub width: usize,

    /// Redraw every N reported units (iteration throttling)
    #[serde(default = "default_update_interval")]
    pub update_interval: u64,

    /// Redraw at most once per this many milliseconds; when greater than
    /// zero this takes precedence over `update_interval`
    #[serde(default)]
    pub update_timeout_ms: u64,

    /// Suppress output when not attached to an interactive console
    #[serde(default = "default_true")]
    pub console_only: bool,

    /// Glyph palette for the bar: "hash", "block", or "shade"
    #[serde(default)]
    pub style: BarStyle,

    /// Left indent in spaces
    #[serde(default = "default_indent")]
    pub indent: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `cli = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_width() -> usize {
    20
}
fn default_update_interval() -> u64 {
    1
}
fn default_true() -> bool {
    true
}
fn default_indent() -> usize {
    4
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            reporter: ReporterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            update_interval: default_update_interval(),
            update_timeout_ms: 0,
            console_only: default_true(),
            style: BarStyle::default(),
            indent: default_indent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl ReporterConfig {
    /// Convert the file-level settings into runtime reporter options.
    ///
    /// Out-of-range values are clamped rather than rejected: a zero width
    /// becomes one cell and a zero update interval becomes one unit. A
    /// positive timeout takes precedence over the iteration interval.
    pub fn to_options(&self) -> ReporterOptions {
        let throttle = if self.update_timeout_ms > 0 {
            ThrottlePolicy::Timeout(std::time::Duration::from_millis(self.update_timeout_ms))
        } else {
            ThrottlePolicy::Interval(self.update_interval.max(1))
        };
        ReporterOptions::new()
            .with_throttle(throttle)
            .with_width(self.width)
            .with_indent(self.indent)
            .with_style(self.style)
            .console_only(self.console_only)
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, SettingsError> {
        // Try to find the workspace root by looking for the config directory
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Layer in environment variables with PACELINE_ prefix.
            // Double underscore (__) separates nested levels; single
            // underscore (_) remains as is within field names.
            .merge(Env::prefixed("PACELINE_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(|e| SettingsError::Invalid(Box::new(e)))
    }

    /// Load configuration from a specific file, still honoring environment
    /// variable overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PACELINE_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(|e| SettingsError::Invalid(Box::new(e)))
    }

    /// Find the settings file by walking from the current directory up to
    /// the filesystem root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.exists() && config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SettingsError::WriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string).map_err(|e| SettingsError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Create a default settings file in the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, SettingsError> {
        let config_path = PathBuf::from(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err(SettingsError::AlreadyExists { path: config_path });
        }

        let existed = config_path.exists();
        Settings::default().save(&config_path)?;
        if force && existed {
            println!("Overwrote configuration at: {}", config_path.display());
        } else {
            println!("Created default configuration at: {}", config_path.display());
        }

        Ok(config_path)
    }
}
