use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
pub const MAX_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// The one piece of state the watcher owns for its whole lifetime: the
/// action script to run. Set once at startup and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    script_path: PathBuf,
}

impl WatcherConfig {
    /// Rejects an empty path; anything else is accepted as-is and only
    /// checked when the script is launched.
    pub fn new(script_path: impl Into<PathBuf>) -> Result<Self> {
        let script_path = script_path.into();
        if script_path.as_os_str().is_empty() {
            bail!("Action script path must not be empty");
        }
        Ok(Self { script_path })
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }
}

/// Ambient settings, optionally read from a TOML file given with `--config`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Tuning for the process-table polling source.
#[derive(Debug, Deserialize)]
pub struct MonitorSettings {
    /// Seconds between process table refreshes. Clamped to [1, 60].
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl MonitorSettings {
    /// Returns the poll interval, preferring `cli_override` when given.
    pub fn effective_poll_interval(&self, cli_override: Option<u64>) -> u64 {
        cli_override
            .unwrap_or(self.poll_interval_secs)
            .clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. "info" or "edge_exit_watcher=debug".
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Loads the settings file at `path`, returning `Settings::default()` if the file does not exist.
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_or_default(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
