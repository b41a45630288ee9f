mod config;
mod event;
mod logging;
mod runner;
mod source;
mod target;
mod watcher;

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::Duration;

use crate::config::{Settings, WatcherConfig};
use crate::runner::ScriptRunner;
use crate::source::polling::PollingSource;
use crate::source::LifecycleSource;
use crate::watcher::{EventSink, TerminationWatcher};

const USAGE: &str = "Usage: edge-exit-watcher <absolute_path_to_script>";

/// Runs a corrective script every time Microsoft Edge quits.
#[derive(Parser, Debug)]
#[command(name = "edge-exit-watcher", version, about)]
struct Cli {
    /// Absolute path of the script to run after each termination
    #[arg(value_name = "SCRIPT_PATH")]
    script_path: Option<OsString>,

    /// TOML file with logging and polling settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seconds between process table refreshes (polling source only)
    #[arg(long, value_name = "SECS")]
    poll_interval: Option<u64>,

    /// Poll the process table instead of using native notifications
    /// (macOS only; other platforms always poll)
    #[arg(long)]
    polling: bool,
}

fn main() {
    let cli = Cli::parse();

    // ── Configuration ─────────────────────────────────────────────────────────
    let watcher_config = match cli.script_path.clone().map(WatcherConfig::new) {
        Some(Ok(config)) => config,
        _ => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    let settings = match &cli.config {
        Some(path) => config::load_or_default(path).unwrap_or_else(|e| {
            eprintln!("[config] Error (using defaults): {e:#}");
            Settings::default()
        }),
        None => Settings::default(),
    };

    // ── Logging ───────────────────────────────────────────────────────────────
    if let Err(e) = logging::init(&settings.logging.filter) {
        eprintln!("{e}");
    }

    if let Err(e) = run(&cli, watcher_config, &settings) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, watcher_config: WatcherConfig, settings: &Settings) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let native = cfg!(target_os = "macos") && !cli.polling;

    tracing::info!("👀 EdgeExitWatcher v{} started.", env!("CARGO_PKG_VERSION"));
    tracing::info!("   Monitoring for: {}", target::TARGET_DISPLAY_NAME);
    tracing::info!("   Action script: {}", watcher_config.script_path().display());
    tracing::info!(
        "   Event source: {}",
        if native { "native notifications" } else { "process polling" }
    );

    // ── Watcher ───────────────────────────────────────────────────────────────
    let (sink, queue) = watcher::channel();
    runtime.spawn(TerminationWatcher::new(watcher_config, ScriptRunner).run(queue));

    // ── Lifecycle source (owns this thread from here on) ──────────────────────
    #[cfg(target_os = "macos")]
    {
        if native {
            return watch(&source::macos::WorkspaceSource, sink);
        }
    }

    let interval = Duration::from_secs(settings.monitor.effective_poll_interval(cli.poll_interval));
    watch(&PollingSource::new(interval, runtime.handle().clone()), sink)
}

fn watch<S: LifecycleSource>(source: &S, sink: EventSink) -> Result<()> {
    let subscription = source.subscribe(sink)?;
    source.run_dispatch_loop(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_path_is_optional_for_clap() {
        let cli = Cli::try_parse_from(["edge-exit-watcher"]).unwrap();
        assert!(cli.script_path.is_none());
    }

    #[test]
    fn positional_script_path_is_parsed() {
        let cli = Cli::try_parse_from(["edge-exit-watcher", "/opt/fix.sh"]).unwrap();
        assert_eq!(cli.script_path, Some(OsString::from("/opt/fix.sh")));
        assert!(!cli.polling);
        assert!(cli.config.is_none());
    }

    #[test]
    fn optional_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "edge-exit-watcher",
            "--config",
            "/etc/watcher.toml",
            "--poll-interval",
            "5",
            "--polling",
            "/opt/fix.sh",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/watcher.toml")));
        assert_eq!(cli.poll_interval, Some(5));
        assert!(cli.polling);
    }

    #[test]
    fn empty_script_path_reaches_validation() {
        let cli = Cli::try_parse_from(["edge-exit-watcher", ""]).unwrap();
        let path = cli.script_path.unwrap();
        assert!(WatcherConfig::new(path).is_err());
    }

    #[test]
    fn usage_names_the_script_argument() {
        assert!(USAGE.contains("<absolute_path_to_script>"));
    }
}
