/// Console logging using tracing
use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV_VAR: &str = "EDGE_EXIT_WATCHER_LOG";

/// Initialize the logging subsystem.
///
/// Status lines go to stdout so they interleave with the action script's
/// own output. `EDGE_EXIT_WATCHER_LOG` wins over `default_filter`. Colours
/// are only emitted when stdout is a terminal; redirected output (launchd,
/// systemd, `> file`) stays plain text.
pub fn init(default_filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let ansi = ansi_for(&std::io::stdout());
    tracing::subscriber::set_global_default(subscriber(env_filter, std::io::stdout, ansi))
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

fn ansi_for(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

fn subscriber<W>(
    env_filter: EnvFilter,
    writer: W,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_ids(false)
        .with_timer(fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .finish()
}
