/// Action Runner: launches the corrective script and waits for it.
///
/// Each invocation goes `Launching → Running → Completed`, or
/// `Launching → LaunchFailed` when the child cannot be created. Nothing
/// survives between invocations except log output, and no failure is ever
/// returned to the caller as an error.
use std::fmt;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Result of one script invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The script ran and exited with this code (0 conventionally means success).
    Exited(i32),
    /// The script ran but was terminated by a signal, so no exit code exists.
    Signaled,
    /// The child process could not be created.
    LaunchFailed(String),
    /// The child was started but waiting on it failed.
    WaitFailed(String),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Exited(0))
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Exited(code) => write!(f, "exit code {code}"),
            RunOutcome::Signaled => write!(f, "terminated by signal"),
            RunOutcome::LaunchFailed(e) => write!(f, "launch failed: {e}"),
            RunOutcome::WaitFailed(e) => write!(f, "wait failed: {e}"),
        }
    }
}

/// Runs the action for a detected termination.
///
/// Implementations must not return until the action has finished; the
/// watcher relies on that to keep invocations from overlapping.
#[trait_variant::make(ActionRunner: Send)]
#[allow(dead_code)]
pub trait LocalActionRunner {
    async fn run(&mut self, script: &Path) -> RunOutcome;
}

/// Spawns the script as a child process with inherited stdio and
/// environment, and no arguments.
#[derive(Debug, Default)]
pub struct ScriptRunner;

impl ActionRunner for ScriptRunner {
    async fn run(&mut self, script: &Path) -> RunOutcome {
        let spawned = Command::new(script)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                tracing::error!("❌ Failed to launch script {}: {e}", script.display());
                return RunOutcome::LaunchFailed(e.to_string());
            }
        };

        tracing::debug!(pid = ?child.id(), "script running");

        let outcome = match child.wait().await {
            Ok(status) => match status.code() {
                Some(code) => RunOutcome::Exited(code),
                None => RunOutcome::Signaled,
            },
            Err(e) => RunOutcome::WaitFailed(e.to_string()),
        };

        match &outcome {
            RunOutcome::Exited(code) if outcome.is_success() => {
                tracing::info!("✅ Script finished with exit code: {code}");
            }
            RunOutcome::Exited(code) => {
                tracing::warn!("⚠️ Script finished with exit code: {code}");
            }
            RunOutcome::Signaled => {
                tracing::warn!("Script terminated by signal before exiting");
            }
            RunOutcome::WaitFailed(e) => {
                tracing::error!("Failed waiting for script: {e}");
            }
            RunOutcome::LaunchFailed(_) => {}
        }

        outcome
    }
}
