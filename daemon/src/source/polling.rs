use std::collections::BTreeSet;

use anyhow::{Context, Result};
use sysinfo::{ProcessesToUpdate, System};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use super::LifecycleSource;
use crate::event::TerminationEvent;
use crate::target;
use crate::watcher::EventSink;

/// Lifecycle source for platforms without a native termination
/// notification: refreshes the OS process list every `interval` and reports
/// an application as terminated once its last process is gone.
///
/// Processes are grouped into applications by executable name, except that
/// every known executable of the target collapses into one application
/// named after the target, so a browser's many helper processes produce one
/// event. No identifier is available from the process table.
pub struct PollingSource {
    interval: Duration,
    runtime: Handle,
}

impl PollingSource {
    pub fn new(interval: Duration, runtime: Handle) -> Self {
        Self { interval, runtime }
    }
}

impl LifecycleSource for PollingSource {
    type Subscription = JoinHandle<()>;

    fn subscribe(&self, sink: EventSink) -> Result<Self::Subscription> {
        tracing::info!(
            "Polling process table every {}s for: {}",
            self.interval.as_secs(),
            target::TARGET_EXECUTABLES.join(", ")
        );
        Ok(self.runtime.spawn(poll(self.interval, sink)))
    }

    fn run_dispatch_loop(&self, subscription: Self::Subscription) -> Result<()> {
        self.runtime
            .block_on(subscription)
            .context("Process polling task failed")
    }
}

/// Polls until the watcher side of `sink` is gone.
async fn poll(period: Duration, sink: EventSink) {
    let mut sys = System::new();
    let mut tracker = AppTracker::default();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        sys.refresh_processes(ProcessesToUpdate::All, true);
        let running = sys
            .processes()
            .values()
            .map(|p| application_name(&p.name().to_string_lossy()));

        for name in tracker.observe(running) {
            tracing::debug!("[monitor] Exited: {name}");
            if sink.send(TerminationEvent::new(Some(name), None)).is_err() {
                return;
            }
        }
    }
}

/// Name an executable is reported under.
fn application_name(exe: &str) -> String {
    target::display_name_for_executable(exe)
        .map(str::to_string)
        .unwrap_or_else(|| exe.to_string())
}

/// Set of applications seen on the previous poll.
#[derive(Debug, Default)]
struct AppTracker {
    /// `None` until the first poll establishes a baseline.
    running: Option<BTreeSet<String>>,
}

impl AppTracker {
    /// Records the current process names and returns the applications that
    /// were running last time and have no process now, in name order.
    fn observe(&mut self, names: impl IntoIterator<Item = String>) -> Vec<String> {
        let now: BTreeSet<String> = names.into_iter().collect();
        let gone = match &self.running {
            Some(before) => before.difference(&now).cloned().collect(),
            None => Vec::new(),
        };
        self.running = Some(now);
        gone
    }
}
