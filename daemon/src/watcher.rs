/// Termination Watcher: filters lifecycle events and drives the Action Runner.
///
/// Sources push events into an unbounded FIFO; a single consumer drains it,
/// awaiting each script run before taking the next event. Events that
/// arrive during a run wait in the queue, so at most one invocation is ever
/// in flight and the delivery order is preserved.
use tokio::sync::mpsc;

use crate::config::WatcherConfig;
use crate::event::TerminationEvent;
use crate::runner::{ActionRunner, RunOutcome};
use crate::target;

/// Sending half handed to a lifecycle source.
pub type EventSink = mpsc::UnboundedSender<TerminationEvent>;
/// Receiving half consumed by [`TerminationWatcher::run`].
pub type EventQueue = mpsc::UnboundedReceiver<TerminationEvent>;

/// Creates the queue connecting a lifecycle source to the watcher.
pub fn channel() -> (EventSink, EventQueue) {
    mpsc::unbounded_channel()
}

pub struct TerminationWatcher<R> {
    config: WatcherConfig,
    runner: R,
}

impl<R: ActionRunner> TerminationWatcher<R> {
    pub fn new(config: WatcherConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Handles one termination. Returns the run outcome when the event
    /// matched the target, `None` when it was ignored.
    pub async fn on_event(&mut self, event: &TerminationEvent) -> Option<RunOutcome> {
        if !target::is_target(event) {
            return None;
        }

        tracing::info!(
            "🛑 Detected termination of: {} ({})",
            event.display_name(),
            event.display_identifier()
        );
        tracing::info!("🚀 Triggering fix script...");

        Some(self.runner.run(self.config.script_path()).await)
    }

    /// Consumes `queue` until every sender is dropped.
    pub async fn run(mut self, mut queue: EventQueue) {
        while let Some(event) = queue.recv().await {
            self.on_event(&event).await;
        }
        tracing::debug!("event queue closed; watcher stopping");
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }
}
