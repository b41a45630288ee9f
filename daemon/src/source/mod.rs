/// Lifecycle event sources.
///
/// A source tells the watcher about every application that terminates; it
/// never filters. Delivery goes through an [`EventSink`], which never
/// blocks, so the dispatch loop keeps running while a script is in flight.
use anyhow::Result;

use crate::watcher::EventSink;

#[cfg(target_os = "macos")]
pub mod macos;
pub mod polling;

pub trait LifecycleSource {
    /// Keeps the registration alive. Dropping it may stop delivery.
    type Subscription;

    /// Registers `sink` for application-terminated notifications.
    fn subscribe(&self, sink: EventSink) -> Result<Self::Subscription>;

    /// Drives the dispatch loop on the calling thread. Returns only if the
    /// source can no longer deliver events.
    fn run_dispatch_loop(&self, subscription: Self::Subscription) -> Result<()>;
}
