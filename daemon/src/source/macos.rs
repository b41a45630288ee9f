/// Native lifecycle source on macOS: `NSWorkspace` posts
/// `didTerminateApplication` for every application that quits.
///
/// Must run on the main thread, which it then owns through `NSRunLoop`.
use std::ptr::NonNull;

use anyhow::{bail, Result};
use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::{NSObjectProtocol, ProtocolObject};
use objc2_app_kit::{
    NSRunningApplication, NSWorkspace, NSWorkspaceApplicationKey,
    NSWorkspaceDidTerminateApplicationNotification,
};
use objc2_foundation::{NSNotification, NSRunLoop};

use super::LifecycleSource;
use crate::event::TerminationEvent;
use crate::watcher::EventSink;

#[derive(Debug, Default)]
pub struct WorkspaceSource;

/// Observer registration. The watcher never unregisters; the token only has
/// to outlive the run loop.
pub struct WorkspaceSubscription {
    _token: Retained<ProtocolObject<dyn NSObjectProtocol>>,
}

impl LifecycleSource for WorkspaceSource {
    type Subscription = WorkspaceSubscription;

    #[allow(unused_unsafe)]
    fn subscribe(&self, sink: EventSink) -> Result<Self::Subscription> {
        let handler = RcBlock::new(move |note: NonNull<NSNotification>| {
            // SAFETY: the notification centre hands us a valid notification
            // for the duration of the callback.
            let note = unsafe { note.as_ref() };
            if let Some(event) = termination_event(note) {
                if sink.send(event).is_err() {
                    tracing::warn!("Termination dropped: watcher is no longer running");
                }
            }
        });

        unsafe {
            let center = NSWorkspace::sharedWorkspace().notificationCenter();
            let token = center.addObserverForName_object_queue_usingBlock(
                Some(NSWorkspaceDidTerminateApplicationNotification),
                None,
                None,
                &handler,
            );
            Ok(WorkspaceSubscription { _token: token })
        }
    }

    #[allow(unused_unsafe)]
    fn run_dispatch_loop(&self, subscription: Self::Subscription) -> Result<()> {
        unsafe { NSRunLoop::currentRunLoop().run() };
        drop(subscription);
        tracing::warn!("Run loop returned; no more termination notifications will arrive");
        bail!("NSRunLoop exited: no input sources left on this thread")
    }
}

/// Extracts the terminated application's identity. Returns `None` when the
/// payload carries no application at all.
#[allow(unused_unsafe)]
fn termination_event(note: &NSNotification) -> Option<TerminationEvent> {
    unsafe {
        let user_info = note.userInfo()?;
        let obj = user_info.objectForKey(NSWorkspaceApplicationKey)?;
        // SAFETY: the value under NSWorkspaceApplicationKey is always an
        // NSRunningApplication.
        let app: Retained<NSRunningApplication> = Retained::cast_unchecked(obj);

        Some(TerminationEvent::new(
            app.localizedName().map(|s| s.to_string()),
            app.bundleIdentifier().map(|s| s.to_string()),
        ))
    }
}
