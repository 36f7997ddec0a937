//! Timers and fire-and-forget tasks on the UI thread.

use futures::future::LocalBoxFuture;
use std::time::Duration;

/// The event loop the dashboard runs on.
///
/// Tasks are never `Send`: everything they touch lives on the UI thread.
pub trait Scheduler {
    /// Runs `task` to completion in the background.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolves once `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Scheduler backed by the current tokio runtime.
///
/// `spawn` uses `tokio::task::spawn_local` and must be called from inside a
/// `tokio::task::LocalSet`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for TokioScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
