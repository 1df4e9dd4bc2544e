//! Quiet-period coalescing for search-as-you-type

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Runs a scheduled task after `delay` unless another schedule replaces it
///
/// Each call to [`Debouncer::schedule`] cancels the previously scheduled task
/// if its quiet period has not elapsed yet. A task whose period elapsed runs
/// to completion.
pub struct Debouncer {
    delay: Duration,
    current: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn replace(&self, next: Option<CancellationToken>) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = std::mem::replace(&mut *current, next) {
            previous.cancel();
        }
    }

    /// Schedule `task`, superseding any task still waiting
    pub fn schedule<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        self.replace(Some(token.clone()));

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => trace!("Debounced task superseded"),
                _ = tokio::time::sleep(delay) => task.await,
            }
        })
    }

    /// Drop the waiting task, if any
    pub fn cancel(&self) {
        self.replace(None);
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
