//! Delayed wake-up used to drive bot turns.
//!
//! Each game owns exactly one scheduler and the scheduler holds at most
//! one pending wake-up: arming aborts whatever was pending first
//! (last-writer-wins, never additive). A stale fire after game
//! completion is the callback's problem to detect and ignore.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

#[derive(Debug, Default)]
pub struct BotScheduler {
    pending: Mutex<Option<AbortHandle>>,
}

impl BotScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending wake-up and arm a new one that runs `wake`
    /// after `delay`.
    pub fn arm<F>(&self, delay: Duration, wake: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.pending.lock();
        if let Some(prev) = slot.take() {
            prev.abort();
        }
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            wake.await;
        });
        *slot = Some(task.abort_handle());
    }

    pub fn cancel(&self) {
        if let Some(prev) = self.pending.lock().take() {
            prev.abort();
        }
    }
}
