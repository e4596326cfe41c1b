// Debounced triggering of pipeline runs
use crate::config::constants::DEFAULT_DEBOUNCE_MS;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Collapses bursts of triggers into a single delayed piece of work.
///
/// Each trigger restarts the timer and replaces the pending work. Work whose
/// timer has elapsed runs on its own task and is never aborted by a later
/// trigger or by [`cancel`](Self::cancel).
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `work` after the delay, dropping any trigger still waiting
    pub fn trigger<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!("Debounce window elapsed, starting work");
            tokio::spawn(work);
        });

        if let Some(previous) = self.lock().replace(timer) {
            previous.abort();
        }
    }

    /// Drop the pending trigger, if any. Returns whether one was waiting.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(timer) if !timer.is_finished() => {
                timer.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.lock().take() {
            timer.abort();
        }
    }
}
