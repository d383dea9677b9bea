//! Quiet-period scheduling

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// A scheduled callback; dropping the handle cancels it
#[derive(Debug)]
pub struct DebounceHandle {
    task: JoinHandle<()>,
}

impl DebounceHandle {
    /// Run `callback` once `delay` has passed. Must be called within a tokio runtime.
    pub fn spawn<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for DebounceHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Holds at most one pending callback; scheduling replaces the previous one
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<DebounceHandle>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Run `callback` after the quiet period unless rescheduled or cancelled first
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.cancel() {
            trace!("Debounce timer restarted");
        }
        self.pending = Some(DebounceHandle::spawn(self.quiet_period, callback));
    }

    /// Cancel the pending callback; true if one had not fired yet
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.cancel();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const QUIET: Duration = Duration::from_millis(200);

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let make = move || {
            let c = Arc::clone(&c);
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_period() {
        let (count, make) = counter();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.schedule(make());
        tokio::time::sleep(Duration::from_millis(199)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_restarts_the_timer() {
        let (count, make) = counter();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.schedule(make());
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.schedule(make());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_prevent_firing() {
        let (count, make) = counter();

        let mut debouncer = Debouncer::new(QUIET);
        debouncer.schedule(make());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        let handle = DebounceHandle::spawn(QUIET, make());
        drop(handle);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
