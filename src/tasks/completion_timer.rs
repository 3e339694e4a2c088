//! Cancelable one-shot completion timer

use std::time::Duration;
use tokio::{sync::oneshot, task::JoinHandle, time::sleep};
use tracing::debug;

/// A background task that runs a callback once after a delay unless cancelled.
///
/// Dropping the handle cancels the pending callback. Must be created inside a
/// Tokio runtime.
#[derive(Debug)]
pub struct CompletionTimer {
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl CompletionTimer {
    /// Arm the timer; `on_fire` runs on the runtime after `delay` elapses
    pub fn schedule<F>(delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        debug!("Arming completion timer for {:?}", delay);
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = sleep(delay) => {
                    debug!("Completion timer elapsed");
                    on_fire();
                }
                _ = cancel_rx => {
                    debug!("Completion timer cancelled before firing");
                }
            }
        });

        Self {
            cancel_tx: Some(cancel_tx),
            handle,
        }
    }

    /// Prevent the callback from running. No-op once fired or already cancelled.
    pub fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            // The receiver is gone once the task has finished.
            let _ = cancel_tx.send(());
        }
    }

    /// Check if the background task has completed, fired or not
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let fired = Arc::clone(&count);
        (count, move || {
            fired.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn fires_once_after_delay() {
        let (count, on_fire) = counter();
        let timer = CompletionTimer::schedule(Duration::from_millis(20), on_fire);

        assert_eq!(count.load(Ordering::SeqCst), 0);
        sleep(Duration::from_millis(200)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timer.is_finished());
    }

    #[tokio::test]
    async fn cancel_before_expiry_prevents_firing() {
        let (count, on_fire) = counter();
        let mut timer = CompletionTimer::schedule(Duration::from_millis(50), on_fire);

        timer.cancel();
        sleep(Duration::from_millis(200)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(timer.is_finished());
    }

    #[tokio::test]
    async fn cancel_after_firing_or_twice_is_a_no_op() {
        let (count, on_fire) = counter();
        let mut timer = CompletionTimer::schedule(Duration::from_millis(10), on_fire);

        sleep(Duration::from_millis(200)).await;
        timer.cancel();
        timer.cancel();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropping_the_handle_cancels() {
        let (count, on_fire) = counter();
        drop(CompletionTimer::schedule(Duration::from_millis(20), on_fire));

        sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
