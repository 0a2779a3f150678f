//! Cancellable delayed dispatch.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Quiet period after the last edit before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Sends a value on a channel once `delay` has passed without another
/// [`Debouncer::schedule`] call.
///
/// Scheduling aborts the pending task and starts a new one. Dropping the
/// debouncer aborts whatever is still pending.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer that delivers to `tx`.
    #[must_use]
    pub const fn new(delay: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// (Re)starts the delay; `value` is sent when it elapses.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(value).is_err() {
                tracing::debug!("debounce receiver closed before delivery");
            }
        }));
    }

    /// Returns `true` while a scheduled value has not been sent yet.
    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Debouncer<T> {
    /// Discards the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tokio::sync::mpsc;
    use tokio::time::{Instant, sleep, timeout};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_deliver_once_with_final_value() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE, tx);

        // Act
        debouncer.schedule("b");
        sleep(Duration::from_millis(100)).await;
        debouncer.schedule("ba");
        sleep(Duration::from_millis(450)).await;
        debouncer.schedule("bat");
        let last_edit = Instant::now();
        let delivered = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();

        // Assert
        assert_eq!(delivered, Some("bat"));
        assert!(last_edit.elapsed() >= SEARCH_DEBOUNCE);
        assert!(
            timeout(Duration::from_secs(2), rx.recv()).await.is_err(),
            "only one value may be delivered"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_sent_before_the_delay() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE, tx);

        // Act
        debouncer.schedule(1_u32);
        sleep(Duration::from_millis(499)).await;

        // Assert
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE, tx);
        debouncer.schedule(1_u32);

        // Act
        debouncer.cancel();

        // Assert
        assert!(!debouncer.is_pending());
        assert!(timeout(Duration::from_secs(2), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_task() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE, tx);
        debouncer.schedule(1_u32);

        // Act
        drop(debouncer);
        let received = timeout(Duration::from_secs(2), rx.recv()).await;

        // Assert
        assert!(!matches!(received, Ok(Some(_))));
    }
}
