//! Cancellation token for cooperative cancellation.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// A callback type for cancellation notifications.
pub type CancelCallback = Box<dyn FnOnce() + Send>;

/// Identifies a subscription registered with [`CancellationToken::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct TokenState {
    /// Whether cancellation has been requested. Only ever goes false -> true.
    cancelled: AtomicBool,
    next_id: AtomicU64,
    /// Pending subscribers in registration order.
    subscribers: Mutex<Vec<(SubscriptionId, CancelCallback)>>,
}

/// A one-shot, multi-subscriber cancellation signal.
///
/// Clones share the same underlying state, so a token can be handed to any
/// number of consumers. The first [`cancel`](Self::cancel) notifies every
/// subscriber exactly once, in registration order; later calls do nothing.
#[derive(Clone, Default)]
pub struct CancellationToken {
    state: Arc<TokenState>,
}

impl CancellationToken {
    /// Creates a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    ///
    /// This is idempotent. Subscribers are drained and invoked on the calling
    /// thread after the internal lock is released, so a subscriber may freely
    /// call back into the token. Panics in subscribers are logged and
    /// suppressed.
    pub fn cancel(&self) {
        let subscribers = {
            let mut subscribers = self.state.subscribers.lock();
            if self.state.cancelled.swap(true, Ordering::SeqCst) {
                return;
            }
            std::mem::take(&mut *subscribers)
        };

        debug!(subscribers = subscribers.len(), "Cancellation requested");

        for (id, callback) in subscribers {
            invoke(id, callback);
        }
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Registers a callback to be invoked once on cancellation.
    ///
    /// If already cancelled, the callback is invoked immediately. The callback
    /// is released as soon as it has run.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = SubscriptionId(self.state.next_id.fetch_add(1, Ordering::Relaxed));

        {
            let mut subscribers = self.state.subscribers.lock();
            if !self.state.cancelled.load(Ordering::SeqCst) {
                subscribers.push((id, Box::new(callback)));
                return id;
            }
        }

        invoke(id, Box::new(callback));
        id
    }

    /// Removes a pending subscription.
    ///
    /// Returns false if the subscription already fired or was never
    /// registered with this token.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.state.subscribers.lock();
        match subscribers.iter().position(|(sub, _)| *sub == id) {
            Some(index) => {
                subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the number of subscribers still waiting for cancellation.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.subscribers.lock().len()
    }

    /// Waits until the token is cancelled.
    ///
    /// Dropping the returned future removes its subscription.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }

        let (tx, rx) = oneshot::channel::<()>();
        let _guard = SubscriptionGuard {
            token: self,
            id: self.subscribe(move || {
                let _ = tx.send(());
            }),
        };

        let _ = rx.await;
    }

    pub(crate) fn downgrade(&self) -> WeakCancellationToken {
        WeakCancellationToken {
            state: Arc::downgrade(&self.state),
        }
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A non-owning handle used by consumers that must not keep a token alive.
#[derive(Clone)]
pub(crate) struct WeakCancellationToken {
    state: Weak<TokenState>,
}

impl WeakCancellationToken {
    pub(crate) fn upgrade(&self) -> Option<CancellationToken> {
        self.state.upgrade().map(|state| CancellationToken { state })
    }
}

struct SubscriptionGuard<'a> {
    token: &'a CancellationToken,
    id: SubscriptionId,
}

impl Drop for SubscriptionGuard<'_> {
    fn drop(&mut self) {
        self.token.unsubscribe(self.id);
    }
}

fn invoke(id: SubscriptionId, callback: CancelCallback) {
    if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(callback)) {
        warn!(subscription = id.0, "Cancellation callback panicked: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PlMutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn test_token_default_not_cancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert_eq!(token.subscriber_count(), 0);
    }

    #[test]
    fn test_token_cancel() {
        let token = CancellationToken::new();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_token_cancel_idempotent() {
        let token = CancellationToken::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        token.subscribe(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        token.cancel();
        token.cancel();
        token.cancel();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_subscribe_before_cancellation() {
        let token = CancellationToken::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        token.subscribe(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(token.subscriber_count(), 1);

        token.cancel();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(token.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_after_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        // Should invoke immediately
        token.subscribe(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(token.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribers_run_in_registration_order() {
        let token = CancellationToken::new();
        let order = Arc::new(PlMutex::new(Vec::new()));

        for i in 0..5 {
            let order = order.clone();
            token.subscribe(move || order.lock().push(i));
        }

        token.cancel();
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unsubscribe() {
        let token = CancellationToken::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let id = token.subscribe(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(token.unsubscribe(id));
        assert!(!token.unsubscribe(id));

        token.cancel();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_callback_panic_suppressed() {
        let token = CancellationToken::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        token.subscribe(|| {
            panic!("Intentional panic");
        });
        token.subscribe(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Should not panic, and later subscribers still run
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_reenter_token() {
        let token = CancellationToken::new();
        let inner = token.clone();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        token.subscribe(move || {
            inner.cancel();
            inner.subscribe(move || {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            });
        });

        token.cancel();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_weak_handle_does_not_keep_token_alive() {
        let token = CancellationToken::new();
        let weak = token.downgrade();
        assert!(weak.upgrade().is_some());
        drop(token);
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_future_completes() {
        let token = CancellationToken::new();
        let clone = token.clone();

        let handle = tokio::spawn(async move {
            clone.cancelled().await;
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_future_returns_immediately_when_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancelled().await;
        assert_eq!(token.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_cancelled_future_unsubscribes() {
        let token = CancellationToken::new();

        let result = tokio::time::timeout(Duration::from_millis(10), token.cancelled()).await;
        assert!(result.is_err());
        assert_eq!(token.subscriber_count(), 0);
    }
}
