//! The producer side of a deferred value.

use super::{DeferredPromise, Settlement};
use crate::cancellation::{CancellationToken, SubscriptionId, WeakCancellationToken};
use crate::errors::DeferredError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, trace};

/// A closure handed the deferred at construction, for bridging callback APIs.
pub type Executor<T> = Box<dyn FnOnce(&Deferred<T>) + Send>;

/// Construction options for a [`Deferred`].
pub struct DeferredOptions<T> {
    /// Reject with [`DeferredError::TimedOut`] if still pending after this long.
    /// A zero duration disables the timeout.
    pub timeout: Option<Duration>,
    /// Reject with [`DeferredError::Cancelled`] when this token fires.
    pub cancellation_token: Option<CancellationToken>,
    /// Runs once, immediately, with the new deferred.
    pub executor: Option<Executor<T>>,
}

impl<T> Default for DeferredOptions<T> {
    fn default() -> Self {
        Self {
            timeout: None,
            cancellation_token: None,
            executor: None,
        }
    }
}

impl<T> DeferredOptions<T> {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the cancellation token.
    #[must_use]
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Sets the executor.
    #[must_use]
    pub fn with_executor<F>(mut self, executor: F) -> Self
    where
        F: FnOnce(&Deferred<T>) + Send + 'static,
    {
        self.executor = Some(Box::new(executor));
        self
    }
}

impl<T> std::fmt::Debug for DeferredOptions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredOptions")
            .field("timeout", &self.timeout)
            .field("cancellation_token", &self.cancellation_token)
            .field("executor", &self.executor.is_some())
            .finish()
    }
}

struct Shared<T> {
    state: watch::Sender<Settlement<T>>,
    timer: Mutex<Option<AbortHandle>>,
    subscription: Mutex<Option<(WeakCancellationToken, SubscriptionId)>>,
}

/// A value settled later by its producer, a timeout, or a cancellation token.
///
/// Exactly one settlement takes effect; whichever source reaches it first
/// wins, and the timer and token subscription are released at that point.
/// Clones are additional settle handles for the same value.
pub struct Deferred<T> {
    inner: Arc<Shared<T>>,
}

impl<T: Send + Sync + 'static> Deferred<T> {
    /// Creates a deferred with no timeout and no cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DeferredOptions::default())
    }

    /// Creates a deferred from the given options.
    ///
    /// The timer and token subscription are armed before the executor runs.
    ///
    /// # Panics
    ///
    /// Panics if a non-zero timeout is configured outside a Tokio runtime.
    #[must_use]
    pub fn with_options(options: DeferredOptions<T>) -> Self {
        let (state, _) = watch::channel(Settlement::Pending);
        let deferred = Self {
            inner: Arc::new(Shared {
                state,
                timer: Mutex::new(None),
                subscription: Mutex::new(None),
            }),
        };

        if let Some(timeout) = options.timeout.filter(|t| !t.is_zero()) {
            deferred.arm_timer(timeout);
        }

        if let Some(token) = options.cancellation_token {
            deferred.subscribe_to(&token);
        }

        if let Some(executor) = options.executor {
            executor(&deferred);
        }

        deferred
    }

    /// Settles successfully.
    ///
    /// Returns true if this call settled the deferred, false if it was
    /// already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Settlement::Resolved(value))
    }

    /// Rejects with [`DeferredError::Rejected`].
    ///
    /// Returns true if this call settled the deferred.
    pub fn reject(&self, reason: impl Into<String>) -> bool {
        self.settle(Settlement::Rejected(DeferredError::Rejected(reason.into())))
    }

    /// Rejects with an arbitrary [`DeferredError`].
    pub fn reject_with(&self, error: DeferredError) -> bool {
        self.settle(Settlement::Rejected(error))
    }

    /// Returns a handle that can be awaited for the outcome.
    #[must_use]
    pub fn promise(&self) -> DeferredPromise<T> {
        DeferredPromise::new(self.inner.state.subscribe())
    }

    /// Returns true once settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inner.state.borrow().is_settled()
    }

    /// Returns true while still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.is_settled()
    }

    fn settle(&self, outcome: Settlement<T>) -> bool {
        self.inner.settle(outcome)
    }

    fn arm_timer(&self, timeout: Duration) {
        let shared = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let Some(shared) = shared.upgrade() else {
                return;
            };
            if shared.settle(Settlement::Rejected(DeferredError::TimedOut)) {
                debug!(?timeout, "Deferred timed out");
            }
        });

        *self.inner.timer.lock() = Some(handle.abort_handle());

        if self.is_settled() {
            self.inner.disarm();
        }
    }

    fn subscribe_to(&self, token: &CancellationToken) {
        let shared = Arc::downgrade(&self.inner);
        let id = token.subscribe(move || {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            if shared.settle(Settlement::Rejected(DeferredError::Cancelled)) {
                debug!("Deferred cancelled");
            }
        });

        *self.inner.subscription.lock() = Some((token.downgrade(), id));

        if self.is_settled() {
            self.inner.disarm();
        }
    }
}

impl<T> Shared<T> {
    fn settle(&self, outcome: Settlement<T>) -> bool {
        let settled = self.state.send_if_modified(|state| {
            if state.is_settled() {
                return false;
            }
            *state = outcome;
            true
        });

        if settled {
            trace!("Deferred settled");
            self.disarm();
        }

        settled
    }

    /// Releases the timer and the token subscription. Safe to call repeatedly.
    fn disarm(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }

        let subscription = self.subscription.lock().take();
        release(subscription);
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().take() {
            timer.abort();
        }
        release(self.subscription.get_mut().take());
    }
}

fn release(subscription: Option<(WeakCancellationToken, SubscriptionId)>) {
    if let Some((token, id)) = subscription {
        if let Some(token) = token.upgrade() {
            token.unsubscribe(id);
        }
    }
}

impl<T: Send + Sync + 'static> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.inner.state.borrow() {
            Settlement::Pending => "pending",
            Settlement::Resolved(_) => "resolved",
            Settlement::Rejected(_) => "rejected",
        };
        f.debug_struct("Deferred").field("state", &state).finish()
    }
}
