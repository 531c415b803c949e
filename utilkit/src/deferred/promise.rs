//! The consumer side of a deferred value.

use super::Settlement;
use crate::errors::DeferredError;
use futures::future::BoxFuture;
use std::future::IntoFuture;
use tokio::sync::watch;

/// An awaitable handle on a [`Deferred`](super::Deferred)'s outcome.
///
/// Any number of promises can be taken from one deferred; every one of them
/// observes the same outcome.
pub struct DeferredPromise<T> {
    rx: watch::Receiver<Settlement<T>>,
}

impl<T> DeferredPromise<T> {
    pub(crate) const fn new(rx: watch::Receiver<Settlement<T>>) -> Self {
        Self { rx }
    }

    /// Returns true once the deferred has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.rx.borrow().is_settled()
    }
}

impl<T: Clone> DeferredPromise<T> {
    /// Returns the outcome without waiting, or `None` while still pending.
    #[must_use]
    pub fn try_result(&self) -> Option<Result<T, DeferredError>> {
        self.rx.borrow().to_result()
    }

    /// Waits for the deferred to settle.
    ///
    /// Resolves to [`DeferredError::Abandoned`] if every settle handle is
    /// dropped while the value is still pending.
    #[allow(clippy::let_and_return)]
    pub async fn wait(mut self) -> Result<T, DeferredError> {
        // Bound to a local so the borrow of `self.rx` ends before `self` drops.
        let result = match self.rx.wait_for(Settlement::is_settled).await {
            Ok(state) => state.to_result().unwrap_or(Err(DeferredError::Abandoned)),
            Err(_) => Err(DeferredError::Abandoned),
        };
        result
    }
}

impl<T: Clone + Send + Sync + 'static> IntoFuture for DeferredPromise<T> {
    type Output = Result<T, DeferredError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}

impl<T> Clone for DeferredPromise<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> std::fmt::Debug for DeferredPromise<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredPromise")
            .field("settled", &self.is_settled())
            .finish()
    }
}
