//! Deferred values.
//!
//! A [`Deferred`] is a future whose producer settles it later. Besides an
//! explicit `resolve`/`reject`, it can be settled by a timeout or by a
//! [`CancellationToken`](crate::cancellation::CancellationToken), whichever
//! comes first.

#[allow(clippy::module_inception)]
mod deferred;
mod promise;

pub use deferred::{Deferred, DeferredOptions, Executor};
pub use promise::DeferredPromise;

use crate::errors::DeferredError;

/// The settlement cell shared between a [`Deferred`] and its promises.
#[derive(Debug, Clone)]
pub(crate) enum Settlement<T> {
    Pending,
    Resolved(T),
    Rejected(DeferredError),
}

impl<T> Settlement<T> {
    pub(crate) const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl<T: Clone> Settlement<T> {
    pub(crate) fn to_result(&self) -> Option<Result<T, DeferredError>> {
        match self {
            Self::Pending => None,
            Self::Resolved(value) => Some(Ok(value.clone())),
            Self::Rejected(err) => Some(Err(err.clone())),
        }
    }
}
