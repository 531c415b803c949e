//! Error types for utilkit.
//!
//! Every failure in this crate surfaces to the caller. Nothing is retried and
//! nothing is swallowed.

use thiserror::Error;

pub use crate::log::ParseLevelError;

/// The umbrella error type for utilkit operations.
#[derive(Debug, Clone, Error)]
pub enum UtilkitError {
    /// A deferred value failed to settle successfully.
    #[error("{0}")]
    Deferred(#[from] DeferredError),

    /// A cancellable operation was cancelled.
    #[error("{0}")]
    Cancelled(#[from] CancelledError),

    /// A log level string could not be parsed.
    #[error("{0}")]
    ParseLevel(#[from] ParseLevelError),
}

/// Error returned when an operation is cancelled through a
/// [`CancellationToken`](crate::cancellation::CancellationToken).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("Cancelled")]
pub struct CancelledError;

/// The ways a [`Deferred`](crate::deferred::Deferred) can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeferredError {
    /// The configured timeout elapsed before settlement.
    #[error("Timed out")]
    TimedOut,

    /// The associated cancellation token fired before settlement.
    #[error("Cancelled")]
    Cancelled,

    /// The producer rejected explicitly.
    #[error("{0}")]
    Rejected(String),

    /// Every settle handle was dropped while the value was still pending.
    #[error("Deferred dropped before settlement")]
    Abandoned,
}

impl DeferredError {
    /// Creates a rejection with the given reason.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Returns true if this is a timeout rejection.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// Returns true if this is a cancellation rejection.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<CancelledError> for DeferredError {
    fn from(_: CancelledError) -> Self {
        Self::Cancelled
    }
}
