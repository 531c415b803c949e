//! Cooperative cancellation.
//!
//! This module provides:
//! - CancellationToken, a one-shot broadcast signal
//! - sleep helpers that can be interrupted by a token

mod sleep;
mod token;

pub use sleep::{sleep, sleep_ct};
pub use token::{CancelCallback, CancellationToken, SubscriptionId};

pub(crate) use token::WeakCancellationToken;
