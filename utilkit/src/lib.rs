//! # Utilkit
//!
//! Runtime plumbing shared by small async services:
//!
//! - **Logging**: leveled loggers with per-instance and ambient context,
//!   a process-wide registry, callbacks, and console or `tracing` output
//! - **Cancellation**: cooperative tokens with subscriber callbacks and
//!   cancellable sleeps
//! - **Deferred results**: externally settled futures with optional timeout
//!   and cancellation
//! - **Helpers**: timestamps, bit-field conversions, clamping and rounding,
//!   hex dumps, and error message extraction
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use utilkit::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let token = CancellationToken::new();
//! let deferred = Deferred::<u32>::with_options(
//!     DeferredOptions::new()
//!         .with_timeout(Duration::from_secs(5))
//!         .with_cancellation_token(token.clone()),
//! );
//!
//! let promise = deferred.promise();
//! deferred.resolve(42);
//! assert_eq!(promise.await, Ok(42));
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

#[macro_use]
mod macros;

pub mod cancellation;
pub mod deferred;
pub mod errors;
pub mod log;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::{sleep, sleep_ct, CancellationToken, SubscriptionId};
    pub use crate::deferred::{Deferred, DeferredOptions, DeferredPromise};
    pub use crate::errors::{CancelledError, DeferredError, UtilkitError};
    pub use crate::log::{
        in_context, with_context, LogConfig, LogLevel, LogOutput, LogRegistry, Logger,
    };
    pub use crate::utils::{
        get_error_message, hex_encode, iso_timestamp, limit, round, Timestamp,
    };
}
