//! Ambient log context.
//!
//! A context label is bound to a logical call chain rather than to a thread:
//! it stays visible across `.await` points inside the scoped future, nested
//! scopes shadow outer ones, and the outer label comes back when the inner
//! scope ends. Tasks spawned from inside a scope start without a label unless
//! their future is wrapped with [`inherit_context`].

use std::future::Future;
use tokio::task::futures::TaskLocalFuture;

tokio::task_local! {
    static ASYNC_CONTEXT: String;
}

/// Returns the label of the innermost active scope, if any.
#[must_use]
pub fn current_context() -> Option<String> {
    ASYNC_CONTEXT.try_with(String::clone).ok()
}

/// Runs `future` with `label` as the ambient context.
pub fn in_context<F>(label: impl Into<String>, future: F) -> TaskLocalFuture<String, F>
where
    F: Future,
{
    ASYNC_CONTEXT.scope(label.into(), future)
}

/// Runs `f` with `label` as the ambient context.
pub fn with_context<R>(label: impl Into<String>, f: impl FnOnce() -> R) -> R {
    ASYNC_CONTEXT.sync_scope(label.into(), f)
}

/// Captures the current label so `future` reports it wherever it is polled.
///
/// Wrap futures with this before handing them to `tokio::spawn`.
pub fn inherit_context<F>(future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    let label = current_context();
    async move {
        match label {
            Some(label) => ASYNC_CONTEXT.scope(label, future).await,
            None => future.await,
        }
    }
}
