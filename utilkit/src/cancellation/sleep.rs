//! Sleep helpers.

use super::CancellationToken;
use crate::errors::CancelledError;
use std::time::Duration;

/// Waits for the given duration.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Waits for the given duration unless `token` is cancelled first.
///
/// Returns `Err(CancelledError)` if the token fires before the timer elapses,
/// including when it was already cancelled. The token subscription is
/// released either way.
pub async fn sleep_ct(duration: Duration, token: &CancellationToken) -> Result<(), CancelledError> {
    if token.is_cancelled() {
        return Err(CancelledError);
    }

    tokio::select! {
        () = token.cancelled() => Err(CancelledError),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_waits() {
        let start = Instant::now();
        sleep(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_ct_completes() {
        let token = CancellationToken::new();
        let result = sleep_ct(Duration::from_millis(100), &token).await;
        assert_eq!(result, Ok(()));
        assert_eq!(token.subscriber_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_ct_cancelled() {
        let token = CancellationToken::new();
        let clone = token.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            clone.cancel();
        });

        let start = Instant::now();
        let result = sleep_ct(Duration::from_secs(10), &token).await;
        assert_eq!(result, Err(CancelledError));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_sleep_ct_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(sleep_ct(Duration::from_secs(10), &token).await, Err(CancelledError));
    }
}
