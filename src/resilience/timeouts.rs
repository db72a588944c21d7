//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound every outbound RPC with a deadline
//! - Turn an elapsed deadline into a gRPC `DeadlineExceeded` status
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The inner future is polled once before the deadline is checked, so a
//!   zero deadline only fails calls that do not complete immediately
//! - No retries: a failed call is reported once

use std::future::Future;
use std::time::Duration;

use tokio::time;

/// Run `call` with a deadline.
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, tonic::Status>
where
    F: Future<Output = Result<T, tonic::Status>>,
{
    match time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(tonic::Status::deadline_exceeded(format!(
            "no response within {:?}",
            deadline
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, tonic::Status>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_zero_deadline_on_slow_call() {
        let result = with_deadline(Duration::ZERO, async {
            time::sleep(Duration::from_millis(50)).await;
            Ok::<_, tonic::Status>(())
        })
        .await;
        assert_eq!(result.unwrap_err().code(), tonic::Code::DeadlineExceeded);
    }

    #[tokio::test]
    async fn test_call_error_is_kept() {
        let result: Result<(), _> =
            with_deadline(Duration::from_secs(1), async { Err(tonic::Status::unavailable("down")) }).await;
        assert_eq!(result.unwrap_err().code(), tonic::Code::Unavailable);
    }
}
