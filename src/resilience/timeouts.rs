//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap the upstream round trip with the configured deadline
//! - Cancel the pending call cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - No deadline unless one is configured
//! - Timed-out requests return 504 Gateway Timeout

use std::future::Future;
use std::time::Duration;

use crate::proxy::ProxyError;

/// Await `future`, failing with [`ProxyError::Timeout`] once `deadline` elapses.
pub async fn with_deadline<F>(deadline: Option<Duration>, future: F) -> Result<F::Output, ProxyError>
where
    F: Future,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| ProxyError::Timeout(limit)),
        None => Ok(future.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_deadline_waits() {
        let out = with_deadline(None, async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            7
        })
        .await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_deadline_elapses() {
        let out = with_deadline(Some(Duration::from_millis(10)), std::future::pending::<()>()).await;
        assert!(matches!(out, Err(ProxyError::Timeout(d)) if d == Duration::from_millis(10)));
    }
}
