//! Retry of ledger transactions that lost a serialization race.

use std::future::Future;

use tracing::warn;

use hotel_core::config::BookingConfig;
use hotel_core::result::AppResult;

/// Run `op`, retrying it after a backoff while it fails with a retryable
/// (`Integrity`) error and attempts remain.
pub(crate) async fn with_integrity_retry<T, F, Fut>(
    config: &BookingConfig,
    operation: &'static str,
    mut op: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Err(e) if e.is_retryable() && attempt < config.integrity_retries => {
                attempt += 1;
                let delay = config.backoff_for(attempt);
                warn!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after lost serialization race"
                );
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}
