use std::future::Future;
use std::time::Duration;

use crate::constants::retry::{BASE_DELAY_MS, MAX_DELAY_MS};
use crate::error::Result;

/// Delay before retry `attempt` (0-based): `min(1000 * 2^attempt, 30000)` ms.
pub fn retry_delay(attempt: u32) -> Duration {
    let ms = BASE_DELAY_MS
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(MAX_DELAY_MS);
    Duration::from_millis(ms)
}

/// Run `op` until it succeeds or `max_retries` retries have failed.
///
/// The last error is returned to the caller.
pub async fn with_retry<T, F, Fut>(max_retries: u32, label: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries => {
                let delay = retry_delay(attempt);
                tracing::warn!(
                    query = label,
                    attempt = attempt + 1,
                    transient = e.is_transient(),
                    "Fetch failed, retrying in {:?}: {}",
                    delay,
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
