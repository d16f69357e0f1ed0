use std::future::Future;
use std::time::Duration;
use tracing::{error, info};

/// Delay between reconnect attempts. Fixed cadence, no backoff, no
/// attempt cap.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Drives `connect` until it succeeds, sleeping [`RETRY_DELAY`]
/// between failures. Failure never escapes; the caller only ever
/// sees the connected value.
pub async fn connect_with_retry<T, E, F, Fut>(target: &str, mut connect: F) -> T
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    loop {
        match connect().await {
            Ok(value) => {
                info!("Connected to {}", target);
                return value;
            }
            Err(e) => {
                error!(
                    "Failed to connect to {}: {}, retrying in {}s",
                    target,
                    e,
                    RETRY_DELAY.as_secs()
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
