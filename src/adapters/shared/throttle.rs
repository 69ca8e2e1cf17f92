//! Per-client request spacing
//!
//! Each adapter owns one `RequestThrottle`. There is no process-wide
//! timestamp: two adapters talking to the same exchange pace themselves
//! independently.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between consecutive requests of one client
#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until at least `min_interval` has passed since the previous call
    ///
    /// The lock is held across the sleep so concurrent callers on the same
    /// client queue up instead of bursting together.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let delay = self.min_interval - elapsed;
                tracing::trace!(delay_ms = delay.as_millis() as u64, "Throttling request");
                tokio::time::sleep(delay).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new(crate::config::constants::min_request_interval())
    }
}
