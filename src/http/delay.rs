//! Artificial response delay.
//!
//! Every handler awaits [`DelayPolicy::apply`] before returning its response,
//! on success and failure alike. The response is only written once the
//! handler returns, so a delayed request still holds its connection and is
//! counted as in flight for the whole delay. A graceful drain therefore
//! waits for it.
//!
//! The delay is fixed for the process lifetime. It is the only brute-force
//! deterrent on `/shutdown`; there is no rate limiting or lockout.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    duration: Duration,
}

impl DelayPolicy {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Suspend the calling handler for the configured duration.
    pub async fn apply(&self) {
        if !self.duration.is_zero() {
            tokio::time::sleep(self.duration).await;
        }
    }
}
