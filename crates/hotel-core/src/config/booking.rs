//! Booking and payment ledger configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning for the booking and payment ledgers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How many times an operation that lost a serialization race is retried.
    #[serde(default = "default_integrity_retries")]
    pub integrity_retries: u32,
    /// Delay before the first retry, in milliseconds. Doubles on each attempt.
    #[serde(default = "default_integrity_backoff")]
    pub integrity_backoff_ms: u64,
}

impl BookingConfig {
    /// Backoff before the given retry attempt (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.integrity_backoff_ms.saturating_mul(factor))
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            integrity_retries: default_integrity_retries(),
            integrity_backoff_ms: default_integrity_backoff(),
        }
    }
}

fn default_integrity_retries() -> u32 {
    1
}

fn default_integrity_backoff() -> u64 {
    50
}
