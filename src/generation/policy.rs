//! Timeout and retry settings for the generation collaborator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for calls to the generation service.
///
/// Durations are stored in milliseconds so the struct can be loaded from the
/// config file and environment directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPolicy {
    /// Latency of the simulated generation service.
    /// Default: 800 ms
    pub simulated_latency_ms: u64,

    /// Maximum time allowed for a single generation request.
    /// Default: 30 seconds
    pub request_timeout_ms: u64,

    /// Number of attempts before the run is failed.
    /// Default: 3
    pub max_attempts: u32,

    /// Base delay between attempts; attempt `n` waits `n * retry_backoff`.
    /// Default: 500 ms
    pub retry_backoff_ms: u64,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 800,
            request_timeout_ms: 30_000,
            max_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl GenerationPolicy {
    /// Creates a new policy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated service latency.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency_ms = duration_ms(latency);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = duration_ms(timeout);
        self
    }

    /// Sets the number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the base retry backoff.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff_ms = duration_ms(backoff);
        self
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Attempts to make; at least one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before the attempt following `attempt` (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
