//! Retry policy: attempt bound and backoff schedule.
//!
//! [`RetryPolicy`] groups the static parameters that control the retry
//! loop in
//! [`GenerateBatchUseCase`](crate::use_cases::generate_batch::GenerateBatchUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry loop control parameters.
///
/// Backoff doubles with each completed attempt and is capped. Rate-limit
/// failures use the larger base and cap so a throttled upstream is not
/// hammered at the generic cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts per generation call, first attempt included.
    pub max_attempts: u32,
    /// Backoff base for generic failures.
    pub base_delay: Duration,
    /// Backoff ceiling for generic failures.
    pub max_delay: Duration,
    /// Backoff base after a rate-limit failure.
    pub rate_limit_base_delay: Duration,
    /// Backoff ceiling after a rate-limit failure.
    pub rate_limit_max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
            rate_limit_base_delay: Duration::from_secs(5),
            rate_limit_max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Backoff to apply after the given 1-based attempt fails.
    pub fn delay_after(&self, attempt: u32, rate_limited: bool) -> Duration {
        let (base, cap) = if rate_limited {
            (self.rate_limit_base_delay, self.rate_limit_max_delay)
        } else {
            (self.base_delay, self.max_delay)
        };
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        base.saturating_mul(factor).min(cap)
    }
}
