//! Retry policy definitions.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::resilience::backoff::calculate_backoff;
use crate::resilience::error::PolicyError;

/// How the delay between attempts evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum BackoffStrategy {
    /// The same `delay_ms` before every retry.
    #[default]
    Fixed,

    /// `delay_ms` doubled after each failure, capped at `max_delay_ms`.
    Exponential {
        #[serde(default = "default_max_delay_ms")]
        max_delay_ms: u64,

        /// Add up to 10% random jitter to each delay.
        #[serde(default = "default_jitter")]
        jitter: bool,
    },
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_jitter() -> bool {
    true
}

/// Retry configuration for a single execution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,

    /// Delay between attempts in milliseconds.
    pub delay_ms: i64,

    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 2000,
            backoff: BackoffStrategy::Fixed,
        }
    }
}

impl RetryPolicy {
    /// Policy with a constant delay between attempts.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: i64::try_from(delay.as_millis()).unwrap_or(i64::MAX),
            backoff: BackoffStrategy::Fixed,
        }
    }

    /// Policy whose delay doubles after each failure.
    pub fn exponential(max_attempts: u32, base: Duration, max_delay: Duration, jitter: bool) -> Self {
        Self {
            max_attempts,
            delay_ms: i64::try_from(base.as_millis()).unwrap_or(i64::MAX),
            backoff: BackoffStrategy::Exponential {
                max_delay_ms: u64::try_from(max_delay.as_millis()).unwrap_or(u64::MAX),
                jitter,
            },
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_attempts < 1 {
            return Err(PolicyError::ZeroAttempts);
        }
        if self.delay_ms < 0 {
            return Err(PolicyError::NegativeDelay(self.delay_ms));
        }
        if let BackoffStrategy::Exponential { max_delay_ms, .. } = self.backoff {
            if max_delay_ms < self.delay_ms as u64 {
                return Err(PolicyError::CapBelowDelay {
                    delay_ms: self.delay_ms,
                    max_delay_ms,
                });
            }
        }
        Ok(())
    }

    /// Delay to wait after `attempt` (1-based) failed, before the next one.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let base_ms = self.delay_ms.max(0) as u64;
        match self.backoff {
            BackoffStrategy::Fixed => Duration::from_millis(base_ms),
            BackoffStrategy::Exponential {
                max_delay_ms,
                jitter,
            } => calculate_backoff(attempt, base_ms, max_delay_ms, jitter),
        }
    }
}
