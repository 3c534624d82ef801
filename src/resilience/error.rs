//! Retry error taxonomy.

use thiserror::Error;

/// A retry policy that cannot be executed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("delay_ms must not be negative (got {0})")]
    NegativeDelay(i64),

    #[error("max_delay_ms ({max_delay_ms}) must not be below delay_ms ({delay_ms})")]
    CapBelowDelay { delay_ms: i64, max_delay_ms: u64 },
}

/// Terminal outcome of a failed execution.
///
/// Per-attempt failures are never returned directly; they reach the caller
/// only as the source of `Exhausted`, or through a [`RetryObserver`].
///
/// [`RetryObserver`]: crate::resilience::RetryObserver
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The policy was rejected before any attempt was made.
    #[error("invalid retry policy: {0}")]
    InvalidPolicy(#[from] PolicyError),

    /// Every configured attempt failed.
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted { attempts: u32, source: E },

    /// The execution was cancelled during an attempt or a backoff delay.
    #[error("cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl<E> RetryError<E> {
    /// Number of attempts that were started.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::InvalidPolicy(_) => 0,
            RetryError::Exhausted { attempts, .. } | RetryError::Cancelled { attempts } => {
                *attempts
            }
        }
    }

    /// The failure of the final attempt, if all attempts were exhausted.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn into_last_error(self) -> Option<E> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("network unreachable")]
    struct Unreachable;

    #[test]
    fn test_exhausted_preserves_cause() {
        let err: RetryError<Unreachable> = RetryError::Exhausted {
            attempts: 5,
            source: Unreachable,
        };
        assert_eq!(err.to_string(), "gave up after 5 attempts: network unreachable");
        assert_eq!(err.attempts(), 5);
        assert_eq!(err.source().unwrap().to_string(), "network unreachable");
        assert!(err.is_exhausted());
        assert!(err.into_last_error().is_some());
    }

    #[test]
    fn test_policy_error_conversion() {
        let err: RetryError<Unreachable> = PolicyError::NegativeDelay(-1).into();
        assert_eq!(err.attempts(), 0);
        assert!(err.last_error().is_none());
        assert_eq!(
            err.to_string(),
            "invalid retry policy: delay_ms must not be negative (got -1)"
        );
    }

    #[test]
    fn test_cancelled_is_distinct() {
        let err: RetryError<Unreachable> = RetryError::Cancelled { attempts: 2 };
        assert!(err.is_cancelled());
        assert!(!err.is_exhausted());
        assert!(err.last_error().is_none());
    }
}
