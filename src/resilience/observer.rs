//! Retry notifications.
//!
//! Observers see every failed attempt that will be retried. They are for
//! diagnostics only and cannot change what the executor does next.

use std::fmt::Display;
use std::time::Duration;

/// A failed attempt that is about to be retried.
#[derive(Debug)]
pub struct RetryAttempt<'a, E> {
    /// Operation label given to the executor.
    pub operation: &'a str,
    /// 1-based number of the attempt that failed.
    pub attempt: u32,
    pub max_attempts: u32,
    /// Why the attempt failed.
    pub error: &'a E,
    /// Delay before the next attempt.
    pub delay: Duration,
}

/// Receives a notification before each retry.
pub trait RetryObserver<E>: Send + Sync {
    fn on_retry(&self, attempt: &RetryAttempt<'_, E>);
}

impl<E, F> RetryObserver<E> for F
where
    F: Fn(&RetryAttempt<'_, E>) + Send + Sync,
{
    fn on_retry(&self, attempt: &RetryAttempt<'_, E>) {
        self(attempt)
    }
}

/// Logs each retry as a structured `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<E: Display> RetryObserver<E> for LogObserver {
    fn on_retry(&self, attempt: &RetryAttempt<'_, E>) {
        tracing::warn!(
            operation = attempt.operation,
            attempt = attempt.attempt,
            max_attempts = attempt.max_attempts,
            delay_ms = attempt.delay.as_millis() as u64,
            error = %attempt.error,
            "Attempt failed, retrying"
        );
    }
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<E> RetryObserver<E> for NoopObserver {
    fn on_retry(&self, _attempt: &RetryAttempt<'_, E>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_observer() {
        let seen = Mutex::new(Vec::new());
        let observer = |attempt: &RetryAttempt<'_, String>| {
            seen.lock().unwrap().push((attempt.attempt, attempt.error.clone()));
        };

        let error = "timeout".to_string();
        observer.on_retry(&RetryAttempt {
            operation: "getSlot",
            attempt: 2,
            max_attempts: 5,
            error: &error,
            delay: Duration::from_millis(2000),
        });

        assert_eq!(*seen.lock().unwrap(), vec![(2, "timeout".to_string())]);
    }

    #[test]
    fn test_log_observer_does_not_panic_without_subscriber() {
        let error = "connection refused";
        LogObserver.on_retry(&RetryAttempt {
            operation: "getBalance",
            attempt: 1,
            max_attempts: 3,
            error: &error,
            delay: Duration::ZERO,
        });
    }
}
