//! Retry execution.
//!
//! # Responsibilities
//! - Validate the policy before anything runs
//! - Invoke the unit of work until it succeeds or attempts run out
//! - Notify the observer and sleep between attempts
//! - Stop early when the cancellation token fires
//!
//! # State Transitions
//! ```text
//! Attempting(n) → Succeeded        on success
//! Attempting(n) → Attempting(n+1)  on failure, n < max_attempts
//! Attempting(n) → Exhausted        on failure, n == max_attempts
//! Attempting(n) → Cancelled        token fired during work or delay
//! ```
//!
//! The unit of work must be safe to run again; nothing here checks that.

use std::future::Future;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::observability::metrics;
use crate::resilience::error::RetryError;
use crate::resilience::observer::{LogObserver, RetryAttempt, RetryObserver};
use crate::resilience::policy::RetryPolicy;

/// Run `operation` under `policy`, logging each retry.
pub async fn execute_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    RetryExecutor::new(policy.clone()).run(operation).await
}

/// Executes a unit of work with bounded retries.
///
/// Each call to [`run`](Self::run) is independent; one executor can serve
/// many concurrent executions.
#[derive(Debug, Clone)]
pub struct RetryExecutor<O = LogObserver> {
    policy: RetryPolicy,
    operation: String,
    observer: O,
    cancel: Option<CancellationToken>,
}

impl RetryExecutor<LogObserver> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            operation: "request".to_string(),
            observer: LogObserver,
            cancel: None,
        }
    }
}

impl<O> RetryExecutor<O> {
    /// Label used in logs and metrics.
    pub fn named(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    /// Replace the retry observer.
    pub fn with_observer<P>(self, observer: P) -> RetryExecutor<P> {
        RetryExecutor {
            policy: self.policy,
            operation: self.operation,
            observer,
            cancel: self.cancel,
        }
    }

    /// Abort in-flight work or backoff delays when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Execute `operation`, returning the first success or a terminal error.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        O: RetryObserver<E>,
    {
        self.policy.validate()?;

        let span = tracing::debug_span!(
            "retry",
            operation = %self.operation,
            execution_id = %Uuid::new_v4()
        );
        self.run_attempts(&mut operation).instrument(span).await
    }

    async fn run_attempts<T, E, F, Fut>(&self, operation: &mut F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        O: RetryObserver<E>,
    {
        let max_attempts = self.policy.max_attempts;

        if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(self.cancelled(0));
        }

        let mut attempt = 1;
        loop {
            tracing::debug!(attempt, max_attempts, "Starting attempt");

            let result = match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(self.cancelled(attempt)),
                    result = operation() => result,
                },
                None => operation().await,
            };

            let error = match result {
                Ok(value) => {
                    tracing::debug!(attempts = attempt, "Attempt succeeded");
                    metrics::record_outcome(&self.operation, "success", attempt);
                    return Ok(value);
                }
                Err(error) => error,
            };

            if attempt >= max_attempts {
                tracing::debug!(attempts = attempt, "Retry attempts exhausted");
                metrics::record_outcome(&self.operation, "exhausted", attempt);
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    source: error,
                });
            }

            let delay = self.policy.delay_after(attempt);
            metrics::record_retry(&self.operation);
            self.observer.on_retry(&RetryAttempt {
                operation: &self.operation,
                attempt,
                max_attempts,
                error: &error,
                delay,
            });
            drop(error);

            match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(self.cancelled(attempt)),
                    _ = sleep(delay) => {}
                },
                None => sleep(delay).await,
            }

            attempt += 1;
        }
    }

    fn cancelled<E>(&self, attempts: u32) -> RetryError<E> {
        tracing::debug!(attempts, "Execution cancelled");
        metrics::record_outcome(&self.operation, "cancelled", attempts);
        RetryError::Cancelled { attempts }
    }
}
