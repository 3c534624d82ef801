//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Caller's unit of work (e.g. one JSON-RPC call):
//!     → policy.rs (validated before the first attempt)
//!     → retries.rs (invoke, retry on failure, stop on first success)
//!     → observer.rs (notified once per failed non-final attempt)
//!     → backoff.rs (delay before the next attempt)
//!     → error.rs (Exhausted / Cancelled / InvalidPolicy)
//! ```
//!
//! # Design Decisions
//! - Fixed delay is the default; exponential backoff is opt-in
//! - Intermediate failures only reach observers, never the caller
//! - The last failure is kept as the source of `RetryError::Exhausted`

pub mod backoff;
pub mod error;
pub mod observer;
pub mod policy;
pub mod retries;

pub use error::{PolicyError, RetryError};
pub use observer::{LogObserver, NoopObserver, RetryAttempt, RetryObserver};
pub use policy::{BackoffStrategy, RetryPolicy};
pub use retries::{execute_with_retry, RetryExecutor};
