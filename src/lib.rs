//! Resilient JSON-RPC client library.
//!
//! Wraps unreliable remote calls (typically Solana JSON-RPC requests against
//! a hosted endpoint) in bounded retries with a fixed or exponential delay.

pub mod config;
pub mod observability;
pub mod resilience;
pub mod rpc;

pub use config::AppConfig;
pub use resilience::{execute_with_retry, RetryError, RetryExecutor, RetryPolicy};
pub use rpc::RpcClient;
