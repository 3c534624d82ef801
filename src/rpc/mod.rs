//! JSON-RPC client subsystem.
//!
//! # Data Flow
//! ```text
//! RpcConfig (primary URL, failovers, timeout)
//!     → client.rs (one request, endpoints tried in order)
//!     → resilience::RetryExecutor (whole call retried under the policy)
//! ```
//!
//! # Constraints
//! - Every request has a deadline
//! - Transport failures fail over to the next endpoint; errors returned by
//!   the server itself do not
//! - Method semantics are opaque; results are plain JSON values

pub mod client;
pub mod types;

pub use client::RpcClient;
pub use types::{RpcError, RpcResult};
