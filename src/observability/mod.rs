//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Executor and RPC client produce:
//!     → logging.rs (structured log events, one span per execution)
//!     → metrics.rs (retry counters, attempts histogram)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Metrics go through the `metrics` facade; without an installed
//!   recorder every update is a no-op
//! - `RUST_LOG` overrides the configured log level

pub mod logging;
pub mod metrics;
