//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_retry_attempts_total` (counter): retries scheduled, by operation
//! - `rpc_retry_outcomes_total` (counter): finished executions, by
//!   operation and outcome (success, exhausted, cancelled)
//! - `rpc_retry_attempts_per_execution` (histogram): attempts used

use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and start its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_retry(operation: &str) {
    counter!("rpc_retry_attempts_total", "operation" => operation.to_string()).increment(1);
}

pub fn record_outcome(operation: &str, outcome: &'static str, attempts: u32) {
    counter!(
        "rpc_retry_outcomes_total",
        "operation" => operation.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "rpc_retry_attempts_per_execution",
        "operation" => operation.to_string()
    )
    .record(attempts as f64);
}
