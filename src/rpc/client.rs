//! JSON-RPC client with timeout and endpoint failover.
//!
//! # Responsibilities
//! - POST JSON-RPC 2.0 requests to the configured endpoints
//! - Enforce a per-request deadline
//! - Fail over to the next endpoint on transport errors
//! - Run whole calls through the retry executor

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use crate::config::RpcConfig;
use crate::resilience::{RetryError, RetryExecutor, RetryObserver, RetryPolicy};
use crate::rpc::types::{RpcError, RpcRequest, RpcResponse, RpcResult};

/// JSON-RPC client wrapper with failover support.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    /// Primary endpoint first, then failovers.
    endpoints: Vec<Url>,
    timeout_secs: u64,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    /// Create a client using a default HTTP client.
    pub fn new(config: &RpcConfig) -> RpcResult<Self> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client on top of an existing HTTP client.
    ///
    /// An unparsable primary URL is an error; unparsable failover URLs are
    /// skipped with a warning.
    pub fn with_http_client(config: &RpcConfig, http: reqwest::Client) -> RpcResult<Self> {
        let primary = Url::parse(&config.url).map_err(|e| RpcError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        let mut endpoints = vec![primary];
        for url_str in &config.failover_urls {
            match Url::parse(url_str) {
                Ok(url) => endpoints.push(url),
                Err(e) => {
                    tracing::warn!(url = %url_str, error = %e, "Ignoring invalid failover RPC URL")
                }
            }
        }

        tracing::debug!(
            primary = %endpoints[0],
            failovers = endpoints.len() - 1,
            timeout_secs = config.timeout_secs,
            "RPC client initialized"
        );

        Ok(Self {
            http,
            endpoints,
            timeout_secs: config.timeout_secs,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Issue one call, trying each endpoint in order.
    ///
    /// Returns the first endpoint's answer that is not a transport failure.
    /// When every endpoint fails, the last failure is returned.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> RpcResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, &params);

        let mut last_error = None;
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            match self.call_endpoint(endpoint, &request).await {
                Ok(value) => {
                    return serde_json::from_value(value)
                        .map_err(|e| RpcError::Decode(e.to_string()));
                }
                Err(e) if e.is_transport() => {
                    tracing::warn!(endpoint_idx = i, method, error = %e, "RPC endpoint failed");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| RpcError::Decode("no endpoints configured".to_string())))
    }

    async fn call_endpoint(&self, endpoint: &Url, request: &RpcRequest<'_>) -> RpcResult<Value> {
        let exchange = async {
            let response = self
                .http
                .post(endpoint.clone())
                .json(request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(RpcError::Status(status.as_u16()));
            }

            let body: RpcResponse = response
                .json()
                .await
                .map_err(|e| RpcError::Decode(e.to_string()))?;
            body.into_result()
        };

        match timeout(self.timeout(), exchange).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.timeout_secs)),
        }
    }

    /// Issue a call under `policy`, logging each retry.
    pub async fn call_with_retry<T: DeserializeOwned>(
        &self,
        policy: &RetryPolicy,
        method: &str,
        params: Value,
    ) -> Result<T, RetryError<RpcError>> {
        let executor = RetryExecutor::new(policy.clone()).named(method);
        self.call_with_executor(&executor, method, params).await
    }

    /// Issue a call through a preconfigured executor.
    pub async fn call_with_executor<T, O>(
        &self,
        executor: &RetryExecutor<O>,
        method: &str,
        params: Value,
    ) -> Result<T, RetryError<RpcError>>
    where
        T: DeserializeOwned,
        O: RetryObserver<RpcError>,
    {
        executor
            .run(|| self.call::<T>(method, params.clone()))
            .await
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoints", &self.endpoints.len())
            .field("primary", &self.endpoints[0].as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
