//! JSON-RPC wire types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during a JSON-RPC call.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Endpoint URL could not be parsed.
    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Server returned a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Server { code: i64, message: String },

    /// Response body was not a valid JSON-RPC response.
    #[error("malformed RPC response: {0}")]
    Decode(String),
}

impl RpcError {
    /// Whether another endpoint might answer where this one failed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RpcError::Http(_) | RpcError::Status(_) | RpcError::Timeout(_)
        )
    }
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "is_null")]
    pub params: &'a Value,
}

fn is_null(params: &&Value) -> bool {
    params.is_null()
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: &'a Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    /// Split into the result value or the server's error.
    pub fn into_result(self) -> RpcResult<Value> {
        match self.error {
            Some(err) => Err(RpcError::Server {
                code: err.code,
                message: err.message,
            }),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}
