//! resilient-rpc
//!
//! Issues a single JSON-RPC call with bounded retries.
//!
//! ```text
//!   CLI args ──▶ config (TOML + overrides) ──▶ logging / metrics
//!                         │
//!                         ▼
//!   Ctrl-C ──▶ cancel ──▶ RetryExecutor ──▶ RpcClient ──▶ endpoint(s)
//!                         │
//!                         ▼
//!                 stdout (pretty JSON)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use resilient_rpc::config::{load_config, validate_config, AppConfig, ConfigError};
use resilient_rpc::observability::{logging, metrics};
use resilient_rpc::resilience::RetryExecutor;
use resilient_rpc::rpc::RpcClient;

#[derive(Parser)]
#[command(name = "resilient-rpc")]
#[command(about = "Issue JSON-RPC calls with bounded retries", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the primary RPC endpoint.
    #[arg(short, long)]
    url: Option<String>,

    /// Override the total number of attempts.
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Override the delay between attempts, in milliseconds.
    #[arg(long, allow_negative_numbers = true)]
    delay_ms: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call an arbitrary method
    Call {
        /// JSON-RPC method name, e.g. getSlot
        method: String,
        /// Parameters as a JSON array or object
        params: Option<String>,
    },
    /// Check endpoint health (getHealth)
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(url) = cli.url {
        config.rpc.url = url;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.retry.max_attempts = max_attempts;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.retry.delay_ms = delay_ms;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        rpc_url = %config.rpc.url,
        max_attempts = config.retry.max_attempts,
        delay_ms = config.retry.delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let (method, params) = match cli.command {
        Commands::Call { method, params } => {
            let params = match params {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Value::Null,
            };
            (method, params)
        }
        Commands::Health => ("getHealth".to_string(), Value::Null),
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling");
            on_signal.cancel();
        }
    });

    let client = RpcClient::new(&config.rpc)?;
    let executor = RetryExecutor::new(config.retry.clone())
        .named(method.clone())
        .with_cancellation(cancel);

    match client.call_with_executor::<Value, _>(&executor, &method, params).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(method = %method, attempts = e.attempts(), error = %e, "Request failed");
            Err(e.into())
        }
    }
}
