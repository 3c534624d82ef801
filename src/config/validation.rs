//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and endpoint URLs.
//! Every problem is reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::resilience::PolicyError;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("retry: {0}")]
    Retry(#[from] PolicyError),

    #[error("rpc.{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("rpc.timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("observability.metrics_address: invalid socket address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.retry.validate() {
        errors.push(ValidationError::Retry(e));
    }

    check_url("url", &config.rpc.url, &mut errors);
    for url in &config.rpc.failover_urls {
        check_url("failover_urls", url, &mut errors);
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.retry.max_attempts = 0;
        config.rpc.url = "not a url".to_string();
        config.rpc.failover_urls = vec!["ws://127.0.0.1:8900".to_string()];
        config.rpc.timeout_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "localhost".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors[0],
            ValidationError::Retry(PolicyError::ZeroAttempts)
        );
        assert!(errors[2].to_string().contains("unsupported scheme 'ws'"));
        assert_eq!(errors[3], ValidationError::ZeroTimeout);
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
