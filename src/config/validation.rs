//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Validation is a pure
//! function that collects every error instead of stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BadBindAddress(String),

    #[error("rate_limit.points must be at least 1 when rate limiting is enabled")]
    ZeroPoints,

    #[error("rate_limit.window_secs must be at least 1")]
    ZeroWindow,

    #[error("policy.max_text_length must be at least 1")]
    ZeroTextLength,

    #[error("timeouts.{0}_secs must be at least 1")]
    ZeroTimeout(&'static str),

    #[error("telegram.api_base '{0}' must be an http(s) URL")]
    BadApiBase(String),

    #[error("security.max_body_size must be at least 1")]
    ZeroBodySize,
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.rate_limit.enabled && config.rate_limit.points == 0 {
        errors.push(ValidationError::ZeroPoints);
    }
    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError::ZeroWindow);
    }

    if config.policy.max_text_length == 0 {
        errors.push(ValidationError::ZeroTextLength);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream"));
    }

    if !config.telegram.api_base.starts_with("http://")
        && !config.telegram.api_base.starts_with("https://")
    {
        errors.push(ValidationError::BadApiBase(config.telegram.api_base.clone()));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodySize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.rate_limit.points = 0;
        config.rate_limit.window_secs = 0;
        config.telegram.api_base = "ftp://example.com".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
