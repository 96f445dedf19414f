//! Configuration loading from disk and the environment.
//!
//! The file is optional; the deployment variables (`BOT_TOKEN`, `CHAT_ID`,
//! `SECRET_KEY`, `PORT`) overlay whatever the file provided.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RelayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay the deployment environment variables onto a config.
///
/// Unset variables leave the existing values alone. An unparseable `PORT`
/// is logged and ignored rather than treated as fatal.
pub fn apply_env(config: &mut RelayConfig) {
    if let Ok(token) = std::env::var("BOT_TOKEN") {
        if !token.is_empty() {
            config.telegram.bot_token = token;
        }
    }
    if let Ok(chat_id) = std::env::var("CHAT_ID") {
        if !chat_id.is_empty() {
            config.telegram.chat_id = chat_id;
        }
    }
    if let Ok(secret) = std::env::var("SECRET_KEY") {
        if !secret.is_empty() {
            config.auth.secret = secret;
        }
    }
    if let Ok(port) = std::env::var("PORT") {
        match port.parse::<u16>() {
            Ok(port) => config.listener.bind_address = format!("0.0.0.0:{}", port),
            Err(_) => tracing::warn!(port = %port, "Ignoring unparseable PORT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test for the whole overlay: std::env is process-global and
    // tests run on multiple threads.
    #[test]
    fn env_overlay() {
        std::env::set_var("BOT_TOKEN", "123:abc");
        std::env::set_var("CHAT_ID", "-100456");
        std::env::set_var("SECRET_KEY", "hunter2");
        std::env::set_var("PORT", "8081");

        let mut config = RelayConfig::default();
        apply_env(&mut config);

        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.telegram.chat_id, "-100456");
        assert_eq!(config.auth.secret, "hunter2");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");

        std::env::set_var("PORT", "not-a-port");
        apply_env(&mut config);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");

        std::env::remove_var("BOT_TOKEN");
        std::env::remove_var("CHAT_ID");
        std::env::remove_var("SECRET_KEY");
        std::env::remove_var("PORT");
    }
}
