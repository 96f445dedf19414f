//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Shared-secret authentication for the send-message endpoint.
    pub auth: AuthConfig,

    /// Content policy (keyword allow-list, forbidden substrings, length).
    pub policy: PolicyConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Upstream Telegram Bot API settings.
    pub telegram: TelegramConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request hardening (body cap, security headers).
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Shared-secret authentication.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret that callers must supply as `secretKey`. Empty means unset;
    /// every request is rejected until one is configured.
    pub secret: String,
}

/// Content policy applied to the message text.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// At least one of these must appear in the text (case-insensitive
    /// substring match) for the message to be forwarded.
    pub allowed_keywords: Vec<String>,

    /// Any of these appearing in the text (case-sensitive substring match)
    /// blocks the message unconditionally.
    pub forbidden_substrings: Vec<String>,

    /// Maximum text length in characters.
    pub max_text_length: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            allowed_keywords: vec![
                "New Task Accepted".to_string(),
                "Job TTV".to_string(),
                "Microworkers".to_string(),
                "mw data allart".to_string(),
            ],
            forbidden_substrings: vec!["1532".to_string()],
            max_text_length: 2000,
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Point budget per client IP per window.
    pub points: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            points: 10,
            window_secs: 60,
        }
    }
}

/// Upstream Telegram Bot API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token. Empty means unset.
    pub bot_token: String,

    /// Destination chat identifier. Empty means unset.
    pub chat_id: String,

    /// API base URL. Overridable so tests can point at a local mock.
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
        }
    }
}

impl TelegramConfig {
    /// Names of the deployment variables that are still unset.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bot_token.is_empty() {
            missing.push("BOT_TOKEN");
        }
        if self.chat_id.is_empty() {
            missing.push("CHAT_ID");
        }
        missing
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total inbound request timeout in seconds.
    pub request_secs: u64,

    /// Upstream call timeout in seconds. Expiry counts as a transport
    /// failure, not a retryable condition.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 10,
        }
    }
}

/// Request hardening settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,

    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 16 * 1024,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus exposition endpoint.
    pub metrics_enabled: bool,

    /// Address for the metrics listener.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
