//! Upstream forwarding to the Telegram Bot API.
//!
//! # Data Flow
//! ```text
//! validated text
//!     → build sendMessage payload (chat_id, text, no link preview)
//!     → single POST to <api_base>/bot<token>/sendMessage, bounded timeout
//!     → ForwardResult { ok, status, body } mirrored to the caller
//! ```
//!
//! # Design Decisions
//! - At-most-once: no retry on any failure, delivery is best-effort
//! - Misconfiguration is detected lazily here, not at startup
//! - The upstream JSON body is passed through verbatim, success or not

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::TelegramConfig;

/// Errors that prevent or abort a forward attempt.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("missing configuration: {0:?}")]
    NotConfigured(Vec<&'static str>),

    /// Network error, timeout, or an unreadable upstream body.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Outcome of a completed upstream call.
#[derive(Debug)]
pub struct ForwardResult {
    /// Whether the upstream responded 2xx.
    pub ok: bool,
    /// Upstream status code.
    pub status: u16,
    /// Upstream JSON body, verbatim.
    pub body: Value,
}

/// The sendMessage request body.
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Client for the upstream messaging API.
pub struct Forwarder {
    client: reqwest::Client,
    telegram: TelegramConfig,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(telegram: TelegramConfig, upstream_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            telegram,
            timeout: upstream_timeout,
        }
    }

    /// Relay validated text upstream.
    ///
    /// Exactly one POST is issued per call; a second call with the same text
    /// sends a second message.
    pub async fn forward(&self, text: &str) -> Result<ForwardResult, ForwardError> {
        let missing = self.telegram.missing_vars();
        if !missing.is_empty() {
            return Err(ForwardError::NotConfigured(missing));
        }

        let url = format!(
            "{}/bot{}/sendMessage",
            self.telegram.api_base.trim_end_matches('/'),
            self.telegram.bot_token
        );
        let payload = SendMessagePayload {
            chat_id: &self.telegram.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        tracing::debug!(
            status = status.as_u16(),
            ok = status.is_success(),
            "Upstream response"
        );

        Ok(ForwardResult {
            ok: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}
