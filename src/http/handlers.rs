//! Route handlers.
//!
//! `POST /send-message` runs the request gate as a linear decision tree:
//! auth check, content validation, forward. Rate limiting already happened
//! in middleware. No backtracking, no retries, no loops.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Body of `POST /send-message`.
///
/// `text` stays an arbitrary JSON value so a non-string lands in the
/// invalid-input path instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: Option<Value>,

    #[serde(default, rename = "secretKey")]
    pub secret_key: Option<String>,
}

/// Liveness check.
pub async fn health() -> &'static str {
    "Telegram task relay is running (secure + task filter)"
}

/// The send-message pipeline: auth, validate, forward, mirror upstream.
pub async fn send_message(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let client = addr.ip();

    let supplied = request.secret_key.as_deref().unwrap_or("");
    if supplied.is_empty() || supplied != state.config.auth.secret {
        tracing::warn!(client = %client, "Unauthorized send-message request");
        return Err(ApiError::Unauthorized);
    }

    let text = state.policy.validate(request.text.as_ref()).map_err(|rejection| {
        tracing::warn!(client = %client, rejection = ?rejection, "Message rejected by policy");
        ApiError::from(rejection)
    })?;

    tracing::debug!(client = %client, chars = text.chars().count(), "Forwarding message");

    let result = state.forwarder.forward(text).await.map_err(|error| {
        tracing::error!(client = %client, error = %error, "Forwarding failed");
        ApiError::from(error)
    })?;

    metrics::record_forwarded(result.ok, start);

    // Mirror the upstream outcome: its JSON body verbatim, 200 on upstream
    // success and 500 otherwise.
    let status = if result.ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(result.body)).into_response())
}
