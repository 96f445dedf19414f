//! Response mapping for the request gate.
//!
//! Every rejection the pipeline can produce maps to one fixed status code
//! and error body. All of them are recovered at the request boundary; none
//! crash the process and none are retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::forward::ForwardError;
use crate::observability::metrics;
use crate::policy::Rejection;

/// Everything that stops a request short of delivery.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Too Many Requests")]
    RateLimited,

    #[error("Unauthorized request")]
    Unauthorized,

    #[error("Invalid or missing 'text'")]
    InvalidText,

    #[error("Message blocked: contains forbidden code {0}")]
    Blocked(String),

    #[error("Message not allowed by filter")]
    NotAllowed,

    #[error("Server not configured properly. Missing {}.", missing.join(" or "))]
    Misconfigured { missing: Vec<&'static str> },

    /// Transport-level upstream failure; carries the error description.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unauthorized | ApiError::Blocked(_) | ApiError::NotAllowed => {
                StatusCode::FORBIDDEN
            }
            ApiError::InvalidText => StatusCode::BAD_REQUEST,
            ApiError::Misconfigured { .. } | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            ApiError::RateLimited => "rate_limited",
            ApiError::Unauthorized => "unauthorized",
            ApiError::InvalidText => "invalid_text",
            ApiError::Blocked(_) => "blocked",
            ApiError::NotAllowed => "not_allowed",
            ApiError::Misconfigured { .. } => "misconfigured",
            ApiError::Upstream(_) => "upstream_failure",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::record_rejection(self.reason());
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Invalid => ApiError::InvalidText,
            Rejection::Forbidden(code) => ApiError::Blocked(code),
            Rejection::NotAllowed => ApiError::NotAllowed,
        }
    }
}

impl From<ForwardError> for ApiError {
    fn from(error: ForwardError) -> Self {
        match error {
            ForwardError::NotConfigured(missing) => ApiError::Misconfigured { missing },
            ForwardError::Transport(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_contract() {
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::InvalidText.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Blocked("1532".to_string()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::NotAllowed.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Misconfigured { missing: vec!["BOT_TOKEN"] }.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_match_contract() {
        assert_eq!(ApiError::RateLimited.to_string(), "Too Many Requests");
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized request");
        assert_eq!(ApiError::InvalidText.to_string(), "Invalid or missing 'text'");
        assert_eq!(
            ApiError::Blocked("1532".to_string()).to_string(),
            "Message blocked: contains forbidden code 1532"
        );
        assert_eq!(
            ApiError::NotAllowed.to_string(),
            "Message not allowed by filter"
        );
        assert_eq!(
            ApiError::Misconfigured {
                missing: vec!["BOT_TOKEN", "CHAT_ID"]
            }
            .to_string(),
            "Server not configured properly. Missing BOT_TOKEN or CHAT_ID."
        );
        assert_eq!(
            ApiError::Misconfigured {
                missing: vec!["CHAT_ID"]
            }
            .to_string(),
            "Server not configured properly. Missing CHAT_ID."
        );
    }
}
