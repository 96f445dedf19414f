//! Per-client rate limiting middleware.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RateLimitConfig;
use crate::http::response::ApiError;
use crate::observability::metrics;

/// A client's current fixed window.
struct Window {
    remaining: u32,
    reset_at: Instant,
}

/// Fixed-window point budget per client identifier.
///
/// Each client gets `points` requests per `window`; the window is anchored at
/// the client's first consumption and the budget resets once it elapses.
/// State is local to this process: this is a best-effort abuse guard, not a
/// correctness mechanism.
pub struct RateLimiterState {
    windows: Mutex<HashMap<String, Window>>,
    points: u32,
    window: Duration,
    enabled: bool,
}

// Bound on tracked clients before expired windows are swept.
const PRUNE_THRESHOLD: usize = 4096;

impl RateLimiterState {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            points: config.points,
            window: Duration::from_secs(config.window_secs),
            enabled: config.enabled,
        }
    }

    /// Consume one point for `client`. Returns false when the budget for the
    /// current window is exhausted; denial has no side effect.
    pub fn try_consume(&self, client: &str) -> bool {
        self.try_consume_at(client, Instant::now())
    }

    fn try_consume_at(&self, client: &str, now: Instant) -> bool {
        if !self.enabled {
            return true;
        }
        if self.points == 0 {
            return false;
        }

        // The mutex makes the read-modify-write atomic per client: two
        // concurrent requests cannot both consume the same last point.
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");

        match windows.get_mut(client) {
            Some(window) if now < window.reset_at => {
                if window.remaining > 0 {
                    window.remaining -= 1;
                    true
                } else {
                    false
                }
            }
            _ => {
                if windows.len() >= PRUNE_THRESHOLD {
                    windows.retain(|_, w| w.reset_at > now);
                }
                windows.insert(
                    client.to_string(),
                    Window {
                        remaining: self.points - 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}

/// Middleware rejecting over-budget clients before any other processing.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let client = addr.ip().to_string();

    if limiter.try_consume(&client) {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, "Rate limit exceeded");
        metrics::record_rate_limited();
        ApiError::RateLimited.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(points: u32, window_secs: u64) -> RateLimiterState {
        RateLimiterState::new(&RateLimitConfig {
            enabled: true,
            points,
            window_secs,
        })
    }

    #[test]
    fn budget_exhausts_within_window() {
        let limiter = limiter(10, 60);
        let now = Instant::now();

        for _ in 0..10 {
            assert!(limiter.try_consume_at("1.2.3.4", now));
        }
        assert!(!limiter.try_consume_at("1.2.3.4", now));
    }

    #[test]
    fn window_resets_after_elapsing() {
        let limiter = limiter(2, 60);
        let now = Instant::now();

        assert!(limiter.try_consume_at("1.2.3.4", now));
        assert!(limiter.try_consume_at("1.2.3.4", now));
        assert!(!limiter.try_consume_at("1.2.3.4", now));

        let later = now + Duration::from_secs(61);
        assert!(limiter.try_consume_at("1.2.3.4", later));
    }

    #[test]
    fn clients_have_independent_budgets() {
        let limiter = limiter(1, 60);
        let now = Instant::now();

        assert!(limiter.try_consume_at("1.2.3.4", now));
        assert!(!limiter.try_consume_at("1.2.3.4", now));
        assert!(limiter.try_consume_at("5.6.7.8", now));
    }

    #[test]
    fn disabled_limiter_always_allows() {
        let limiter = RateLimiterState::new(&RateLimitConfig {
            enabled: false,
            points: 0,
            window_secs: 60,
        });
        for _ in 0..100 {
            assert!(limiter.try_consume("1.2.3.4"));
        }
    }
}
