//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with both routes
//! - Wire up middleware (rate limit, tracing, timeout, body cap, request ID,
//!   CORS, security headers)
//! - Own the shared state (config, policy, limiter, forwarder)
//! - Serve until the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::forward::Forwarder;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::policy::ContentPolicy;
use crate::security::headers;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiterState};

/// Application state injected into handlers.
///
/// Explicitly constructed and passed in, never read from globals, so tests
/// get fresh counters and config per server instance.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub policy: Arc<ContentPolicy>,
    pub limiter: Arc<RateLimiterState>,
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let state = AppState {
            policy: Arc::new(ContentPolicy::new(&config.policy)),
            limiter: Arc::new(RateLimiterState::new(&config.rate_limit)),
            forwarder: Arc::new(Forwarder::new(
                config.telegram.clone(),
                Duration::from_secs(config.timeouts.upstream_secs),
            )),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let limiter = state.limiter.clone();

        // Layers added later sit further out; the rate limiter stays
        // innermost of the cross-cutting stack so the checks it guards
        // run strictly after it.
        let mut router = Router::new()
            .route("/", get(handlers::health))
            .route("/send-message", post(handlers::send_message))
            .with_state(state)
            .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
            .layer(headers::cors_layer());

        if config.security.enable_headers {
            router = router
                .layer(headers::nosniff_layer())
                .layer(headers::frame_options_layer())
                .layer(headers::referrer_policy_layer());
        }

        router
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
