//! Shared utilities for integration testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

use task_relay::config::RelayConfig;
use task_relay::http::HttpServer;
use task_relay::lifecycle::Shutdown;

/// A fake Telegram Bot API that records every payload it receives.
pub struct MockUpstream {
    pub url: String,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl MockUpstream {
    #[allow(dead_code)]
    pub fn received_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn record_send_message(
    State(state): State<MockState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.received.lock().unwrap().push(payload);
    (state.status, Json(state.body.clone()))
}

/// Start a mock upstream returning a fixed status and JSON body for
/// `POST /bot<token>/sendMessage`.
pub async fn start_mock_upstream(status: u16, body: Value) -> MockUpstream {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        received: received.clone(),
    };

    // "/bot<token>" is a single path segment, so one capture matches it.
    let app = Router::new()
        .route("/{bot}/sendMessage", post(record_send_message))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        url: format!("http://{}", addr),
        received,
    }
}

/// Relay config wired for tests: known secret and credentials, upstream
/// pointed at `api_base`, rate limiting off unless a test enables it.
pub fn test_config(api_base: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.auth.secret = "test-secret".to_string();
    config.telegram.bot_token = "123:TEST".to_string();
    config.telegram.chat_id = "-100123".to_string();
    config.telegram.api_base = api_base.to_string();
    config.rate_limit.enabled = false;
    config
}

/// Spawn a relay server on an ephemeral port. Returns its base URL and the
/// shutdown handle keeping it alive.
pub async fn spawn_relay(config: RelayConfig) -> (String, Shutdown) {
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the acceptor a moment to come up.
    tokio::time::sleep(Duration::from_millis(100)).await;

    (format!("http://{}", addr), shutdown)
}
