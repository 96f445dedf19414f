//! Telegram task relay.
//!
//! A single-endpoint relay built with Tokio and Axum: it accepts a message
//! plus a shared secret on `POST /send-message`, runs a request gate, and
//! forwards approved text to the Telegram Bot API.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                  TASK RELAY                    │
//!                    │                                                │
//!   Client Request   │  ┌──────────┐   ┌──────┐   ┌────────┐         │
//!   ─────────────────┼─▶│   rate   │──▶│ auth │──▶│ policy │         │
//!                    │  │ limiter  │   │check │   │ filter │         │
//!                    │  └──────────┘   └──────┘   └───┬────┘         │
//!                    │                                │              │
//!                    │                                ▼              │
//!   Client Response  │  ┌──────────┐            ┌──────────┐        │    Telegram
//!   ◀────────────────┼──│ mirrored │◀───────────│forwarder │◀───────┼──▶ Bot API
//!                    │  │ response │            │(reqwest) │        │
//!                    │  └──────────┘            └──────────┘        │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns           │ │
//!                    │  │  config │ observability │ lifecycle       │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use task_relay::config::loader::{apply_env, load_config};
use task_relay::config::validation::validate_config;
use task_relay::config::RelayConfig;
use task_relay::http::HttpServer;
use task_relay::lifecycle::{signals, Shutdown};
use task_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "task-relay", about = "Telegram task relay server")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    apply_env(&mut config);
    if let Some(port) = args.port {
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(error = %error, "Invalid configuration");
        }
        return Err("configuration validation failed".into());
    }

    // Missing deployment variables are a warning here; requests that need
    // them fail individually at request time.
    for var in config.telegram.missing_vars() {
        tracing::warn!(var = var, "Environment variable is not set");
    }
    if config.auth.secret.is_empty() {
        tracing::warn!(var = "SECRET_KEY", "Environment variable is not set");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_points = config.rate_limit.points,
        rate_limit_window_secs = config.rate_limit.window_secs,
        max_text_length = config.policy.max_text_length,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
