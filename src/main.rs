// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! AutoMeet API server
//!
//! Serves events, blog, authentication, dashboard and profile state to the
//! AutoMeet front-end.

use automeet::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        backend = config.backend_configured(),
        "Starting AutoMeet API"
    );

    if let Some(path) = &config.storage_path {
        tracing::info!(path = %path.display(), "Using persistent local storage");
    }

    let state = Arc::new(AppState::from_config(config.clone())?);

    // Sweep at a quarter of the idle timeout, at least once a minute
    let sweep_every = (config.session_idle_timeout / 4).clamp(
        std::time::Duration::from_secs(1),
        std::time::Duration::from_secs(60),
    );
    state
        .sessions
        .spawn_reaper(sweep_every, config.session_idle_timeout);
    let app = automeet::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Structured JSON logging; `RUST_LOG` overrides the defaults.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("automeet=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
