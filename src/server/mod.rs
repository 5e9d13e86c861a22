//! Dashboard HTTP server
//!
//! Serves the dashboard page and the JSON endpoints behind it:
//! - `GET /`, `GET /ads-dashboard`: dashboard page
//! - `GET /api/google-ads/performance`: account performance summary
//! - `GET /api/google-ads/campaigns`: campaign table
//! - `GET /api/health`: service status and active data source

mod error;
pub mod handlers;
mod page;
mod state;

pub use error::ApiError;
pub use handlers::{HealthReport, DATA_SOURCE_HEADER};
pub use state::AppState;

use crate::config::parse_duration;
use anyhow::{Context, Result};
use axum::{http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the application router
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/ads-dashboard", get(handlers::dashboard))
        .route("/api/google-ads/performance", get(handlers::performance))
        .route("/api/google-ads/campaigns", get(handlers::campaigns))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

/// The dashboard web server
pub struct DashboardServer {
    state: AppState,
    addr: SocketAddr,
    request_timeout: Duration,
}

impl DashboardServer {
    /// Creates a server listening on the configured address and port
    pub fn new(state: AppState) -> Result<Self> {
        let server = &state.config.server;
        let addr: SocketAddr = format!("{}:{}", server.bind_address, server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address: {}:{}",
                    server.bind_address, server.port
                )
            })?;
        let request_timeout = parse_duration(&server.request_timeout)
            .context("Invalid server.requestTimeout")?;

        Ok(Self {
            state,
            addr,
            request_timeout,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Starts the server; runs until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let policy = self.state.selector.policy();
        tracing::info!(
            "Starting dashboard on http://{} (data source: {}, client: {}, fallback allowed: {})",
            self.addr,
            self.state.selector.active_source(),
            self.state.selector.client_type(),
            policy.allow_mock_data
        );

        let app = create_router(self.state, self.request_timeout);
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
