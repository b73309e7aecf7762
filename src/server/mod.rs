//! Web server module
//!
//! JSON-in/JSON-out surface over the engine, mirroring the platform's
//! `/api/ai/*` routes. Handlers are thin: validate via the engine, serialize
//! the resolved output. Backend failures never become HTTP failures.

pub mod http;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::engine::Engine;
use crate::store::MemoryStore;

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(config: Arc<Config>, engine: Arc<Engine>) -> Self {
        Self { config, engine }
    }
}

/// Assemble the application router
pub fn build_router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/ai/generate-content", post(http::generate_content_handler))
        .route("/api/ai/adaptive-path", post(http::adaptive_path_handler))
        .route("/api/ai/progress-analysis", post(http::progress_analysis_handler))
        .route("/api/ai/remediation", post(http::remediation_handler))
        .route("/api/ai/assessments", post(http::assessments_handler))
        .route("/api/ai/simplify", post(http::simplify_handler))
        .route("/api/ai/chatbot", post(http::chatbot_handler))
        .route("/api/ai/safety-assessment", post(http::safety_assessment_handler))
        .route("/api/status", get(http::status_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server and run until shutdown
pub async fn serve(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server.addr))?;

    let mut engine = Engine::from_config(&config);
    if config.cache.enabled {
        engine = engine.with_cache(
            Arc::new(MemoryStore::new()),
            Duration::from_secs(config.cache.path_ttl_secs),
        );
    }

    let state = ServerState::new(Arc::new(config), Arc::new(engine));
    let app = build_router(state);

    info!(%addr, "starting AptX engine server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}
