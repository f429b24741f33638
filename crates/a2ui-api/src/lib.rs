//! A2UI API /v1: REST endpoints over the engine
//!
//! Routes:
//! - `POST /v1/infer`: free text to `TaskIntent`
//! - `POST /v1/seed`: schema to its initial values
//! - `POST /v1/execute`: validate and persist a filled form
//! - `GET /v1/health`, `GET /metrics`
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use a2ui_core::Engine;
use a2ui_in::RuleBasedIncidentAgent;
use a2ui_out::LocalJsonExecutor;
use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use error::ApiError;
pub use metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub metrics: Arc<Metrics>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Rule-based agent plus the local JSON executor writing to `config.output_dir`.
    pub fn from_config(config: ApiConfig) -> anyhow::Result<Self> {
        let engine = Engine::new(
            Arc::new(RuleBasedIncidentAgent::new()),
            Arc::new(LocalJsonExecutor::new(config.output_dir.clone())),
        );
        Self::with_engine(engine, config)
    }

    pub fn with_engine(engine: Engine, config: ApiConfig) -> anyhow::Result<Self> {
        let metrics = Metrics::new().context("register metrics")?;
        Ok(Self {
            engine,
            metrics: Arc::new(metrics),
            config: Arc::new(config),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/infer", post(handlers::infer))
        .route("/v1/seed", post(handlers::seed_values))
        .route("/v1/execute", post(handlers::execute))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Install the global subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config::DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let addr = config.addr.clone();
    let output_dir = config.output_dir.clone();
    let app = create_app(AppState::from_config(config)?);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {}", addr))?;

    tracing::info!(%addr, output_dir = %output_dir.display(), "A2UI API listening");
    axum::serve(listener, app)
        .await
        .context("server terminated with error")
}
