//! Mock interviewer HTTP server.
//!
//! Loads configuration from the environment, connects to PostgreSQL, wires the
//! Gemini gateway into the interview facade and serves the REST API.

use std::sync::Arc;

use anyhow::Context;
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mock_interviewer::adapters::http::{api_router, InterviewHandlers};
use mock_interviewer::adapters::{
    GeminiGateway, PostgresEvaluationRepository, PostgresInterviewRepository,
    PostgresMessageRepository, PostgresSubmissionRepository,
};
use mock_interviewer::application::InterviewFacade;
use mock_interviewer::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("invalid configuration")?;

    let pool = config
        .database
        .connect()
        .await
        .with_context(|| format!("failed to connect to {}", config.database.redacted_url()))?;
    tracing::info!(url = %config.database.redacted_url(), "connected to PostgreSQL");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        tracing::info!("database migrations applied");
    }

    let gemini = config
        .ai
        .gemini_config()
        .context("GEMINI_API_KEY is not configured")?;
    tracing::info!(model = %gemini.model, "using Gemini model gateway");
    let gateway = GeminiGateway::new(gemini).context("failed to build model gateway")?;

    let facade = InterviewFacade::new(
        Arc::new(PostgresInterviewRepository::new(pool.clone())),
        Arc::new(PostgresMessageRepository::new(pool.clone())),
        Arc::new(PostgresSubmissionRepository::new(pool.clone())),
        Arc::new(PostgresEvaluationRepository::new(pool)),
        Arc::new(gateway),
    );

    let app = api_router(InterviewHandlers::new(facade), &config.server.api_prefix).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server))
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, prefix = %config.server.api_prefix, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
