//! Router assembly and server entry

pub mod response;

use crate::config::Config;
use crate::db;
use crate::features;
use crate::middleware;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}

/// Connect to the database and serve the API until shutdown
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = db::create_pool(&config.database).await?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    tracing::info!("Database migrations completed");

    let state = AppState { db: pool };
    let app = create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let feature_routes = features::router(state.db.clone());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state)
        .merge(feature_routes)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Service identity handler
async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Catalog Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Result<Response, StatusCode> {
    match db::health_check(&state.db).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    tracing::info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(std::time::Duration::from_secs(timeout_secs.min(5))).await;
}
