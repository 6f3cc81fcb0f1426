//! Cardápio Backend
//!
//! A REST API for managing a pizzeria menu: pizza and beverage catalogs
//! kept in memory, with product images uploaded to local disk and served
//! back as static files. All catalog data is discarded when the process
//! exits.

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::Next,
    response::Response,
    routing::{get, put},
    Json, Router,
};
use cardapio_backend::api;
use cardapio_backend::config::Config;
use cardapio_backend::state::AppState;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    message: String,
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Initialize application state with the seeded catalog
    let state = Arc::new(AppState::new(&config));
    state.uploads.ensure_dir().await?;
    warn_missing_placeholders(&state).await;

    // Build our application with routes
    let app = Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Product catalog API
        .route(
            "/api/:category",
            get(api::products::list_products).post(api::products::create_product),
        )
        .route(
            "/api/:category/:id",
            put(api::products::update_product).delete(api::products::delete_product),
        )
        // Previously uploaded images, served as static files
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // Allow CORS for development
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Catalog is in-memory only; data is lost on restart");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Warn at startup when the placeholder images referenced by the seed data
/// are missing from the uploads directory
async fn warn_missing_placeholders(state: &AppState) {
    for name in ["placeholder-pizza.png", "placeholder-bebida.png"] {
        let path = state.uploads.dir().join(name);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            warn!(
                "Placeholder image {} is missing; seeded products will render without one",
                path.display()
            );
        }
    }
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}
