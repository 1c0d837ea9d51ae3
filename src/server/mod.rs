//! HTTP surface
//!
//! Routes:
//! - `POST /workflows/load`
//! - `POST /workflows/parse`
//! - `POST /workflows/generate`
//! - `GET /marketplace/search`
//! - `POST /publish`

mod error;
mod routes;
mod state;

pub use error::AppError;
pub use state::AppState;

use crate::config::ServerConfig;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = state.config.body_limit;

    Router::new()
        .route("/workflows/load", post(routes::load))
        .route("/workflows/parse", post(routes::parse_text))
        .route("/workflows/generate", post(routes::generate_text))
        .route("/marketplace/search", get(routes::marketplace_search))
        .route("/publish", post(routes::publish_workflow))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.addr();
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("workflow-studio listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
