//! Guardpost HTTP server
//!
//! Thin request/response mapping over the core services: guardrail
//! registry, similarity engine, prediction cache, and the generation
//! backend. Handlers translate service results into JSON bodies and
//! `AppError`s into status codes; no business logic lives here.

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use gp_types::AppResult;

pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;

pub use state::AppState;

/// Build the service router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::system::root))
        .route("/api/health", get(routes::system::health))
        .route("/api/input-guardrail", post(routes::guardrails::check_input))
        .route("/api/output-guardrail", post(routes::guardrails::check_output))
        .route("/api/guardrails", get(routes::guardrails::list_guardrails))
        .route("/api/guardrails/{name}", get(routes::guardrails::get_guardrail))
        .route("/api/similarity", post(routes::similarity::similarity))
        .route("/api/similarity/methods", get(routes::similarity::list_methods))
        .route("/api/prediction", post(routes::prediction::prediction))
        .route("/openapi.json", get(openapi::serve_openapi_json))
        .route("/openapi.yaml", get(openapi::serve_openapi_yaml))
        .with_state(state)
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process exits.
pub async fn serve(state: AppState, addr: SocketAddr) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "guardpost listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
