//! System endpoints: greeting and health check.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Greeting response for the root route.
#[derive(Debug, Serialize, ToSchema)]
struct GreetingResponse {
    message: String,
}

/// `GET /` — Greeting shown to players hitting the service directly.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Greeting",
    description = "Returns a welcome message. Handy as a smoke test for deployed instances.",
    responses(
        (status = 200, description = "Greeting", body = GreetingResponse),
    )
)]
pub async fn greeting_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(GreetingResponse {
            message: "Welcome to the card room!".to_string(),
        }),
    )
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(greeting_handler))
        .route("/health", get(health_handler))
}
