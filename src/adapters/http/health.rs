//! Liveness endpoints.

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    fn ok(message: &str) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.to_string(),
        }
    }
}

/// GET / - Service banner
pub async fn root() -> impl IntoResponse {
    Json(HealthResponse::ok("DetoxDial Backend is Running"))
}

/// GET /ping
pub async fn ping() -> impl IntoResponse {
    Json(HealthResponse::ok("pong"))
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
}
