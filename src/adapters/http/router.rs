//! Top-level router: mounts every endpoint and the shared middleware.

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::health::health_routes;
use super::intervention::intervention_routes;
use super::state::AppState;
use super::survey::survey_routes;

/// Create the application router.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(survey_routes())
        .merge(intervention_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .with_state(state)
}

/// Any origin when none are configured, otherwise the configured list.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
