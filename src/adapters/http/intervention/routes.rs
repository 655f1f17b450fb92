//! Axum router configuration for intervention endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{call_response, trigger_intervention};

/// Create the intervention router.
///
/// # Routes
/// - `POST /trigger-intervention` - Place a nudge call
/// - `GET|POST /call-response` - Voice markup fetched by the provider (signature verified)
pub fn intervention_routes() -> Router<AppState> {
    Router::new()
        .route("/trigger-intervention", post(trigger_intervention))
        .route("/call-response", get(call_response).post(call_response))
}
