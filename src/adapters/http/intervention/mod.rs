//! HTTP adapter for interventions and the provider callback.

mod dto;
mod handlers;
mod routes;

pub use dto::{CallResponseParams, TriggerInterventionRequest, TriggerInterventionResponse};
pub use handlers::{call_response, trigger_intervention};
pub use routes::intervention_routes;
