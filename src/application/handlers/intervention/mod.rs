//! Intervention handlers.
//!
//! ## Commands
//! - Triggering a nudge call
//!
//! ## Queries
//! - Rendering the script a placed call speaks

mod callback_url;
mod get_call_script;
mod trigger_intervention;

pub use callback_url::{CallbackUrlBuilder, CALL_SCRIPT_PATH};
pub use get_call_script::{GetCallScriptHandler, GetCallScriptQuery};
pub use trigger_intervention::{
    TriggerInterventionCommand, TriggerInterventionHandler, TriggerInterventionResult,
    TriggerOutcome,
};
