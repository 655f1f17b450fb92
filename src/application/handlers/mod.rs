//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intervention;
pub mod survey;

pub use intervention::{
    CallbackUrlBuilder, GetCallScriptHandler, GetCallScriptQuery, TriggerInterventionCommand,
    TriggerInterventionHandler, TriggerInterventionResult, TriggerOutcome,
};
pub use survey::{SubmitSurveyCommand, SubmitSurveyHandler, SubmitSurveyResult};
