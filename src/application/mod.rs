//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CallbackUrlBuilder, GetCallScriptHandler, GetCallScriptQuery, SubmitSurveyCommand,
    SubmitSurveyHandler, SubmitSurveyResult, TriggerInterventionCommand,
    TriggerInterventionHandler, TriggerInterventionResult, TriggerOutcome,
};
