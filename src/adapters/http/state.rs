//! Shared application state for the HTTP layer.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::{
    CallbackUrlBuilder, GetCallScriptHandler, SubmitSurveyHandler, TriggerInterventionHandler,
};
use crate::domain::survey::{QuestionBank, TieBreak};
use crate::ports::{InterventionGuard, ProfileStore, TelephonyProvider};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub question_bank: Arc<QuestionBank>,
    pub profile_store: Arc<dyn ProfileStore>,
    pub telephony: Arc<dyn TelephonyProvider>,
    pub intervention_guard: Arc<dyn InterventionGuard>,
    pub callback_urls: CallbackUrlBuilder,
    pub dedup_window: Option<Duration>,
    pub tie_break: TieBreak,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn submit_survey_handler(&self) -> SubmitSurveyHandler {
        SubmitSurveyHandler::new(
            self.question_bank.clone(),
            self.profile_store.clone(),
            self.tie_break,
        )
    }

    pub fn trigger_intervention_handler(&self) -> TriggerInterventionHandler {
        TriggerInterventionHandler::new(
            self.profile_store.clone(),
            self.telephony.clone(),
            self.intervention_guard.clone(),
            self.callback_urls.clone(),
            self.dedup_window,
        )
    }

    pub fn get_call_script_handler(&self) -> GetCallScriptHandler {
        GetCallScriptHandler::new(
            self.profile_store.clone(),
            self.callback_urls.signer().cloned(),
        )
    }
}
