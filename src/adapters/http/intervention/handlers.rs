//! HTTP handlers for intervention endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::telephony::{VoiceResponse, TWIML_CONTENT_TYPE};
use crate::application::handlers::{
    GetCallScriptQuery, TriggerInterventionCommand, TriggerOutcome,
};
use crate::domain::foundation::{CommandMetadata, DomainError, UserId};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{CallResponseParams, TriggerInterventionRequest, TriggerInterventionResponse};

/// POST /trigger-intervention - Place a nudge call to the user
pub async fn trigger_intervention(
    State(state): State<AppState>,
    payload: Result<Json<TriggerInterventionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let user_id = request
        .user_id
        .as_deref()
        .and_then(|id| UserId::new(id).ok())
        .ok_or_else(|| DomainError::validation("user_id", "Missing user_id"))?;

    let metadata = CommandMetadata::new(user_id.clone()).with_source("http");
    let command = TriggerInterventionCommand {
        user_id,
        app_name: request.app_name,
    };

    let result = state
        .trigger_intervention_handler()
        .handle(command, metadata)
        .await?;

    let (status, message) = match &result.outcome {
        TriggerOutcome::Placed(_) | TriggerOutcome::Duplicate(_) => {
            (StatusCode::OK, "Call initiated")
        }
        TriggerOutcome::InFlight => (StatusCode::ACCEPTED, "Call already in progress"),
    };

    let response = TriggerInterventionResponse {
        message: message.to_string(),
        call_sid: result.outcome.call_sid().map(|sid| sid.to_string()),
        deduplicated: result.outcome.is_deduplicated(),
    };

    Ok((status, Json(response)))
}

/// GET|POST /call-response - Voice markup the provider plays on the call
pub async fn call_response(
    State(state): State<AppState>,
    params: Result<Query<CallResponseParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;

    let query = GetCallScriptQuery {
        user_id: params.user_id,
        app_name: params.app_name,
        signature: params.sig,
    };
    let script = state.get_call_script_handler().handle(query).await?;

    let markup = VoiceResponse::speak_and_hang_up(script).to_xml();
    Ok(([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], markup))
}
