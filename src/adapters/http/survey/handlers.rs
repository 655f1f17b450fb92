//! HTTP handlers for survey endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::SubmitSurveyCommand;
use crate::domain::foundation::{CommandMetadata, DomainError, UserId};
use crate::domain::user::PhoneNumber;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{ProcessSurveyRequest, ProcessSurveyResponse, QuestionListResponse};

const MISSING_FIELDS: &str = "Missing user_id or responses";

/// POST /process-mbti - Score a survey and store the user's profile
pub async fn process_survey(
    State(state): State<AppState>,
    payload: Result<Json<ProcessSurveyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let user_id = request
        .user_id
        .as_deref()
        .and_then(|id| UserId::new(id).ok())
        .ok_or_else(|| DomainError::validation("user_id", MISSING_FIELDS))?;
    if request.responses.is_empty() {
        return Err(DomainError::validation("responses", MISSING_FIELDS).into());
    }

    let phone_number = request
        .phone_number
        .filter(|raw| !raw.trim().is_empty())
        .map(PhoneNumber::new)
        .transpose()
        .map_err(DomainError::from)?;

    let responses = request
        .responses
        .into_iter()
        .map(|answer| answer.into_domain())
        .collect::<Result<Vec<_>, _>>()
        .map_err(DomainError::from)?;

    let metadata = CommandMetadata::new(user_id.clone()).with_source("http");
    let command = SubmitSurveyCommand {
        user_id,
        phone_number,
        responses,
    };

    let result = state.submit_survey_handler().handle(command, metadata).await?;

    let traits = result.profile.traits();
    Ok(Json(ProcessSurveyResponse {
        message: "MBTI processed successfully".to_string(),
        mbti_type: traits.mbti_type().to_string(),
        behavioral_traits: traits.behavioral_traits.clone(),
    }))
}

/// GET /mbti/questions - List the survey questions in presentation order
pub async fn list_questions(State(state): State<AppState>) -> impl IntoResponse {
    Json(QuestionListResponse::from(state.question_bank.questions()))
}
