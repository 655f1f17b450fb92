//! Axum router configuration for survey endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{list_questions, process_survey};

/// Create the survey router.
///
/// # Routes
/// - `POST /process-mbti` - Score a survey submission
/// - `GET /mbti/questions` - List the questions
pub fn survey_routes() -> Router<AppState> {
    Router::new()
        .route("/process-mbti", post(process_survey))
        .route("/mbti/questions", get(list_questions))
}
