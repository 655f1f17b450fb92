//! HTTP DTOs for survey endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::survey::{BehavioralTraits, Question, QuestionId, SurveyResponse, TraitAxis};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for POST /process-mbti.
///
/// Every field is optional at the wire level so missing values surface as
/// a domain validation error rather than an extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessSurveyRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub responses: Vec<SurveyAnswerRequest>,
}

/// One answered question. Newer clients send `question_id`, older ones the
/// exact `question` text; the ID wins when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyAnswerRequest {
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: String,
}

impl SurveyAnswerRequest {
    pub fn into_domain(self) -> Result<SurveyResponse, ValidationError> {
        match self.question_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => Ok(SurveyResponse::by_id(QuestionId::new(id)?, self.answer)),
            None => Ok(SurveyResponse::by_text(
                self.question.unwrap_or_default(),
                self.answer,
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a scored survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSurveyResponse {
    pub message: String,
    pub mbti_type: String,
    pub behavioral_traits: BehavioralTraits,
}

/// Response for GET /mbti/questions.
///
/// `questions` stays a plain list of texts for older clients; the parallel
/// `question_ids` and `axes` lists let newer clients answer by ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub status: String,
    pub total: usize,
    pub questions: Vec<String>,
    pub question_ids: Vec<String>,
    pub axes: Vec<TraitAxis>,
}

impl From<&[Question]> for QuestionListResponse {
    fn from(questions: &[Question]) -> Self {
        Self {
            status: "ok".to_string(),
            total: questions.len(),
            questions: questions.iter().map(|q| q.text().to_string()).collect(),
            question_ids: questions.iter().map(|q| q.id().to_string()).collect(),
            axes: questions.iter().map(|q| q.axis()).collect(),
        }
    }
}
