//! HTTP adapter for the personality survey.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ProcessSurveyRequest, ProcessSurveyResponse, QuestionListResponse, SurveyAnswerRequest,
};
pub use handlers::{list_questions, process_survey};
pub use routes::survey_routes;
