//! Survey handlers.

mod submit_survey;

pub use submit_survey::{SubmitSurveyCommand, SubmitSurveyHandler, SubmitSurveyResult};
