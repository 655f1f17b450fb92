//! Survey questions, answers, and submitted responses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::TraitAxis;

/// Stable, immutable identifier of a survey question (e.g. `E1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("question_id"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Parses the exact wire values `"Yes"` and `"No"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "Yes" => Ok(Answer::Yes),
            "No" => Ok(Answer::No),
            other => Err(ValidationError::invalid_format(
                "answer",
                format!("expected 'Yes' or 'No', got '{}'", other),
            )),
        }
    }
}

/// Which pole of its axis a "Yes" answer pushes toward.
///
/// A "No" answer always carries the opposite weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesLeans {
    Positive,
    Negative,
}

/// A single survey question tagged with its axis and answer weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    axis: TraitAxis,
    yes_leans: YesLeans,
}

impl Question {
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        axis: TraitAxis,
        yes_leans: YesLeans,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("question"));
        }
        Ok(Self {
            id,
            text,
            axis,
            yes_leans,
        })
    }

    /// Builds a question from compiled-in definitions.
    pub(super) fn from_static(
        id: &'static str,
        text: &'static str,
        axis: TraitAxis,
        yes_leans: YesLeans,
    ) -> Self {
        Self {
            id: QuestionId(id.to_string()),
            text: text.to_string(),
            axis,
            yes_leans,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn axis(&self) -> TraitAxis {
        self.axis
    }

    pub fn yes_weight(&self) -> i32 {
        match self.yes_leans {
            YesLeans::Positive => 1,
            YesLeans::Negative => -1,
        }
    }

    pub fn no_weight(&self) -> i32 {
        -self.yes_weight()
    }

    /// Weight contributed by an answer.
    pub fn weight(&self, answer: Answer) -> i32 {
        match answer {
            Answer::Yes => self.yes_weight(),
            Answer::No => self.no_weight(),
        }
    }
}

/// How a submitted response identifies its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionRef {
    /// Stable question ID.
    Id(QuestionId),
    /// Exact question text, as sent by older clients.
    Text(String),
}

/// One submitted `{question, answer}` pair.
///
/// The answer stays raw until its question is matched; answers to unknown
/// questions are skipped without validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyResponse {
    pub question: QuestionRef,
    pub answer: String,
}

impl SurveyResponse {
    pub fn by_id(id: QuestionId, answer: impl Into<String>) -> Self {
        Self {
            question: QuestionRef::Id(id),
            answer: answer.into(),
        }
    }

    pub fn by_text(text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: QuestionRef::Text(text.into()),
            answer: answer.into(),
        }
    }
}
