//! Immutable registry of survey questions.

use std::collections::HashMap;

use crate::domain::foundation::ValidationError;

use super::{Question, QuestionId, QuestionRef, TraitAxis, YesLeans};

/// The question set a survey is scored against.
///
/// Built once at startup and shared read-only. Lookups go by stable ID
/// first and fall back to exact text for clients that only echo the
/// question wording.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<QuestionId, usize>,
    by_text: HashMap<String, usize>,
}

impl QuestionBank {
    /// Builds a bank, rejecting duplicate IDs or duplicate texts.
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        let mut by_id = HashMap::with_capacity(questions.len());
        let mut by_text = HashMap::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            if by_id.insert(question.id().clone(), index).is_some() {
                return Err(ValidationError::invalid_format(
                    "question_id",
                    format!("duplicate question id '{}'", question.id()),
                ));
            }
            if by_text.insert(question.text().to_string(), index).is_some() {
                return Err(ValidationError::invalid_format(
                    "question",
                    format!("duplicate question text for '{}'", question.id()),
                ));
            }
        }

        Ok(Self {
            questions,
            by_id,
            by_text,
        })
    }

    /// The standard sixteen-question survey, four questions per axis.
    pub fn standard() -> Self {
        let questions = STANDARD_QUESTIONS
            .iter()
            .map(|(id, axis, yes_leans, text)| {
                Question::from_static(*id, *text, *axis, *yes_leans)
            })
            .collect::<Vec<_>>();

        let mut by_id = HashMap::with_capacity(questions.len());
        let mut by_text = HashMap::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            by_id.insert(question.id().clone(), index);
            by_text.insert(question.text().to_string(), index);
        }

        Self {
            questions,
            by_id,
            by_text,
        }
    }

    /// Locates a question by ID, or by exact text.
    pub fn find(&self, reference: &QuestionRef) -> Option<&Question> {
        let index = match reference {
            QuestionRef::Id(id) => self.by_id.get(id),
            QuestionRef::Text(text) => self.by_text.get(text.as_str()),
        }?;
        self.questions.get(*index)
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.by_id.get(id).and_then(|i| self.questions.get(*i))
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions tagged with an axis.
    pub fn count_for(&self, axis: TraitAxis) -> usize {
        self.questions.iter().filter(|q| q.axis() == axis).count()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::standard()
    }
}

use super::TraitAxis::{Extraversion, Feeling, Intuition, Perceiving};
use super::YesLeans::{Negative, Positive};

const STANDARD_QUESTIONS: [(&str, TraitAxis, YesLeans, &str); 16] = [
    (
        "E1",
        Extraversion,
        Positive,
        "I feel more energized after spending time with a large group of people.",
    ),
    (
        "E2",
        Extraversion,
        Negative,
        "I tend to prefer quiet time alone over attending social events.",
    ),
    (
        "E3",
        Extraversion,
        Positive,
        "I usually speak up quickly in group discussions or meetings.",
    ),
    (
        "E4",
        Extraversion,
        Negative,
        "I find it draining to meet and interact with new people frequently.",
    ),
    (
        "N1",
        Intuition,
        Negative,
        "I prefer concrete details and proven facts over abstract ideas.",
    ),
    (
        "N2",
        Intuition,
        Positive,
        "I often daydream or think about future possibilities rather than focusing on present realities.",
    ),
    (
        "N3",
        Intuition,
        Positive,
        "I trust my instincts even when I lack specific data to support them.",
    ),
    (
        "N4",
        Intuition,
        Negative,
        "I prefer relying on proven methods and established procedures rather than experimenting with novel ideas.",
    ),
    (
        "F1",
        Feeling,
        Negative,
        "I prioritize logical reasoning over personal feelings when making decisions.",
    ),
    (
        "F2",
        Feeling,
        Positive,
        "I tend to consider how my actions might affect others\u{2019} emotions before I decide.",
    ),
    (
        "F3",
        Feeling,
        Negative,
        "I find it easy to remain objective and detached when solving problems.",
    ),
    (
        "F4",
        Feeling,
        Positive,
        "I often base my decisions on personal values or empathy for others.",
    ),
    (
        "P1",
        Perceiving,
        Negative,
        "I like having a detailed plan or schedule before starting a project.",
    ),
    (
        "P2",
        Perceiving,
        Positive,
        "I prefer to keep my options open rather than commit to a final decision too soon.",
    ),
    (
        "P3",
        Perceiving,
        Negative,
        "I feel uneasy when tasks or events are left unplanned or ambiguous.",
    ),
    (
        "P4",
        Perceiving,
        Positive,
        "I find it exciting to adapt spontaneously to changes in plans.",
    ),
];
