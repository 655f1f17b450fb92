//! Survey scoring engine.

use crate::domain::foundation::ValidationError;

use super::{Answer, AxisScores, QuestionBank, SurveyResponse, TieBreak, TraitProfile};

/// Raw tally of a submission before it is turned into a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    pub scores: AxisScores,
    /// Every response received, matched or not.
    pub submitted: usize,
    /// Responses that matched a question in the bank.
    pub matched: usize,
}

/// Aggregates answers into axis scores and a [`TraitProfile`].
///
/// Pure: holds only a borrowed bank and the tie policy.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    bank: &'a QuestionBank,
    tie_break: TieBreak,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(bank: &'a QuestionBank, tie_break: TieBreak) -> Self {
        Self { bank, tie_break }
    }

    /// Adds up the weights of every matched response.
    ///
    /// Responses whose question is not in the bank are skipped without
    /// validating their answer, but still count as submitted.
    ///
    /// # Errors
    ///
    /// `ValidationError` on field `responses[i].answer` when a matched
    /// response carries something other than `Yes` or `No`.
    pub fn tally(&self, responses: &[SurveyResponse]) -> Result<ScoreSheet, ValidationError> {
        let mut scores = AxisScores::new();
        let mut matched = 0;

        for (i, response) in responses.iter().enumerate() {
            let Some(question) = self.bank.find(&response.question) else {
                continue;
            };
            let answer = Answer::parse(&response.answer).map_err(|_| {
                ValidationError::invalid_format(
                    format!("responses[{}].answer", i),
                    format!(
                        "expected 'Yes' or 'No' for question {}, got '{}'",
                        question.id(),
                        response.answer
                    ),
                )
            })?;
            scores.add(question.axis(), question.weight(answer));
            matched += 1;
        }

        Ok(ScoreSheet {
            scores,
            submitted: responses.len(),
            matched,
        })
    }

    /// Scores a submission into a profile.
    pub fn score(&self, responses: &[SurveyResponse]) -> Result<TraitProfile, ValidationError> {
        let sheet = self.tally(responses)?;
        Ok(TraitProfile::from_scores(
            &sheet.scores,
            sheet.submitted,
            self.tie_break,
        ))
    }
}
