//! SubmitSurvey - Command handler for scoring a survey and storing the profile.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, Timestamp, UserId, ValidationError};
use crate::domain::survey::{
    QuestionBank, ScoringEngine, SurveyResponse, TieBreak, TraitProfile,
};
use crate::domain::user::{PhoneNumber, Profile};
use crate::ports::ProfileStore;

/// Command to score a survey submission.
#[derive(Debug, Clone)]
pub struct SubmitSurveyCommand {
    pub user_id: UserId,
    pub phone_number: Option<PhoneNumber>,
    pub responses: Vec<SurveyResponse>,
}

/// Result of a stored submission.
#[derive(Debug, Clone)]
pub struct SubmitSurveyResult {
    pub profile: Profile,
    /// Responses that matched a known question.
    pub matched: usize,
}

/// Handler that scores answers and replaces the user's stored profile.
pub struct SubmitSurveyHandler {
    bank: Arc<QuestionBank>,
    store: Arc<dyn ProfileStore>,
    tie_break: TieBreak,
}

impl SubmitSurveyHandler {
    pub fn new(bank: Arc<QuestionBank>, store: Arc<dyn ProfileStore>, tie_break: TieBreak) -> Self {
        Self {
            bank,
            store,
            tie_break,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitSurveyCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitSurveyResult, DomainError> {
        // 1. Require at least one response
        if cmd.responses.is_empty() {
            return Err(ValidationError::empty_field("responses").into());
        }

        // 2. Score
        let engine = ScoringEngine::new(&self.bank, self.tie_break);
        let sheet = engine.tally(&cmd.responses)?;
        if sheet.matched < sheet.submitted {
            tracing::debug!(
                user_id = %cmd.user_id,
                submitted = sheet.submitted,
                matched = sheet.matched,
                "Skipped responses for unknown questions"
            );
        }
        let traits = TraitProfile::from_scores(
            &sheet.scores,
            sheet.submitted,
            self.tie_break,
        );

        // 3. Replace stored profile
        let profile = Profile::new(cmd.user_id, cmd.phone_number, traits, Timestamp::now());
        self.store.upsert(&profile).await?;

        tracing::info!(
            user_id = %profile.user_id(),
            mbti_type = %profile.mbti_type(),
            correlation_id = metadata.correlation_id(),
            "Survey scored"
        );

        Ok(SubmitSurveyResult {
            profile,
            matched: sheet.matched,
        })
    }
}
