//! Survey domain: questions, answers, and trait scoring.

mod axis;
mod question;
mod question_bank;
mod scoring;
mod trait_profile;

pub use axis::{AxisScores, TraitAxis};
pub use question::{Answer, Question, QuestionId, QuestionRef, SurveyResponse, YesLeans};
pub use question_bank::QuestionBank;
pub use scoring::{ScoreSheet, ScoringEngine};
pub use trait_profile::{
    AxisTrait, BehavioralTraits, MbtiType, TieBreak, TraitProfile, NEUTRAL_LABEL, NEUTRAL_LETTER,
};
