//! Scored personality profile.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AxisScores, TraitAxis};

/// How an axis whose score nets out to exactly zero is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Same branch as a negative score (I, N, F, P).
    #[default]
    SecondPole,
    /// Same branch as a positive score (E, S, T, J).
    FirstPole,
    /// Neither pole: letter `X`, "No clear preference".
    Neutral,
}

pub const NEUTRAL_LETTER: char = 'X';
pub const NEUTRAL_LABEL: &str = "No clear preference";

impl TieBreak {
    fn resolve(self, axis: TraitAxis, score: i32) -> (char, &'static str) {
        let positive = (axis.positive_letter(), axis.positive_label());
        let negative = (axis.negative_letter(), axis.negative_label());
        match score {
            s if s > 0 => positive,
            s if s < 0 => negative,
            _ => match self {
                TieBreak::SecondPole => negative,
                TieBreak::FirstPole => positive,
                TieBreak::Neutral => (NEUTRAL_LETTER, NEUTRAL_LABEL),
            },
        }
    }
}

/// Descriptor and strength of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTrait {
    #[serde(rename = "trait")]
    pub label: String,
    pub confidence: f64,
}

/// Per-axis descriptors, keyed the way stored records name them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralTraits {
    pub social_interaction: AxisTrait,
    pub thinking_style: AxisTrait,
    pub decision_making: AxisTrait,
    pub planning_style: AxisTrait,
}

impl BehavioralTraits {
    pub fn get(&self, axis: TraitAxis) -> &AxisTrait {
        match axis {
            TraitAxis::Extraversion => &self.social_interaction,
            TraitAxis::Intuition => &self.thinking_style,
            TraitAxis::Feeling => &self.decision_making,
            TraitAxis::Perceiving => &self.planning_style,
        }
    }
}

/// Four-letter type code such as `INFP`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MbtiType(String);

impl MbtiType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of scoring a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    #[serde(rename = "type")]
    pub mbti_type: MbtiType,
    pub behavioral_traits: BehavioralTraits,
}

impl TraitProfile {
    /// Derives the profile from accumulated axis scores.
    ///
    /// `submitted` is the total number of responses received, matched or
    /// not; confidence is `|score| / submitted`, or zero when nothing was
    /// submitted.
    pub fn from_scores(scores: &AxisScores, submitted: usize, tie_break: TieBreak) -> Self {
        let letters: String = TraitAxis::ALL
            .iter()
            .map(|axis| tie_break.resolve(*axis, scores.get(*axis)).0)
            .collect();
        let axis_trait = |axis: TraitAxis| {
            let score = scores.get(axis);
            AxisTrait {
                label: tie_break.resolve(axis, score).1.to_string(),
                confidence: confidence(score, submitted),
            }
        };

        Self {
            mbti_type: MbtiType(letters),
            behavioral_traits: BehavioralTraits {
                social_interaction: axis_trait(TraitAxis::Extraversion),
                thinking_style: axis_trait(TraitAxis::Intuition),
                decision_making: axis_trait(TraitAxis::Feeling),
                planning_style: axis_trait(TraitAxis::Perceiving),
            },
        }
    }

    pub fn mbti_type(&self) -> &MbtiType {
        &self.mbti_type
    }
}

fn confidence(score: i32, submitted: usize) -> f64 {
    if submitted == 0 {
        return 0.0;
    }
    (f64::from(score.unsigned_abs()) / submitted as f64).min(1.0)
}
