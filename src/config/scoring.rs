//! Scoring configuration

use serde::Deserialize;

use crate::domain::survey::TieBreak;

/// Survey scoring settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    /// Letter chosen when an axis nets out to zero
    #[serde(default)]
    pub tie_break: TieBreak,
}
