//! Trait axes and their per-axis score accumulators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four dichotomy dimensions, scored independently.
///
/// Declaration order is the order letters appear in the four-letter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitAxis {
    Extraversion,
    Intuition,
    Feeling,
    Perceiving,
}

impl TraitAxis {
    /// All axes in type-letter order.
    pub const ALL: [TraitAxis; 4] = [
        TraitAxis::Extraversion,
        TraitAxis::Intuition,
        TraitAxis::Feeling,
        TraitAxis::Perceiving,
    ];

    fn index(self) -> usize {
        match self {
            TraitAxis::Extraversion => 0,
            TraitAxis::Intuition => 1,
            TraitAxis::Feeling => 2,
            TraitAxis::Perceiving => 3,
        }
    }

    /// Letter used when the axis score is positive.
    pub fn positive_letter(self) -> char {
        match self {
            TraitAxis::Extraversion => 'E',
            TraitAxis::Intuition => 'S',
            TraitAxis::Feeling => 'T',
            TraitAxis::Perceiving => 'J',
        }
    }

    /// Letter used when the axis score is negative.
    pub fn negative_letter(self) -> char {
        match self {
            TraitAxis::Extraversion => 'I',
            TraitAxis::Intuition => 'N',
            TraitAxis::Feeling => 'F',
            TraitAxis::Perceiving => 'P',
        }
    }

    /// Behavioural descriptor used when the axis score is positive.
    pub fn positive_label(self) -> &'static str {
        match self {
            TraitAxis::Extraversion => "Enjoys social interaction",
            TraitAxis::Intuition => "Focuses on details",
            TraitAxis::Feeling => "Logical decision-maker",
            TraitAxis::Perceiving => "Plans ahead",
        }
    }

    /// Behavioural descriptor used when the axis score is negative.
    pub fn negative_label(self) -> &'static str {
        match self {
            TraitAxis::Extraversion => "Prefers solitude",
            TraitAxis::Intuition => "Thinks big picture",
            TraitAxis::Feeling => "Empathetic decision-maker",
            TraitAxis::Perceiving => "Flexible planner",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TraitAxis::Extraversion => "extraversion",
            TraitAxis::Intuition => "intuition",
            TraitAxis::Feeling => "feeling",
            TraitAxis::Perceiving => "perceiving",
        }
    }
}

impl fmt::Display for TraitAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed accumulator per axis.
///
/// Each matched answer moves its axis by exactly one, so an axis score is
/// bounded by the number of matched questions on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisScores([i32; 4]);

impl AxisScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a weight to one axis.
    pub fn add(&mut self, axis: TraitAxis, weight: i32) {
        self.0[axis.index()] += weight;
    }

    /// Returns the current score of an axis.
    pub fn get(&self, axis: TraitAxis) -> i32 {
        self.0[axis.index()]
    }

    /// Iterates `(axis, score)` in type-letter order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitAxis, i32)> + '_ {
        TraitAxis::ALL.iter().map(move |axis| (*axis, self.get(*axis)))
    }
}
