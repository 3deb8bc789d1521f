//! Error types for planning.
//!
//! Every variant describes an outcome the player can act on (pick other options, raise the
//! budget). None of them are retried: planning is deterministic.

use cropplan_types::{ParseLabelError, Season, TownRank};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// Nothing matching the filters fits in the days left this season.
    #[error("no crop fits the {available_days} day(s) left in {season} at rank {rank}")]
    NoViableCrop {
        season: Season,
        rank: TownRank,
        available_days: u32,
    },

    /// Crops fit, but none of their seeds is within the first purchase's price ceiling.
    #[error("no fitting seed costs {ceiling:.2}g or less")]
    NoAffordableCrop { ceiling: f64 },

    #[error("budget too low: {ceiling:.2}g per seed buys nothing")]
    BudgetTooLow { ceiling: f64 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInput {
    #[error(transparent)]
    Label(#[from] ParseLabelError),

    #[error("rank ordinal {0} is out of range 0..=6")]
    RankOrdinal(u8),

    #[error("minimum seed count must be at least 1")]
    ZeroMinSeeds,

    #[error("a gold budget or a price ceiling is required")]
    MissingBudget,

    #[error("current day {day} is outside 1..={last}")]
    DayOutOfRange { day: u32, last: u32 },
}

impl From<ParseLabelError> for PlanError {
    fn from(err: ParseLabelError) -> Self {
        PlanError::InvalidInput(InvalidInput::Label(err))
    }
}

impl PlanError {
    /// True when planning ran but had nothing to recommend, as opposed to bad arguments.
    pub fn is_user_outcome(&self) -> bool {
        matches!(
            self,
            PlanError::NoViableCrop { .. }
                | PlanError::NoAffordableCrop { .. }
                | PlanError::BudgetTooLow { .. }
        )
    }

    /// Returns the recommended process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        2
    }
}
