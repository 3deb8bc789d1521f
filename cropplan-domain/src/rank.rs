//! Rank label encoding. `S` is 0, `F` is 6.

use crate::error::{InvalidInput, PlanError};
use cropplan_types::TownRank;

pub fn encode(label: &str) -> Result<u8, PlanError> {
    Ok(label.parse::<TownRank>()?.ordinal())
}

pub fn decode(ordinal: u8) -> Result<TownRank, PlanError> {
    TownRank::from_ordinal(ordinal).ok_or(PlanError::InvalidInput(InvalidInput::RankOrdinal(
        ordinal,
    )))
}
