//! Shared DTOs for the cropplan workspace.
//!
//! # Design constraints
//! - Plans are serialized to JSON for other tools to consume.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod crop;
pub mod plan;

pub use crop::{CropRecord, ParseLabelError, SEASON_LENGTH_DAYS, Season, TownRank};

/// Schema identifiers.
pub mod schema {
    pub const CROPPLAN_PLAN_V1: &str = "cropplan.plan.v1";
}
