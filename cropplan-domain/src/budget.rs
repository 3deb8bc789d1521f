//! Per-seed budget.

use crate::error::{InvalidInput, PlanError};

/// Ceilings at or below this buy no seed in any shop.
pub const MIN_USABLE_CEILING: f64 = 15.0;

/// Highest price one seed may cost so that `min_seeds` of them fit in `gold`.
///
/// One extra gold is added before dividing, so a budget that exactly covers the seeds still
/// qualifies.
pub fn compute_ceiling(gold: u64, min_seeds: u32) -> Result<f64, PlanError> {
    if min_seeds == 0 {
        return Err(InvalidInput::ZeroMinSeeds.into());
    }
    Ok((gold as f64 + 1.0) / f64::from(min_seeds))
}

pub fn ensure_usable(ceiling: f64) -> Result<f64, PlanError> {
    if ceiling <= MIN_USABLE_CEILING {
        return Err(PlanError::BudgetTooLow { ceiling });
    }
    Ok(ceiling)
}
