use crate::error::{InvalidInput, PlanError};
use crate::ports::CatalogView;
use cropplan_types::plan::{CropPlan, PlanRequest, PlanSummary, PlantingDecision, ToolInfo};
use cropplan_types::{CropRecord, SEASON_LENGTH_DAYS};
use std::collections::HashSet;
use tracing::debug;

/// Price ceiling applied to every purchase after the first one.
pub const DEFAULT_RESET_CEILING: f64 = 300.0;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub season_length: u32,
    /// The caller's ceiling only binds the first seed; later replants use this one.
    pub reset_ceiling: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            season_length: SEASON_LENGTH_DAYS,
            reset_ceiling: DEFAULT_RESET_CEILING,
        }
    }
}

/// Greedy planner: picks the best crop for the days left, then repeats with what remains.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

/// A candidate scored for one slot of the plan.
#[derive(Debug, Clone)]
struct Scored<'a> {
    crop: &'a CropRecord,
    profit_per_day: f64,
    remaining_days: u32,
    season_end_adjusted: bool,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(
        &self,
        request: &PlanRequest,
        catalog: &dyn CatalogView,
        tool: ToolInfo,
    ) -> Result<CropPlan, PlanError> {
        let last_day = self.config.season_length.saturating_sub(1);
        if request.current_day == 0 || request.current_day > last_day {
            return Err(InvalidInput::DayOutOfRange {
                day: request.current_day,
                last: last_day,
            }
            .into());
        }
        let available_days = self.config.season_length - request.current_day;

        let fitting = base_candidates(request, catalog.crops(), available_days);
        debug!(
            season = %request.season,
            rank = %request.rank,
            available_days,
            fitting = fitting.len(),
            "filtered catalog"
        );

        let candidates = dedup_by_name(fitting);
        let Some(fastest) = candidates.iter().map(|c| c.growth_days).min() else {
            return Err(PlanError::NoViableCrop {
                season: request.season,
                rank: request.rank,
                available_days,
            });
        };

        let decisions = self.select(request, &candidates, fastest, available_days)?;

        let mut plan = CropPlan::new(tool, request.clone());
        plan.summary = PlanSummary::from_decisions(available_days, &decisions);
        plan.decisions = decisions;
        Ok(plan)
    }

    fn select(
        &self,
        request: &PlanRequest,
        candidates: &[&CropRecord],
        fastest: u32,
        available_days: u32,
    ) -> Result<Vec<PlantingDecision>, PlanError> {
        let mut decisions: Vec<PlantingDecision> = Vec::new();
        let mut days_left = available_days;
        let mut plant_day = request.current_day;
        let mut ceiling = request.price_ceiling;

        while days_left >= fastest {
            let scored = score_candidates(candidates, days_left, fastest, ceiling);
            let Some(best) = scored.into_iter().next() else {
                if decisions.is_empty() {
                    return Err(PlanError::NoAffordableCrop { ceiling });
                }
                debug!(days_left, ceiling, "no affordable crop fits; stopping");
                break;
            };

            debug!(
                seed = %best.crop.name,
                plant_day,
                profit_per_day = best.profit_per_day,
                adjusted = best.season_end_adjusted,
                "planting"
            );

            days_left -= best.crop.growth_days;
            decisions.push(PlantingDecision {
                seed_name: best.crop.name.clone(),
                daily_profit: best.profit_per_day,
                remaining_days_after_harvest: best.remaining_days,
                plant_day,
                growth_days: best.crop.growth_days,
                season_end_adjusted: best.season_end_adjusted,
            });
            plant_day += best.crop.growth_days;
            ceiling = self.config.reset_ceiling;
        }

        Ok(decisions)
    }
}

/// Season, rank, exclusion and multi-harvest filters, plus "must be ready before the season
/// ends". Catalog order is preserved.
fn base_candidates<'a>(
    request: &PlanRequest,
    crops: &'a [CropRecord],
    available_days: u32,
) -> Vec<&'a CropRecord> {
    crops
        .iter()
        .filter(|c| c.season == request.season)
        .filter(|c| request.rank.permits(c.town_rank))
        .filter(|c| !request.excluded.contains(&c.name))
        .filter(|c| request.allow_multi_harvest || !c.is_multi_harvest)
        .filter(|c| c.growth_days > 0 && c.growth_days <= available_days)
        .collect()
}

/// One row per name: the one with the highest catalog profit per day.
fn dedup_by_name(mut rows: Vec<&CropRecord>) -> Vec<&CropRecord> {
    rows.sort_by(|a, b| b.profit_per_day.total_cmp(&a.profit_per_day));
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|c| seen.insert(c.name.clone()))
        .collect()
}

/// Scores every affordable candidate that still fits, best first.
///
/// A crop whose harvest leaves too few days to plant even the fastest crop again has its profit
/// spread over every remaining day.
fn score_candidates<'a>(
    candidates: &[&'a CropRecord],
    days_left: u32,
    fastest: u32,
    ceiling: f64,
) -> Vec<Scored<'a>> {
    let mut scored: Vec<Scored<'a>> = candidates
        .iter()
        .filter(|c| c.seed_buy_price <= ceiling && c.growth_days <= days_left)
        .map(|&crop| {
            let remaining_days = days_left - crop.growth_days;
            let can_replant = remaining_days >= fastest;
            let profit_per_day = if can_replant {
                crop.profit_per_day
            } else {
                crop.net_per_planting() / f64::from(days_left)
            };
            Scored {
                crop,
                profit_per_day,
                remaining_days,
                season_end_adjusted: !can_replant,
            }
        })
        .collect();

    // Stable: equal scores keep candidate order.
    scored.sort_by(|a, b| b.profit_per_day.total_cmp(&a.profit_per_day));
    scored
}
