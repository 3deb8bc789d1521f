use crate::crop::{Season, TownRank};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropPlan {
    pub schema: String,
    pub tool: ToolInfo,
    pub request: PlanRequest,

    #[serde(default)]
    pub decisions: Vec<PlantingDecision>,

    pub summary: PlanSummary,
}

impl CropPlan {
    pub fn new(tool: ToolInfo, request: PlanRequest) -> Self {
        Self {
            schema: crate::schema::CROPPLAN_PLAN_V1.to_string(),
            tool,
            request,
            decisions: vec![],
            summary: PlanSummary::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Inputs of a single planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Day of the season the first seed goes in (1-based).
    pub current_day: u32,
    pub rank: TownRank,
    pub season: Season,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub excluded: BTreeSet<String>,

    /// Highest seed price the first purchase may cost.
    pub price_ceiling: f64,

    #[serde(default = "default_true")]
    pub allow_multi_harvest: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingDecision {
    pub seed_name: String,

    /// Profit per day that won the comparison for this slot.
    pub daily_profit: f64,

    pub remaining_days_after_harvest: u32,

    pub plant_day: u32,
    pub growth_days: u32,

    /// True when `daily_profit` was spread over the rest of the season because
    /// nothing else fits after this harvest.
    #[serde(default)]
    pub season_end_adjusted: bool,
}

impl PlantingDecision {
    /// Profit of this planting over the days it was amortized across.
    pub fn planting_profit(&self) -> f64 {
        let basis = if self.season_end_adjusted {
            self.growth_days + self.remaining_days_after_harvest
        } else {
            self.growth_days
        };
        self.daily_profit * f64::from(basis)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub decisions: u64,
    pub available_days: u32,
    pub days_used: u32,
    pub days_idle: u32,
    pub estimated_profit: f64,
}

impl PlanSummary {
    pub fn from_decisions(available_days: u32, decisions: &[PlantingDecision]) -> Self {
        let days_used: u32 = decisions.iter().map(|d| d.growth_days).sum();
        Self {
            decisions: decisions.len() as u64,
            available_days,
            days_used,
            days_idle: available_days.saturating_sub(days_used),
            estimated_profit: decisions.iter().map(PlantingDecision::planting_profit).sum(),
        }
    }
}
