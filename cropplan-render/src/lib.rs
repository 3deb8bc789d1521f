//! Rendering helpers for human-readable plans.

use cropplan_domain::PlanError;
use cropplan_types::plan::{CropPlan, PlantingDecision};
use std::collections::BTreeSet;

/// One entry per planting, in the order the seeds go in.
pub fn render_plan_text(plan: &CropPlan) -> String {
    let mut out = String::new();
    for d in &plan.decisions {
        out.push_str(&format!(
            "{} ({:.2}g profit per day)\n",
            title_case(&d.seed_name),
            d.daily_profit
        ));
        out.push_str(&format!("{}{}\n", " . ".repeat(3), remaining_phrase(d)));
    }
    out
}

pub fn render_plan_md(plan: &CropPlan) -> String {
    let req = &plan.request;
    let mut out = String::new();
    out.push_str("# cropplan plan\n\n");
    out.push_str(&format!(
        "- Season: {} (day {}, {} days left)\n",
        req.season, req.current_day, plan.summary.available_days
    ));
    out.push_str(&format!("- Town rank: {}\n", req.rank));
    out.push_str(&format!("- Price ceiling: {:.2}g\n", req.price_ceiling));
    out.push_str(&format!(
        "- Multi-harvest crops: {}\n",
        if req.allow_multi_harvest {
            "allowed"
        } else {
            "excluded"
        }
    ));
    if !req.excluded.is_empty() {
        out.push_str(&format!("- Excluded: {}\n", join_titles(&req.excluded)));
    }
    out.push_str(&format!(
        "- Plantings: {} ({} days used, {} idle)\n",
        plan.summary.decisions, plan.summary.days_used, plan.summary.days_idle
    ));
    out.push_str(&format!(
        "- Estimated profit per seed: {:.2}g\n\n",
        plan.summary.estimated_profit
    ));

    out.push_str("## Plantings\n\n");
    if plan.decisions.is_empty() {
        out.push_str("_Nothing to plant._\n");
        return out;
    }

    out.push_str("| # | Day | Seed | Growth | Profit/day | Days left after harvest |\n");
    out.push_str("|---|-----|------|--------|------------|-------------------------|\n");
    for (i, d) in plan.decisions.iter().enumerate() {
        let marker = if d.season_end_adjusted { " \\*" } else { "" };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {:.2}g{} | {} |\n",
            i + 1,
            d.plant_day,
            title_case(&d.seed_name),
            d.growth_days,
            d.daily_profit,
            marker,
            d.remaining_days_after_harvest
        ));
    }

    if plan.decisions.iter().any(|d| d.season_end_adjusted) {
        out.push_str("\n\\* Profit spread over the rest of the season; nothing else fits after this harvest.\n");
    }

    out
}

/// Available crop names, one per line.
pub fn render_crop_list(names: &BTreeSet<String>) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(&title_case(name));
        out.push('\n');
    }
    out
}

/// Plain-language message for a planning outcome that produced no plan.
pub fn render_error(err: &PlanError) -> String {
    match err {
        PlanError::BudgetTooLow { .. } => "No seeds are available with your budget.".to_string(),
        PlanError::NoViableCrop {
            season,
            available_days,
            ..
        } => format!(
            "No crops fit the {} left this {} at your town rank. \
             Try an earlier day, allow multi-harvest crops or exclude fewer crops.",
            days(*available_days),
            season
        ),
        PlanError::NoAffordableCrop { ceiling } => format!(
            "No seed that fits the rest of the season costs {:.2}g or less. \
             Raise your budget or buy fewer seeds.",
            ceiling
        ),
        PlanError::InvalidInput(e) => format!("Invalid input: {}", e),
    }
}

fn remaining_phrase(d: &PlantingDecision) -> String {
    if d.remaining_days_after_harvest == 1 {
        "1 day remains after harvest".to_string()
    } else {
        format!(
            "{} days remaining after harvest",
            d.remaining_days_after_harvest
        )
    }
}

fn days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

fn join_titles(names: &BTreeSet<String>) -> String {
    names
        .iter()
        .map(|n| title_case(n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// "hot pepper" -> "Hot Pepper".
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropplan_types::plan::{PlanRequest, PlanSummary, ToolInfo};
    use cropplan_types::{Season, TownRank};
    use pretty_assertions::assert_eq;

    fn decision(name: &str, ppd: f64, remaining: u32, plant_day: u32, adjusted: bool) -> PlantingDecision {
        PlantingDecision {
            seed_name: name.to_string(),
            daily_profit: ppd,
            remaining_days_after_harvest: remaining,
            plant_day,
            growth_days: 8,
            season_end_adjusted: adjusted,
        }
    }

    fn sample_plan() -> CropPlan {
        let mut plan = CropPlan::new(
            ToolInfo {
                name: "cropplan".to_string(),
                version: None,
            },
            PlanRequest {
                current_day: 11,
                rank: TownRank::F,
                season: Season::Summer,
                excluded: ["sugarcane".to_string()].into_iter().collect(),
                price_ceiling: 50.0,
                allow_multi_harvest: true,
            },
        );
        plan.decisions = vec![
            decision("red cabbage", 15.0, 9, 11, false),
            decision("melon", 120.0 / 9.0, 1, 19, true),
        ];
        plan.summary = PlanSummary::from_decisions(17, &plan.decisions);
        plan
    }

    #[test]
    fn text_matches_planner_output_format() {
        let text = render_plan_text(&sample_plan());
        assert_eq!(
            text,
            "Red Cabbage (15.00g profit per day)\n \
             .  .  . 9 days remaining after harvest\n\
             Melon (13.33g profit per day)\n \
             .  .  . 1 day remains after harvest\n"
        );
    }

    #[test]
    fn zero_days_left_is_plural() {
        let d = decision("wheat", 10.0, 0, 24, true);
        assert_eq!(remaining_phrase(&d), "0 days remaining after harvest");
    }

    #[test]
    fn markdown_lists_request_and_plantings() {
        let md = render_plan_md(&sample_plan());
        assert!(md.starts_with("# cropplan plan\n\n"));
        assert!(md.contains("- Season: summer (day 11, 17 days left)\n"));
        assert!(md.contains("- Town rank: F\n"));
        assert!(md.contains("- Excluded: Sugarcane\n"));
        assert!(md.contains("- Plantings: 2 (16 days used, 1 idle)\n"));
        assert!(md.contains("- Estimated profit per seed: 240.00g\n"));
        assert!(md.contains("| 1 | 11 | Red Cabbage | 8 | 15.00g | 9 |\n"));
        assert!(md.contains("| 2 | 19 | Melon | 8 | 13.33g \\* | 1 |\n"));
        assert!(md.contains("\\* Profit spread over the rest of the season"));
    }

    #[test]
    fn markdown_handles_empty_plan() {
        let mut plan = sample_plan();
        plan.decisions.clear();
        let md = render_plan_md(&plan);
        assert!(md.ends_with("_Nothing to plant._\n"));
    }

    #[test]
    fn crop_list_is_title_cased() {
        let names: BTreeSet<String> = ["hot pepper", "wheat"].iter().map(|s| s.to_string()).collect();
        assert_eq!(render_crop_list(&names), "Hot Pepper\nWheat\n");
    }

    #[test]
    fn errors_map_to_plain_language() {
        assert_eq!(
            render_error(&PlanError::BudgetTooLow { ceiling: 10.0 }),
            "No seeds are available with your budget."
        );
        let msg = render_error(&PlanError::NoViableCrop {
            season: Season::Winter,
            rank: TownRank::F,
            available_days: 1,
        });
        assert!(msg.starts_with("No crops fit the 1 day left this winter"));
        let msg = render_error(&PlanError::NoAffordableCrop { ceiling: 12.0 });
        assert!(msg.contains("12.00g"));
    }

    #[test]
    fn title_case_handles_multiple_words() {
        assert_eq!(title_case("brussels sprout"), "Brussels Sprout");
        assert_eq!(title_case("corn"), "Corn");
        assert_eq!(title_case(""), "");
    }
}
