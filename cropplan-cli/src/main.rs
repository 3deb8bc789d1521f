mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig, PlanOverrides};
use cropplan_catalog::Catalog;
use cropplan_domain::{InvalidInput, PlanError, Planner, PlannerConfig, budget, rank};
use cropplan_render::{render_crop_list, render_error, render_plan_md, render_plan_text};
use cropplan_types::plan::{PlanRequest, ToolInfo};
use cropplan_types::{Season, TownRank};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "cropplan",
    version,
    about = "Greedy crop planner for the rest of a farming season."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend what to plant from a given day to the end of the season.
    Plan(PlanArgs),
    /// List crops whose seeds can be bought at a rank in a season.
    Crops(CropsArgs),
    /// Print the town ranks and their ordinals.
    Ranks,
}

#[derive(Debug, Parser)]
struct PlanArgs {
    /// Current day of the season (1-27).
    #[arg(long)]
    day: u32,

    /// Season: spring, summer, fall or winter.
    #[arg(long)]
    season: String,

    /// Town rank, S (highest) to F (lowest).
    #[arg(long)]
    rank: Option<String>,

    /// Gold available for seeds.
    #[arg(long)]
    gold: Option<u64>,

    /// Smallest number of seeds the budget must cover.
    #[arg(long)]
    min_seeds: Option<u32>,

    /// Price ceiling per seed for the first purchase (skips --gold/--min-seeds).
    #[arg(long)]
    ceiling: Option<f64>,

    /// Crop to leave out. Repeatable.
    #[arg(long)]
    exclude: Vec<String>,

    /// Leave out multi-harvest crops.
    #[arg(long, default_value_t = false)]
    no_multi_harvest: bool,

    /// Catalog CSV (default: bundled catalog).
    #[arg(long)]
    catalog: Option<Utf8PathBuf>,

    /// Config file (default: ./cropplan.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: PlanFormat,

    /// Fail when any catalog row is invalid instead of skipping it.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Debug, Parser)]
struct CropsArgs {
    /// Season: spring, summer, fall or winter.
    #[arg(long)]
    season: String,

    /// Town rank, S (highest) to F (lowest).
    #[arg(long)]
    rank: Option<String>,

    /// Catalog CSV (default: bundled catalog).
    #[arg(long)]
    catalog: Option<Utf8PathBuf>,

    /// Config file (default: ./cropplan.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PlanFormat {
    Text,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Crops(args) => cmd_crops(args),
        Command::Ranks => cmd_ranks(),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<ExitCode> {
    let file_config = config::load_or_default(args.config.as_deref(), Utf8Path::new("."))
        .context("load cropplan.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_plan_args(&PlanOverrides {
        rank: args.rank.clone(),
        gold: args.gold,
        min_seeds: args.min_seeds,
        exclude: args.exclude.clone(),
        no_multi_harvest: args.no_multi_harvest,
        catalog: args.catalog.clone(),
        strict: args.strict,
    });

    debug!(
        "merged config: rank={}, gold={:?}, min_seeds={}, exclude={:?}, allow_multi_harvest={}, reset_ceiling={}",
        merged.rank,
        merged.gold,
        merged.min_seeds,
        merged.exclude,
        merged.allow_multi_harvest,
        merged.reset_ceiling
    );

    let request = match build_request(&args, &merged) {
        Ok(request) => request,
        Err(e) => return Ok(report_outcome(&e)),
    };

    let catalog = open_catalog(merged.catalog_path.as_deref(), merged.strict)?;

    let planner = Planner::with_config(PlannerConfig {
        reset_ceiling: merged.reset_ceiling,
        ..PlannerConfig::default()
    });
    let plan = match planner.plan(&request, &catalog, tool_info()) {
        Ok(plan) => plan,
        Err(e) => return Ok(report_outcome(&e)),
    };

    info!(
        plantings = plan.summary.decisions,
        days_used = plan.summary.days_used,
        estimated_profit = plan.summary.estimated_profit,
        "plan ready"
    );

    match args.format {
        PlanFormat::Text => print!("{}", render_plan_text(&plan)),
        PlanFormat::Markdown => print!("{}", render_plan_md(&plan)),
        PlanFormat::Json => {
            let s = serde_json::to_string_pretty(&plan).context("serialize plan")?;
            println!("{}", s);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolves labels and the budget into a request. Fails before any catalog is read.
fn build_request(args: &PlanArgs, merged: &MergedConfig) -> Result<PlanRequest, PlanError> {
    let (season, rank) = resolve_labels(&args.season, &merged.rank)?;

    let ceiling = match args.ceiling {
        Some(ceiling) => ceiling,
        None => {
            let gold = merged.gold.ok_or(InvalidInput::MissingBudget)?;
            budget::compute_ceiling(gold, merged.min_seeds)?
        }
    };
    let price_ceiling = budget::ensure_usable(ceiling)?;
    debug!(price_ceiling, "budget accepted");

    Ok(PlanRequest {
        current_day: args.day,
        rank,
        season,
        excluded: merged.exclude.clone(),
        price_ceiling,
        allow_multi_harvest: merged.allow_multi_harvest,
    })
}

fn resolve_labels(season: &str, rank_label: &str) -> Result<(Season, TownRank), PlanError> {
    let season: Season = season.parse()?;
    let rank = rank::decode(rank::encode(rank_label)?)?;
    Ok((season, rank))
}

fn cmd_crops(args: CropsArgs) -> anyhow::Result<ExitCode> {
    let file_config = config::load_or_default(args.config.as_deref(), Utf8Path::new("."))
        .context("load cropplan.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_crops_args(args.rank, args.catalog);

    let (season, rank) = match resolve_labels(&args.season, &merged.rank) {
        Ok(pair) => pair,
        Err(e) => return Ok(report_outcome(&e)),
    };

    let catalog = open_catalog(merged.catalog_path.as_deref(), merged.strict)?;
    let names = catalog.list_available(rank, season);
    debug!(%season, %rank, crops = names.len(), "listed available crops");

    match args.format {
        ListFormat::Text => print!("{}", render_crop_list(&names)),
        ListFormat::Json => {
            let s = serde_json::to_string_pretty(&names).context("serialize crop list")?;
            println!("{}", s);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_ranks() -> anyhow::Result<ExitCode> {
    println!("rank  ordinal");
    for rank in TownRank::ALL {
        println!("{:<4}  {}", rank.label(), rank.ordinal());
    }
    Ok(ExitCode::SUCCESS)
}

fn open_catalog(path: Option<&Utf8Path>, strict: bool) -> anyhow::Result<Catalog> {
    let loaded = match path {
        Some(path) => cropplan_catalog::load_catalog(path)?,
        None => cropplan_catalog::load_bundled()?,
    };
    if strict && let Some(first) = loaded.rejected.first() {
        anyhow::bail!(
            "catalog {} has {} invalid row(s); first: {}",
            loaded.source,
            loaded.rejected.len(),
            first
        );
    }
    Ok(loaded.catalog)
}

/// Prints a planning outcome for the player and returns its exit code.
fn report_outcome(err: &PlanError) -> ExitCode {
    if err.is_user_outcome() {
        println!("{}", render_error(err));
    } else {
        eprintln!("{}", render_error(err));
    }
    ExitCode::from(err.exit_code())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "cropplan".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
