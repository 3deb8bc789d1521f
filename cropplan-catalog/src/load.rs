use crate::catalog::Catalog;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cropplan_types::{CropRecord, Season, TownRank};
use fs_err as fs;
use serde::Deserialize;
use std::fmt;
use std::io;
use thiserror::Error;
use tracing::{debug, warn};

const BUNDLED_CSV: &str = include_str!("../data/coral_island_seeds.csv");

/// Header columns every catalog must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "season",
    "town_rank",
    "days",
    "is_mult_har",
    "sale_value",
    "seed_buy_price",
    "profit_per_day",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(Utf8PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Bundled => f.write_str("<bundled>"),
            CatalogSource::File(path) => write!(f, "{}", path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub source: CatalogSource,
    pub catalog: Catalog,
    /// Rows that failed validation, in file order.
    pub rejected: Vec<RowError>,
}

impl LoadedCatalog {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("csv error: {message}")]
    Csv { message: String },

    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// A catalog row that could not be turned into a [`CropRecord`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}, column {column}: {message}")]
pub struct RowError {
    pub line: u64,
    pub column: &'static str,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    season: String,
    town_rank: String,
    days: String,
    is_mult_har: String,
    sale_value: String,
    seed_buy_price: String,
    profit_per_day: String,
}

pub fn load_catalog(path: &Utf8Path) -> anyhow::Result<LoadedCatalog> {
    debug!(path = %path, "loading crop catalog");
    let file = fs::File::open(path).with_context(|| format!("open catalog {}", path))?;
    let loaded = parse_catalog(file, CatalogSource::File(path.to_path_buf()))
        .with_context(|| format!("parse catalog {}", path))?;
    report(&loaded);
    Ok(loaded)
}

pub fn load_bundled() -> anyhow::Result<LoadedCatalog> {
    let loaded = parse_catalog(BUNDLED_CSV.as_bytes(), CatalogSource::Bundled)
        .context("parse bundled catalog")?;
    report(&loaded);
    Ok(loaded)
}

fn report(loaded: &LoadedCatalog) {
    for row in &loaded.rejected {
        warn!(source = %loaded.source, "rejected catalog row: {}", row);
    }
    debug!(
        source = %loaded.source,
        crops = loaded.catalog.len(),
        rejected = loaded.rejected.len(),
        "catalog loaded"
    );
}

pub fn parse_catalog<R: io::Read>(
    reader: R,
    source: CatalogSource,
) -> Result<LoadedCatalog, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| CatalogError::Csv {
            message: e.to_string(),
        })?
        .clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::MissingColumns { columns: missing });
    }

    let mut crops = Vec::new();
    let mut rejected = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| CatalogError::Csv {
            message: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw = match record.deserialize::<RawRow>(Some(&headers)) {
            Ok(raw) => raw,
            Err(e) => {
                rejected.push(RowError {
                    line,
                    column: "-",
                    message: e.to_string(),
                });
                continue;
            }
        };

        match validate_row(&raw) {
            Ok(crop) => crops.push(crop),
            Err((column, message)) => rejected.push(RowError {
                line,
                column,
                message,
            }),
        }
    }

    Ok(LoadedCatalog {
        source,
        catalog: Catalog::new(crops),
        rejected,
    })
}

type FieldError = (&'static str, String);

fn validate_row(raw: &RawRow) -> Result<CropRecord, FieldError> {
    let name = raw.name.trim().to_lowercase();
    if name.is_empty() {
        return Err(("name", "empty crop name".to_string()));
    }

    let season = raw
        .season
        .parse::<Season>()
        .map_err(|e| ("season", e.to_string()))?;
    let town_rank = parse_rank(&raw.town_rank).map_err(|m| ("town_rank", m))?;

    let growth_days = raw
        .days
        .parse::<u32>()
        .map_err(|e| ("days", format!("'{}': {}", raw.days, e)))?;
    if growth_days == 0 {
        return Err(("days", "growth days must be at least 1".to_string()));
    }

    Ok(CropRecord {
        name,
        season,
        town_rank,
        growth_days,
        is_multi_harvest: parse_bool(&raw.is_mult_har).map_err(|m| ("is_mult_har", m))?,
        sale_value: parse_amount(&raw.sale_value).map_err(|m| ("sale_value", m))?,
        seed_buy_price: parse_amount(&raw.seed_buy_price).map_err(|m| ("seed_buy_price", m))?,
        profit_per_day: parse_finite(&raw.profit_per_day).map_err(|m| ("profit_per_day", m))?,
    })
}

/// Accepts either the ordinal (`0` = S .. `6` = F) or the label itself.
fn parse_rank(s: &str) -> Result<TownRank, String> {
    if let Ok(ordinal) = s.parse::<u8>() {
        return TownRank::from_ordinal(ordinal)
            .ok_or_else(|| format!("rank ordinal {} out of range 0..=6", ordinal));
    }
    s.parse::<TownRank>().map_err(|e| e.to_string())
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!("'{}' is not a boolean", s)),
    }
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|e| format!("'{}': {}", s, e))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("'{}' is not a finite number", s))
    }
}

fn parse_amount(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if v < 0.0 {
        return Err(format!("'{}' must not be negative", s));
    }
    Ok(v)
}
