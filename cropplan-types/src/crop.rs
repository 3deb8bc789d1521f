use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every season lasts exactly this many days.
pub const SEASON_LENGTH_DAYS: u32 = 28;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == label)
            .ok_or_else(|| ParseLabelError {
                kind: "season",
                value: s.to_string(),
                expected: "spring, summer, fall, winter",
            })
    }
}

/// Town rank. `S` is the most prestigious rank, `F` the starting one.
///
/// Ranks are encoded as ordinals with `S = 0` through `F = 6`. A crop stores the
/// ordinal of the rank it requires; a player may buy its seed when the crop's
/// ordinal is at or above the player's own (see [`TownRank::permits`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TownRank {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl TownRank {
    /// Ordered from most to least prestigious, i.e. by ordinal.
    pub const ALL: [TownRank; 7] = [
        TownRank::S,
        TownRank::A,
        TownRank::B,
        TownRank::C,
        TownRank::D,
        TownRank::E,
        TownRank::F,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            TownRank::S => 0,
            TownRank::A => 1,
            TownRank::B => 2,
            TownRank::C => 3,
            TownRank::D => 4,
            TownRank::E => 5,
            TownRank::F => 6,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<TownRank> {
        TownRank::ALL.get(usize::from(ordinal)).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            TownRank::S => "S",
            TownRank::A => "A",
            TownRank::B => "B",
            TownRank::C => "C",
            TownRank::D => "D",
            TownRank::E => "E",
            TownRank::F => "F",
        }
    }

    /// Whether a player holding `self` may buy seeds gated behind `required`.
    pub fn permits(self, required: TownRank) -> bool {
        required.ordinal() >= self.ordinal()
    }
}

impl fmt::Display for TownRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TownRank {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        TownRank::ALL
            .into_iter()
            .find(|rank| rank.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| ParseLabelError {
                kind: "town rank",
                value: s.to_string(),
                expected: "S, A, B, C, D, E, F",
            })
    }
}

/// One row of the crop catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    pub name: String,
    pub season: Season,
    pub town_rank: TownRank,
    pub growth_days: u32,
    pub is_multi_harvest: bool,
    pub sale_value: f64,
    pub seed_buy_price: f64,

    /// Net profit per day as published by the catalog.
    pub profit_per_day: f64,
}

impl CropRecord {
    /// Profit of a single planting when it is the last one of the season.
    pub fn net_per_planting(&self) -> f64 {
        self.sale_value - self.seed_buy_price
    }
}
