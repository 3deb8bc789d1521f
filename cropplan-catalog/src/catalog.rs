use cropplan_types::{CropRecord, Season, TownRank};
use std::collections::BTreeSet;

/// Read-only crop table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    crops: Vec<CropRecord>,
}

impl Catalog {
    pub fn new(crops: Vec<CropRecord>) -> Self {
        Self { crops }
    }

    /// Rows in file order.
    pub fn crops(&self) -> &[CropRecord] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn in_season(&self, season: Season) -> impl Iterator<Item = &CropRecord> {
        self.crops.iter().filter(move |c| c.season == season)
    }

    /// Names of the crops a player at `rank` can buy in `season`.
    pub fn list_available(&self, rank: TownRank, season: Season) -> BTreeSet<String> {
        self.in_season(season)
            .filter(|c| rank.permits(c.town_rank))
            .map(|c| c.name.clone())
            .collect()
    }
}
