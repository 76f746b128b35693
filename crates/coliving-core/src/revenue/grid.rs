use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::revenue::pricing::SeasonPricing;
use crate::types::{Money, Rate};

/// Base occupancy and pricing of one room type in one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSeasonAssumption {
    /// Occupancy before any scenario factor (0..=1)
    pub occupancy_base: Rate,
    pub price_per_night: Money,
    pub price_per_week: Money,
    pub price_per_month: Money,
    pub share_nightly: Decimal,
    pub share_weekly: Decimal,
    pub share_monthly: Decimal,
}

impl RoomSeasonAssumption {
    pub fn pricing(&self) -> SeasonPricing {
        SeasonPricing {
            price_per_night: self.price_per_night,
            price_per_week: self.price_per_week,
            price_per_month: self.price_per_month,
            share_nightly: self.share_nightly,
            share_weekly: self.share_weekly,
            share_monthly: self.share_monthly,
        }
    }
}

/// A season's length and its per-room-type assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAssumption {
    pub days: u32,
    pub rooms: IndexMap<String, RoomSeasonAssumption>,
}

/// Season × room-type assumption table, seasons in reporting order.
///
/// A missing (season, room type) cell is a valid state: that room type earns
/// nothing in that season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonGrid(IndexMap<String, SeasonAssumption>);

impl SeasonGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, season: impl Into<String>, assumption: SeasonAssumption) {
        self.0.insert(season.into(), assumption);
    }

    pub fn season(&self, season: &str) -> Option<&SeasonAssumption> {
        self.0.get(season)
    }

    /// Two-key lookup: `None` means zero contribution, not an error.
    pub fn cell(&self, season: &str, room_type: &str) -> Option<&RoomSeasonAssumption> {
        self.0.get(season).and_then(|s| s.rooms.get(room_type))
    }

    pub(crate) fn as_map_mut(&mut self) -> &mut IndexMap<String, SeasonAssumption> {
        &mut self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SeasonAssumption)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_days(&self) -> u32 {
        self.0.values().map(|s| s.days).sum()
    }
}

impl FromIterator<(String, SeasonAssumption)> for SeasonGrid {
    fn from_iter<I: IntoIterator<Item = (String, SeasonAssumption)>>(iter: I) -> Self {
        SeasonGrid(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cell(occ: Decimal) -> RoomSeasonAssumption {
        RoomSeasonAssumption {
            occupancy_base: occ,
            price_per_night: dec!(100),
            price_per_week: dec!(600),
            price_per_month: dec!(2000),
            share_nightly: dec!(1),
            share_weekly: dec!(0),
            share_monthly: dec!(0),
        }
    }

    #[test]
    fn test_cell_lookup() {
        let mut grid = SeasonGrid::new();
        grid.insert(
            "Winter",
            SeasonAssumption {
                days: 90,
                rooms: IndexMap::from([("studio".to_string(), cell(dec!(0.8)))]),
            },
        );

        assert_eq!(grid.cell("Winter", "studio").unwrap().occupancy_base, dec!(0.8));
        assert!(grid.cell("Winter", "dorm").is_none());
        assert!(grid.cell("Summer", "studio").is_none());
    }

    #[test]
    fn test_insertion_order_and_days() {
        let grid: SeasonGrid = [
            ("Low".to_string(), SeasonAssumption { days: 185, rooms: IndexMap::new() }),
            ("High".to_string(), SeasonAssumption { days: 90, rooms: IndexMap::new() }),
        ]
        .into_iter()
        .collect();

        let names: Vec<&String> = grid.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Low", "High"]);
        assert_eq!(grid.total_days(), 275);
    }
}
