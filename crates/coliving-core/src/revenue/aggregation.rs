use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::revenue::pricing::SeasonPricing;
use crate::types::{Money, Rate};

/// A room category and how many rooms of it the property has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    pub name: String,
    pub count: u32,
}

/// One season as seen by the revenue model: occupancy and pricing keyed by
/// room type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub days: u32,
    pub occupancy: IndexMap<String, Rate>,
    pub pricing: IndexMap<String, SeasonPricing>,
}

/// Revenue line for one room type in one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeRevenue {
    pub room_type: String,
    pub equivalent_nightly_rate: Money,
    pub occupancy_rate: Rate,
    /// count × days
    pub total_room_nights: u64,
    /// total_room_nights × occupancy_rate
    pub occupied_nights: Decimal,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRevenue {
    pub season: String,
    pub days: u32,
    pub revenue: Money,
    pub by_room_type: Vec<RoomTypeRevenue>,
}

/// Annual revenue with its season × room type breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub total_revenue: Money,
    pub per_season: Vec<SeasonRevenue>,
}

impl RevenueBreakdown {
    pub fn line(&self, season: &str, room_type: &str) -> Option<&RoomTypeRevenue> {
        self.per_season
            .iter()
            .find(|s| s.season == season)
            .and_then(|s| s.by_room_type.iter().find(|r| r.room_type == room_type))
    }
}

/// Compute annual revenue across every season and room type.
///
/// Seasons are reported in the order given, and room types in inventory
/// order. A room type with no pricing entry in a season is left out of that
/// season. A missing occupancy entry reads as zero. Occupancy is used as
/// given, without clamping.
pub fn simulate_annual_revenue(room_types: &[RoomType], seasons: &[Season]) -> RevenueBreakdown {
    let mut per_season = Vec::with_capacity(seasons.len());
    let mut total_revenue = Decimal::ZERO;

    for season in seasons {
        let mut season_revenue = Decimal::ZERO;
        let mut by_room_type = Vec::with_capacity(room_types.len());

        for room_type in room_types {
            let Some(pricing) = season.pricing.get(&room_type.name) else {
                continue;
            };
            let occupancy_rate = season
                .occupancy
                .get(&room_type.name)
                .copied()
                .unwrap_or(Decimal::ZERO);

            let rate = pricing.equivalent_nightly_rate();
            let total_room_nights = u64::from(room_type.count) * u64::from(season.days);
            let occupied_nights = Decimal::from(total_room_nights) * occupancy_rate;
            let revenue = occupied_nights * rate;

            season_revenue += revenue;
            by_room_type.push(RoomTypeRevenue {
                room_type: room_type.name.clone(),
                equivalent_nightly_rate: rate,
                occupancy_rate,
                total_room_nights,
                occupied_nights,
                revenue,
            });
        }

        total_revenue += season_revenue;
        per_season.push(SeasonRevenue {
            season: season.name.clone(),
            days: season.days,
            revenue: season_revenue,
            by_room_type,
        });
    }

    RevenueBreakdown {
        total_revenue,
        per_season,
    }
}
