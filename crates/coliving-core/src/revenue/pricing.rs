use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

const NIGHTS_PER_WEEK: Decimal = dec!(7);
const NIGHTS_PER_MONTH: Decimal = dec!(30);

/// Tenor prices for one room type in one season, and the share of stays
/// booked at each tenor.
///
/// Shares are relative weights; they are normalised by their sum and need
/// not add up to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonPricing {
    pub price_per_night: Money,
    pub price_per_week: Money,
    pub price_per_month: Money,
    pub share_nightly: Decimal,
    pub share_weekly: Decimal,
    pub share_monthly: Decimal,
}

impl SeasonPricing {
    /// Blended price per occupied night across the nightly/weekly/monthly mix.
    ///
    /// Weekly prices count as 1/7 per night and monthly prices as 1/30.
    /// A zero tenor price contributes zero but its weight still applies.
    /// Returns zero when the shares sum to zero or less.
    pub fn equivalent_nightly_rate(&self) -> Money {
        let total_share = self.share_sum();
        if total_share <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let sn = self.share_nightly / total_share;
        let sw = self.share_weekly / total_share;
        let sm = self.share_monthly / total_share;

        let nightly_part = sn * self.price_per_night;
        let weekly_part = sw * per_night(self.price_per_week, NIGHTS_PER_WEEK);
        let monthly_part = sm * per_night(self.price_per_month, NIGHTS_PER_MONTH);

        nightly_part + weekly_part + monthly_part
    }

    pub fn share_sum(&self) -> Decimal {
        self.share_nightly + self.share_weekly + self.share_monthly
    }

    /// Same mix with every tenor price multiplied by `factor`.
    pub fn scale_prices(&self, factor: Decimal) -> SeasonPricing {
        SeasonPricing {
            price_per_night: self.price_per_night * factor,
            price_per_week: self.price_per_week * factor,
            price_per_month: self.price_per_month * factor,
            ..self.clone()
        }
    }
}

fn per_night(price: Money, nights: Decimal) -> Money {
    if price.is_zero() {
        Decimal::ZERO
    } else {
        price / nights
    }
}
