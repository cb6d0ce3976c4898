// Rate schedule models.
//
// Per-product overrides live in the commission_settings table; when no
// override matches, the configured default schedules apply. Rates are
// percentages (30 = 30%), fractional values allowed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config::CommissionConfig;

/// A product-specific commission rate for one tier level
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductRate {
    pub id: String,
    pub product_id: String,
    pub tier_level: i32,
    pub commission_rate: Decimal,
    pub is_active: bool,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fallback schedules used when no product-specific rate is configured
#[derive(Debug, Clone)]
pub struct RateDefaults {
    direct_by_tier: [Decimal; 4],
    bonus_by_distance: [Decimal; 4],
}

impl RateDefaults {
    pub fn from_config(config: &CommissionConfig) -> Self {
        Self {
            direct_by_tier: config.direct_rates,
            bonus_by_distance: config.bonus_rates,
        }
    }

    /// Default direct rate for a tier level, None outside 1..=4
    pub fn direct_for_tier(&self, tier_level: i32) -> Option<Decimal> {
        if !(1..=4).contains(&tier_level) {
            return None;
        }
        Some(self.direct_by_tier[(tier_level - 1) as usize])
    }

    /// Default bonus rate for a level distance, None outside 1..=4
    pub fn bonus_for_distance(&self, level_distance: u32) -> Option<Decimal> {
        if !(1..=4).contains(&level_distance) {
            return None;
        }
        Some(self.bonus_by_distance[(level_distance - 1) as usize])
    }
}
