use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::rates::models::RateDefaults;
use crate::modules::rates::repositories::RateRepository;

/// Single source of truth for commission percentages.
///
/// Direct rates resolve product-specific overrides first and fall back to the
/// configured per-tier defaults; bonus rates come from the per-distance
/// schedule. A missing rate is an error, never an implicit zero.
pub struct RateTable {
    rates: Arc<dyn RateRepository>,
    defaults: RateDefaults,
}

impl RateTable {
    pub fn new(rates: Arc<dyn RateRepository>, defaults: RateDefaults) -> Self {
        Self { rates, defaults }
    }

    /// Direct commission percentage for a selling agency's tier and product.
    pub async fn direct_rate(&self, tier_level: i32, product_id: &str) -> Result<Decimal> {
        if let Some(product_rate) = self.rates.find_product_rate(product_id, tier_level).await? {
            debug!(
                product_id = %product_id,
                tier_level,
                rate = %product_rate.commission_rate,
                "using product-specific direct rate"
            );
            return Ok(product_rate.commission_rate);
        }

        self.defaults.direct_for_tier(tier_level).ok_or_else(|| {
            AppError::configuration_missing(format!(
                "No direct commission rate for tier {} (product {})",
                tier_level, product_id
            ))
        })
    }

    /// Hierarchy bonus percentage for an ancestor at the given level distance.
    pub fn bonus_rate(&self, level_distance: u32) -> Result<Decimal> {
        self.defaults
            .bonus_for_distance(level_distance)
            .ok_or_else(|| {
                AppError::configuration_missing(format!(
                    "No hierarchy bonus rate for level distance {}",
                    level_distance
                ))
            })
    }
}
