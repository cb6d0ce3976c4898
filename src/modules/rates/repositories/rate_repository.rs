use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::rates::models::ProductRate;

/// Lookup of product-specific commission rates
#[async_trait]
pub trait RateRepository: Send + Sync {
    /// The currently valid rate for (product, tier), None when unconfigured
    async fn find_product_rate(
        &self,
        product_id: &str,
        tier_level: i32,
    ) -> Result<Option<ProductRate>>;
}

/// MySQL-backed rate lookup over the commission_settings table
pub struct MySqlRateRepository {
    pool: MySqlPool,
}

impl MySqlRateRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateRepository for MySqlRateRepository {
    async fn find_product_rate(
        &self,
        product_id: &str,
        tier_level: i32,
    ) -> Result<Option<ProductRate>> {
        let rate = sqlx::query_as::<_, ProductRate>(
            "SELECT id, product_id, tier_level, commission_rate, is_active, \
                    valid_from, valid_until, created_at, updated_at \
             FROM commission_settings \
             WHERE product_id = ? \
               AND tier_level = ? \
               AND is_active = TRUE \
               AND valid_from <= NOW() \
               AND (valid_until IS NULL OR valid_until > NOW()) \
             ORDER BY valid_from DESC \
             LIMIT 1",
        )
        .bind(product_id)
        .bind(tier_level)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }
}
