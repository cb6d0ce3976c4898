use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{Period, Result};
use crate::modules::commissions::models::HierarchyBonusRecord;

/// Access to hierarchy bonus rows and their approval state
#[async_trait]
pub trait HierarchyBonusRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<HierarchyBonusRecord>>;

    async fn list_by_period(&self, period: Period) -> Result<Vec<HierarchyBonusRecord>>;

    async fn list_pending_by_period(&self, period: Period) -> Result<Vec<HierarchyBonusRecord>>;

    /// Persist approval fields after a status transition
    async fn update(&self, bonus: &HierarchyBonusRecord) -> Result<()>;
}

/// MySQL-backed bonus store
pub struct MySqlHierarchyBonusRepository {
    pool: MySqlPool,
}

impl MySqlHierarchyBonusRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const BONUS_COLUMNS: &str = "id, sale_id, source_agency_id, benefit_agency_id, level_distance, \
     rate, gross_amount, invoice_deduction, withholding_tax, net_amount, \
     period, status, approved_at, approved_by, created_at, updated_at";

#[async_trait]
impl HierarchyBonusRepository for MySqlHierarchyBonusRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<HierarchyBonusRecord>> {
        let bonus = sqlx::query_as::<_, HierarchyBonusRecord>(&format!(
            "SELECT {} FROM hierarchy_bonuses WHERE id = ?",
            BONUS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bonus)
    }

    async fn list_by_period(&self, period: Period) -> Result<Vec<HierarchyBonusRecord>> {
        let bonuses = sqlx::query_as::<_, HierarchyBonusRecord>(&format!(
            "SELECT {} FROM hierarchy_bonuses WHERE period = ? ORDER BY created_at DESC",
            BONUS_COLUMNS
        ))
        .bind(period.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(bonuses)
    }

    async fn list_pending_by_period(&self, period: Period) -> Result<Vec<HierarchyBonusRecord>> {
        let bonuses = sqlx::query_as::<_, HierarchyBonusRecord>(&format!(
            "SELECT {} FROM hierarchy_bonuses \
             WHERE period = ? AND status = 'pending' \
             ORDER BY created_at",
            BONUS_COLUMNS
        ))
        .bind(period.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(bonuses)
    }

    async fn update(&self, bonus: &HierarchyBonusRecord) -> Result<()> {
        sqlx::query(
            "UPDATE hierarchy_bonuses \
             SET status = ?, approved_at = ?, approved_by = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(bonus.status)
        .bind(bonus.approved_at)
        .bind(&bonus.approved_by)
        .bind(bonus.updated_at)
        .bind(&bonus.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
