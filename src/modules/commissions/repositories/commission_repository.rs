// Commission record persistence.
//
// Calculation results for one sale are replaced as a unit: the previous
// direct record and bonus rows for the sale are deleted and the new set is
// inserted inside a single transaction, so a failed recalculation never
// leaves a partial record set behind.

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{Period, Result};
use crate::modules::commissions::models::{CommissionRecord, HierarchyBonusRecord};

#[async_trait]
pub trait CommissionRepository: Send + Sync {
    /// Atomically replace all commission output for a sale
    async fn replace_for_sale(
        &self,
        sale_id: &str,
        direct: &CommissionRecord,
        bonuses: &[HierarchyBonusRecord],
    ) -> Result<()>;

    async fn find_by_sale(&self, sale_id: &str) -> Result<Vec<CommissionRecord>>;

    /// Sum of direct gross commission for an agency in a period
    async fn sum_direct_gross(&self, agency_id: &str, period: Period) -> Result<i64>;
}

/// MySQL-backed commission record store
pub struct MySqlCommissionRepository {
    pool: MySqlPool,
}

impl MySqlCommissionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_record(
        tx: &mut Transaction<'_, MySql>,
        record: &CommissionRecord,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO commission_records (\
                 id, sale_id, agency_id, kind, level_distance, rate, \
                 gross_amount, invoice_deduction, withholding_tax, net_amount, \
                 period, status, created_at, updated_at\
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.sale_id)
        .bind(&record.agency_id)
        .bind(record.kind)
        .bind(record.level_distance)
        .bind(record.rate)
        .bind(record.gross_amount)
        .bind(record.invoice_deduction)
        .bind(record.withholding_tax)
        .bind(record.net_amount)
        .bind(record.period.to_string())
        .bind(record.status)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn insert_bonus(
        tx: &mut Transaction<'_, MySql>,
        bonus: &HierarchyBonusRecord,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO hierarchy_bonuses (\
                 id, sale_id, source_agency_id, benefit_agency_id, level_distance, \
                 rate, gross_amount, invoice_deduction, withholding_tax, net_amount, \
                 period, status, approved_at, approved_by, created_at, updated_at\
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&bonus.id)
        .bind(&bonus.sale_id)
        .bind(&bonus.source_agency_id)
        .bind(&bonus.benefit_agency_id)
        .bind(bonus.level_distance)
        .bind(bonus.rate)
        .bind(bonus.gross_amount)
        .bind(bonus.invoice_deduction)
        .bind(bonus.withholding_tax)
        .bind(bonus.net_amount)
        .bind(bonus.period.to_string())
        .bind(bonus.status)
        .bind(bonus.approved_at)
        .bind(&bonus.approved_by)
        .bind(bonus.created_at)
        .bind(bonus.updated_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CommissionRepository for MySqlCommissionRepository {
    async fn replace_for_sale(
        &self,
        sale_id: &str,
        direct: &CommissionRecord,
        bonuses: &[HierarchyBonusRecord],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM commission_records WHERE sale_id = ?")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM hierarchy_bonuses WHERE sale_id = ?")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        Self::insert_record(&mut tx, direct).await?;
        for bonus in bonuses {
            Self::insert_bonus(&mut tx, bonus).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_sale(&self, sale_id: &str) -> Result<Vec<CommissionRecord>> {
        let records = sqlx::query_as::<_, CommissionRecord>(
            "SELECT id, sale_id, agency_id, kind, level_distance, rate, \
                    gross_amount, invoice_deduction, withholding_tax, net_amount, \
                    period, status, created_at, updated_at \
             FROM commission_records \
             WHERE sale_id = ? \
             ORDER BY level_distance",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn sum_direct_gross(&self, agency_id: &str, period: Period) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(gross_amount), 0) \
             FROM commission_records \
             WHERE agency_id = ? AND period = ? AND kind = 'direct'",
        )
        .bind(agency_id)
        .bind(period.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
