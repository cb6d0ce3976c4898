use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{Period, Result};
use crate::modules::commissions::models::LedgerEntry;

/// Upsert-by-(agency, period) store for ledger aggregates
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn find(&self, agency_id: &str, period: Period) -> Result<Option<LedgerEntry>>;

    /// Insert or overwrite the entry for its (agency, period) key
    async fn save(&self, entry: &LedgerEntry) -> Result<()>;
}

/// MySQL-backed ledger store
pub struct MySqlLedgerRepository {
    pool: MySqlPool,
}

impl MySqlLedgerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for MySqlLedgerRepository {
    async fn find(&self, agency_id: &str, period: Period) -> Result<Option<LedgerEntry>> {
        let entry = sqlx::query_as::<_, LedgerEntry>(
            "SELECT id, agency_id, period, direct_commission, hierarchy_bonus, \
                    total_commission, invoice_deduction, withholding_tax, net_payment, \
                    payment_date, payment_method, created_at, updated_at \
             FROM commission_ledger \
             WHERE agency_id = ? AND period = ?",
        )
        .bind(agency_id)
        .bind(period.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn save(&self, entry: &LedgerEntry) -> Result<()> {
        sqlx::query(
            "INSERT INTO commission_ledger (\
                 id, agency_id, period, direct_commission, hierarchy_bonus, \
                 total_commission, invoice_deduction, withholding_tax, net_payment, \
                 payment_date, payment_method, created_at, updated_at\
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON DUPLICATE KEY UPDATE \
                 direct_commission = VALUES(direct_commission), \
                 hierarchy_bonus = VALUES(hierarchy_bonus), \
                 total_commission = VALUES(total_commission), \
                 invoice_deduction = VALUES(invoice_deduction), \
                 withholding_tax = VALUES(withholding_tax), \
                 net_payment = VALUES(net_payment), \
                 payment_date = VALUES(payment_date), \
                 payment_method = VALUES(payment_method), \
                 updated_at = VALUES(updated_at)",
        )
        .bind(&entry.id)
        .bind(&entry.agency_id)
        .bind(entry.period.to_string())
        .bind(entry.direct_commission)
        .bind(entry.hierarchy_bonus)
        .bind(entry.total_commission)
        .bind(entry.invoice_deduction)
        .bind(entry.withholding_tax)
        .bind(entry.net_payment)
        .bind(entry.payment_date)
        .bind(&entry.payment_method)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
