use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::commissions::models::PaymentRecord;

/// Append-only payout history
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, record: &PaymentRecord) -> Result<()>;

    async fn list_by_agency(&self, agency_id: &str) -> Result<Vec<PaymentRecord>>;
}

/// MySQL-backed payout history
pub struct MySqlPaymentRepository {
    pool: MySqlPool,
}

impl MySqlPaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for MySqlPaymentRepository {
    async fn insert(&self, record: &PaymentRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO payment_history (\
                 id, agency_id, period, amount, payment_date, payment_method, note, created_at\
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.agency_id)
        .bind(record.period.to_string())
        .bind(record.amount)
        .bind(record.payment_date)
        .bind(&record.payment_method)
        .bind(&record.note)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_agency(&self, agency_id: &str) -> Result<Vec<PaymentRecord>> {
        let records = sqlx::query_as::<_, PaymentRecord>(
            "SELECT id, agency_id, period, amount, payment_date, payment_method, note, created_at \
             FROM payment_history \
             WHERE agency_id = ? \
             ORDER BY payment_date DESC",
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
