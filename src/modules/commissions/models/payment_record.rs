use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::Period;

/// A payout made against a ledger entry's net payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PaymentRecord {
    pub id: String,

    pub agency_id: String,

    #[sqlx(try_from = "String")]
    pub period: Period,

    /// The ledger entry's net_payment at payout time
    pub amount: i64,

    pub payment_date: NaiveDate,

    pub payment_method: String,

    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn new(
        agency_id: &str,
        period: Period,
        amount: i64,
        payment_date: NaiveDate,
        payment_method: &str,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            agency_id: agency_id.to_string(),
            period,
            amount,
            payment_date,
            payment_method: payment_method.to_string(),
            note,
            created_at: Utc::now(),
        }
    }
}
