// Hierarchy bonus record.
//
// A bonus is a hierarchy_bonus commission tracked with its own approval
// workflow: it stays pending until an admin signs it off, and only then is
// it merged into the beneficiary's ledger entry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Period, Result};
use crate::modules::commissions::models::CommissionStatus;

/// Override commission owed to an ancestor agency for a descendant's sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HierarchyBonusRecord {
    pub id: String,

    pub sale_id: String,

    /// The agency that made the sale
    pub source_agency_id: String,

    /// The ancestor receiving the bonus
    pub benefit_agency_id: String,

    /// 1..=4 levels above the seller
    pub level_distance: i32,

    pub rate: Decimal,

    pub gross_amount: i64,

    pub invoice_deduction: i64,

    pub withholding_tax: i64,

    pub net_amount: i64,

    #[sqlx(try_from = "String")]
    pub period: Period,

    pub status: CommissionStatus,

    pub approved_at: Option<DateTime<Utc>>,

    pub approved_by: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl HierarchyBonusRecord {
    /// Identity derived from (sale, benefiting ancestor); recalculation
    /// reproduces it.
    pub fn deterministic_id(sale_id: &str, benefit_agency_id: &str) -> String {
        let seed = format!("{}:{}:hierarchy_bonus", sale_id, benefit_agency_id);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string()
    }

    pub fn is_pending(&self) -> bool {
        self.status == CommissionStatus::Pending
    }

    /// pending -> completed, one-way; records who approved and when
    pub fn approve(&mut self, approved_by: &str, approved_at: DateTime<Utc>) -> Result<()> {
        if self.status == CommissionStatus::Completed {
            return Err(AppError::validation(format!(
                "Hierarchy bonus {} is already approved",
                self.id
            )));
        }
        self.status = CommissionStatus::Completed;
        self.approved_at = Some(approved_at);
        self.approved_by = Some(approved_by.to_string());
        self.updated_at = approved_at;
        Ok(())
    }
}
