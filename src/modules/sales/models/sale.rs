// Sale model.
//
// Sales are recorded by the sales-entry surface and arrive here already
// validated. A confirmed sale is immutable; cancellation flips the status
// flag and never deletes the row.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::Period;

/// Sale lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum SaleStatus {
    /// Recorded but not yet confirmed; no commissions are due
    #[serde(rename = "pending")]
    Pending,

    /// Confirmed and eligible for commission calculation
    #[serde(rename = "confirmed")]
    Confirmed,

    /// Cancelled after recording; kept for audit, excluded from commissions
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaleStatus::Pending => write!(f, "pending"),
            SaleStatus::Confirmed => write!(f, "confirmed"),
            SaleStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for SaleStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SaleStatus::Pending),
            "confirmed" => Ok(SaleStatus::Confirmed),
            "cancelled" => Ok(SaleStatus::Cancelled),
            _ => Err(format!("Invalid sale status: {}", s)),
        }
    }
}

/// A recorded sale by one agency for one product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: String,

    pub agency_id: String,

    pub product_id: String,

    /// Sale amount in whole yen
    pub amount: i64,

    pub sale_date: NaiveDate,

    /// Aggregation month, derived from sale_date at recording time
    #[sqlx(try_from = "String")]
    pub period: Period,

    pub status: SaleStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Sale {
    pub fn is_confirmed(&self) -> bool {
        self.status == SaleStatus::Confirmed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == SaleStatus::Cancelled
    }
}
