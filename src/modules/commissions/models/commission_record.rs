// Commission record model.
//
// One row per (sale, beneficiary agency). Direct commissions go to the
// selling agency at level distance 0; hierarchy bonuses go to ancestors at
// distances 1 through 4. Record identity is derived from the sale, the
// beneficiary and the kind, so recalculating a sale produces the same ids
// and can safely replace earlier results.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Period, Result};

/// Kind of commission a record represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "snake_case")]
pub enum CommissionKind {
    /// Paid to the agency that made the sale
    #[serde(rename = "direct")]
    Direct,

    /// Paid to an ancestor of the selling agency
    #[serde(rename = "hierarchy_bonus")]
    HierarchyBonus,
}

impl std::fmt::Display for CommissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommissionKind::Direct => write!(f, "direct"),
            CommissionKind::HierarchyBonus => write!(f, "hierarchy_bonus"),
        }
    }
}

impl std::str::FromStr for CommissionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "direct" => Ok(CommissionKind::Direct),
            "hierarchy_bonus" => Ok(CommissionKind::HierarchyBonus),
            _ => Err(format!("Invalid commission kind: {}", s)),
        }
    }
}

/// Approval status; completed is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum CommissionStatus {
    #[serde(rename = "pending")]
    Pending,

    #[serde(rename = "completed")]
    Completed,
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommissionStatus::Pending => write!(f, "pending"),
            CommissionStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for CommissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CommissionStatus::Pending),
            "completed" => Ok(CommissionStatus::Completed),
            _ => Err(format!("Invalid commission status: {}", s)),
        }
    }
}

/// One commission owed to one agency for one sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CommissionRecord {
    pub id: String,

    pub sale_id: String,

    /// Beneficiary agency
    pub agency_id: String,

    pub kind: CommissionKind,

    /// 0 for direct, 1..=4 for hierarchy bonuses
    pub level_distance: i32,

    /// Applied percentage
    pub rate: Decimal,

    pub gross_amount: i64,

    pub invoice_deduction: i64,

    pub withholding_tax: i64,

    pub net_amount: i64,

    #[sqlx(try_from = "String")]
    pub period: Period,

    pub status: CommissionStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl CommissionRecord {
    /// Identity derived from (sale, agency, kind); recalculation reproduces it.
    pub fn deterministic_id(sale_id: &str, agency_id: &str, kind: CommissionKind) -> String {
        let seed = format!("{}:{}:{}", sale_id, agency_id, kind);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string()
    }

    /// pending -> completed, one-way
    pub fn approve(&mut self, approved_at: DateTime<Utc>) -> Result<()> {
        if self.status == CommissionStatus::Completed {
            return Err(AppError::validation(format!(
                "Commission {} is already completed",
                self.id
            )));
        }
        self.status = CommissionStatus::Completed;
        self.updated_at = approved_at;
        Ok(())
    }
}
