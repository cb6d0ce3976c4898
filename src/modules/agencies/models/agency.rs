// Agency hierarchy model.
//
// Agencies form a tree through parent_agency_id with at most four tiers.
// The commission engine only reads these rows; recruitment, approval and
// profile editing belong to the agency-management surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fiscal classification of the agency, drives withholding tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum CompanyType {
    /// Incorporated entity, no withholding
    #[serde(rename = "corporation")]
    Corporation,

    /// Sole proprietor, payments are subject to withholding tax
    #[serde(rename = "individual")]
    Individual,
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanyType::Corporation => write!(f, "corporation"),
            CompanyType::Individual => write!(f, "individual"),
        }
    }
}

impl std::str::FromStr for CompanyType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "corporation" => Ok(CompanyType::Corporation),
            "individual" => Ok(CompanyType::Individual),
            _ => Err(format!("Invalid company type: {}", s)),
        }
    }
}

/// Agency lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum AgencyStatus {
    #[serde(rename = "pending")]
    Pending,

    #[serde(rename = "active")]
    Active,

    #[serde(rename = "suspended")]
    Suspended,

    #[serde(rename = "terminated")]
    Terminated,
}

impl std::fmt::Display for AgencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgencyStatus::Pending => write!(f, "pending"),
            AgencyStatus::Active => write!(f, "active"),
            AgencyStatus::Suspended => write!(f, "suspended"),
            AgencyStatus::Terminated => write!(f, "terminated"),
        }
    }
}

impl std::str::FromStr for AgencyStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AgencyStatus::Pending),
            "active" => Ok(AgencyStatus::Active),
            "suspended" => Ok(AgencyStatus::Suspended),
            "terminated" => Ok(AgencyStatus::Terminated),
            _ => Err(format!("Invalid agency status: {}", s)),
        }
    }
}

/// The attributes the tax evaluator needs from an agency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalProfile {
    pub invoice_registered: bool,
    pub company_type: CompanyType,
}

/// A sales agency in the four-tier hierarchy
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Agency {
    pub id: String,

    pub company_name: String,

    /// Depth level, 1 (top) through 4
    pub tier_level: i32,

    /// Recruiting agency; None for top-tier agencies
    pub parent_agency_id: Option<String>,

    pub company_type: CompanyType,

    /// Registered under the consumption-tax invoice system
    pub invoice_registered: bool,

    pub invoice_number: Option<String>,

    pub status: AgencyStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Agency {
    pub const MIN_TIER: i32 = 1;
    pub const MAX_TIER: i32 = 4;

    pub fn is_active(&self) -> bool {
        self.status == AgencyStatus::Active
    }

    pub fn fiscal_profile(&self) -> FiscalProfile {
        FiscalProfile {
            invoice_registered: self.invoice_registered,
            company_type: self.company_type,
        }
    }
}
