// Ledger entry model.
//
// The per-(agency, period) aggregate of direct commission and approved
// hierarchy bonuses. Deductions are always derived from the running total
// and the agency's fiscal attributes, never summed from per-record values,
// so every mutation re-runs the tax evaluation on the new total.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Period, Result};
use crate::modules::taxes::models::TaxBreakdown;

/// Amounts to merge into a ledger entry
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerDelta {
    pub direct: i64,
    pub hierarchy_bonus: i64,
}

impl LedgerDelta {
    pub fn direct(amount: i64) -> Self {
        Self {
            direct: amount,
            hierarchy_bonus: 0,
        }
    }

    pub fn bonus(amount: i64) -> Self {
        Self {
            direct: 0,
            hierarchy_bonus: amount,
        }
    }
}

/// Aggregated commission totals for one agency in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LedgerEntry {
    pub id: String,

    pub agency_id: String,

    #[sqlx(try_from = "String")]
    pub period: Period,

    /// Gross direct commission across the agency's confirmed sales
    pub direct_commission: i64,

    /// Gross hierarchy bonuses, approved ones only
    pub hierarchy_bonus: i64,

    /// direct_commission + hierarchy_bonus
    pub total_commission: i64,

    pub invoice_deduction: i64,

    pub withholding_tax: i64,

    /// total_commission - invoice_deduction - withholding_tax
    pub net_payment: i64,

    pub payment_date: Option<NaiveDate>,

    pub payment_method: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Identity derived from (agency, period) so upserts are stable.
    pub fn deterministic_id(agency_id: &str, period: Period) -> String {
        let seed = format!("ledger:{}:{}", agency_id, period);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string()
    }

    /// A zeroed entry for an agency+period with no activity yet.
    pub fn empty(agency_id: &str, period: Period, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::deterministic_id(agency_id, period),
            agency_id: agency_id.to_string(),
            period,
            direct_commission: 0,
            hierarchy_bonus: 0,
            total_commission: 0,
            invoice_deduction: 0,
            withholding_tax: 0,
            net_payment: 0,
            payment_date: None,
            payment_method: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merge_delta(&mut self, delta: &LedgerDelta) {
        self.direct_commission += delta.direct;
        self.hierarchy_bonus += delta.hierarchy_bonus;
    }

    /// Replace the direct component outright (used when a sale is recalculated
    /// and its earlier records are superseded).
    pub fn set_direct_commission(&mut self, amount: i64) {
        self.direct_commission = amount;
    }

    /// The total the deductions must be evaluated against.
    pub fn component_total(&self) -> i64 {
        self.direct_commission + self.hierarchy_bonus
    }

    /// Overwrite the derived columns from a tax evaluation of the new total.
    pub fn apply_evaluation(&mut self, taxes: &TaxBreakdown, now: DateTime<Utc>) {
        self.total_commission = self.component_total();
        self.invoice_deduction = taxes.invoice_deduction;
        self.withholding_tax = taxes.withholding_tax;
        self.net_payment = taxes.net_amount;
        self.updated_at = now;
    }

    pub fn is_paid(&self) -> bool {
        self.payment_date.is_some()
    }

    /// Record the payout; an entry can only be paid once.
    pub fn mark_paid(
        &mut self,
        payment_date: NaiveDate,
        payment_method: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.is_paid() {
            return Err(AppError::validation(format!(
                "Ledger entry for agency {} period {} is already paid",
                self.agency_id, self.period
            )));
        }
        self.payment_date = Some(payment_date);
        self.payment_method = Some(payment_method.to_string());
        self.updated_at = now;
        Ok(())
    }
}
