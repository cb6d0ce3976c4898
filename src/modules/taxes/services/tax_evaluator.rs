use rust_decimal::Decimal;

use crate::core::{money, Result};
use crate::modules::agencies::models::{CompanyType, FiscalProfile};
use crate::modules::taxes::models::TaxBreakdown;

/// Applies the Japanese deduction rules to a gross commission amount.
///
/// The order is fixed: the invoice deduction comes off the gross first, and
/// withholding is computed on the remainder. Every step floors to whole yen
/// before the next one runs.
pub struct TaxEvaluator {
    invoice_deduction_rate: Decimal,
    withholding_rate: Decimal,
}

impl TaxEvaluator {
    pub fn new() -> Self {
        Self {
            // 2% deduction for unregistered agencies
            invoice_deduction_rate: Decimal::new(2, 2),
            // 10.21% withholding for individuals
            withholding_rate: Decimal::new(1021, 4),
        }
    }

    /// Evaluate deductions for one gross amount against an agency's fiscal
    /// attributes. Pure: same inputs always produce the same breakdown.
    pub fn evaluate(&self, gross_amount: i64, profile: &FiscalProfile) -> Result<TaxBreakdown> {
        let invoice_deduction = if profile.invoice_registered {
            0
        } else {
            money::apply_rate(gross_amount, self.invoice_deduction_rate)?
        };

        let after_deduction = gross_amount - invoice_deduction;

        let withholding_tax = if profile.company_type == CompanyType::Individual {
            money::apply_rate(after_deduction, self.withholding_rate)?
        } else {
            0
        };

        Ok(TaxBreakdown {
            invoice_deduction,
            withholding_tax,
            net_amount: gross_amount - invoice_deduction - withholding_tax,
        })
    }
}

impl Default for TaxEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
