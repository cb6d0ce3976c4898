use serde::{Deserialize, Serialize};

/// Result of applying the statutory deductions to a gross commission amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// 2% deduction for agencies without invoice registration
    pub invoice_deduction: i64,

    /// 10.21% withholding for individual-type agencies
    pub withholding_tax: i64,

    /// gross - invoice_deduction - withholding_tax
    pub net_amount: i64,
}

impl TaxBreakdown {
    /// A breakdown with no deductions (registered corporation)
    pub fn untaxed(gross_amount: i64) -> Self {
        Self {
            invoice_deduction: 0,
            withholding_tax: 0,
            net_amount: gross_amount,
        }
    }

    pub fn total_deductions(&self) -> i64 {
        self.invoice_deduction + self.withholding_tax
    }
}
