use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CommissionConfig;
use crate::core::{money, AppError, Result};
use crate::modules::agencies::models::Agency;
use crate::modules::agencies::services::AncestorLink;
use crate::modules::commissions::models::{
    CommissionKind, CommissionRecord, CommissionStatus, HierarchyBonusRecord,
};
use crate::modules::rates::services::RateTable;
use crate::modules::sales::models::Sale;
use crate::modules::taxes::services::TaxEvaluator;

/// Everything one confirmed sale pays out: the seller's direct commission and
/// one pending bonus per ancestor.
#[derive(Debug, Clone)]
pub struct CommissionSet {
    pub direct: CommissionRecord,
    pub bonuses: Vec<HierarchyBonusRecord>,
}

impl CommissionSet {
    /// Direct rate plus every bonus rate, checked against the configured ceiling
    pub fn aggregate_rate(&self) -> Decimal {
        self.bonuses
            .iter()
            .fold(self.direct.rate, |acc, bonus| acc + bonus.rate)
    }
}

/// Computes the full commission output for one sale.
///
/// Deterministic: record ids derive from (sale, beneficiary, kind) and all
/// amounts from the rate table and tax rules, so recalculating a sale yields
/// an identical set that can replace the previous one.
pub struct CommissionCalculator {
    rate_table: Arc<RateTable>,
    taxes: TaxEvaluator,
    max_aggregate_rate: Decimal,
    auto_confirm_direct: bool,
}

impl CommissionCalculator {
    pub fn new(rate_table: Arc<RateTable>, taxes: TaxEvaluator, config: &CommissionConfig) -> Self {
        Self {
            rate_table,
            taxes,
            max_aggregate_rate: config.max_aggregate_rate,
            auto_confirm_direct: config.auto_confirm_direct,
        }
    }

    pub async fn calculate(
        &self,
        sale: &Sale,
        agency: &Agency,
        ancestors: &[AncestorLink],
    ) -> Result<CommissionSet> {
        let direct = self.direct_commission(sale, agency).await?;

        let mut bonuses = Vec::with_capacity(ancestors.len());
        for link in ancestors {
            bonuses.push(self.hierarchy_bonus(sale, link)?);
        }

        let set = CommissionSet { direct, bonuses };

        let aggregate = set.aggregate_rate();
        if aggregate > self.max_aggregate_rate {
            return Err(AppError::Configuration(format!(
                "Aggregate commission rate {}% for sale {} exceeds the {}% ceiling",
                aggregate, sale.id, self.max_aggregate_rate
            )));
        }

        debug!(
            sale_id = %sale.id,
            direct_gross = set.direct.gross_amount,
            bonus_count = set.bonuses.len(),
            aggregate_rate = %aggregate,
            "calculated commission set"
        );

        Ok(set)
    }

    async fn direct_commission(&self, sale: &Sale, agency: &Agency) -> Result<CommissionRecord> {
        let rate = self
            .rate_table
            .direct_rate(agency.tier_level, &sale.product_id)
            .await?;
        let gross_amount = money::percent_of(sale.amount, rate)?;
        let taxes = self.taxes.evaluate(gross_amount, &agency.fiscal_profile())?;

        let status = if self.auto_confirm_direct {
            CommissionStatus::Completed
        } else {
            CommissionStatus::Pending
        };

        let now = Utc::now();
        Ok(CommissionRecord {
            id: CommissionRecord::deterministic_id(&sale.id, &agency.id, CommissionKind::Direct),
            sale_id: sale.id.clone(),
            agency_id: agency.id.clone(),
            kind: CommissionKind::Direct,
            level_distance: 0,
            rate,
            gross_amount,
            invoice_deduction: taxes.invoice_deduction,
            withholding_tax: taxes.withholding_tax,
            net_amount: taxes.net_amount,
            period: sale.period,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    fn hierarchy_bonus(&self, sale: &Sale, link: &AncestorLink) -> Result<HierarchyBonusRecord> {
        let rate = self.rate_table.bonus_rate(link.level_distance)?;
        let gross_amount = money::percent_of(sale.amount, rate)?;
        let taxes = self
            .taxes
            .evaluate(gross_amount, &link.agency.fiscal_profile())?;

        let now = Utc::now();
        Ok(HierarchyBonusRecord {
            id: HierarchyBonusRecord::deterministic_id(&sale.id, &link.agency.id),
            sale_id: sale.id.clone(),
            source_agency_id: sale.agency_id.clone(),
            benefit_agency_id: link.agency.id.clone(),
            level_distance: link.level_distance as i32,
            rate,
            gross_amount,
            invoice_deduction: taxes.invoice_deduction,
            withholding_tax: taxes.withholding_tax,
            net_amount: taxes.net_amount,
            period: sale.period,
            status: CommissionStatus::Pending,
            approved_at: None,
            approved_by: None,
            created_at: now,
            updated_at: now,
        })
    }
}
