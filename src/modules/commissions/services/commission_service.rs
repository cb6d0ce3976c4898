use std::sync::Arc;

use futures_util::future;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{AppError, Period, Result};
use crate::modules::agencies::repositories::AgencyRepository;
use crate::modules::agencies::services::HierarchyWalker;
use crate::modules::commissions::repositories::CommissionRepository;
use crate::modules::commissions::services::commission_calculator::{
    CommissionCalculator, CommissionSet,
};
use crate::modules::commissions::services::commission_ledger::CommissionLedger;
use crate::modules::sales::repositories::SaleRepository;

/// Result of a monthly batch calculation run
#[derive(Debug, Clone, Serialize)]
pub struct PeriodCalculationOutcome {
    pub calculated: Vec<String>,
    pub failures: Vec<CalculationFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculationFailure {
    pub sale_id: String,
    pub reason: String,
}

/// Orchestrates commission calculation for confirmed sales: resolves the
/// sale and its agency, walks the hierarchy, runs the calculator, replaces
/// the sale's records atomically and brings the ledger up to date.
pub struct CommissionService {
    sales: Arc<dyn SaleRepository>,
    agencies: Arc<dyn AgencyRepository>,
    walker: Arc<HierarchyWalker>,
    calculator: CommissionCalculator,
    records: Arc<dyn CommissionRepository>,
    ledger: Arc<CommissionLedger>,
}

impl CommissionService {
    pub fn new(
        sales: Arc<dyn SaleRepository>,
        agencies: Arc<dyn AgencyRepository>,
        walker: Arc<HierarchyWalker>,
        calculator: CommissionCalculator,
        records: Arc<dyn CommissionRepository>,
        ledger: Arc<CommissionLedger>,
    ) -> Self {
        Self {
            sales,
            agencies,
            walker,
            calculator,
            records,
            ledger,
        }
    }

    /// Calculate (or recalculate) all commission output for one sale.
    ///
    /// Safe to re-run: the record set is deterministic and replaces any
    /// earlier set for the sale, and the ledger's direct component is
    /// re-derived rather than incremented.
    pub async fn calculate_for_sale(&self, sale_id: &str) -> Result<CommissionSet> {
        let sale = self
            .sales
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {}", sale_id)))?;

        if !sale.is_confirmed() {
            return Err(AppError::validation(format!(
                "Sale {} is {} and not eligible for commission",
                sale.id, sale.status
            )));
        }

        let agency = self
            .agencies
            .find_by_id(&sale.agency_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Agency {}", sale.agency_id)))?;

        let ancestors = self.walker.ancestors_of(&agency.id).await?;
        let set = self.calculator.calculate(&sale, &agency, &ancestors).await?;

        self.records
            .replace_for_sale(&sale.id, &set.direct, &set.bonuses)
            .await?;
        self.ledger.refresh_direct(&agency, sale.period).await?;

        info!(
            sale_id = %sale.id,
            agency_id = %agency.id,
            period = %sale.period,
            direct_gross = set.direct.gross_amount,
            bonus_count = set.bonuses.len(),
            "commission calculated"
        );

        Ok(set)
    }

    /// Calculate commissions for every confirmed sale in a period.
    ///
    /// Sales are processed concurrently; the ledger's per-key locks serialize
    /// writes that land on the same agency and period. One sale's failure is
    /// recorded and never aborts the rest of the batch.
    pub async fn calculate_for_period(&self, period: Period) -> Result<PeriodCalculationOutcome> {
        let sales = self.sales.list_confirmed_by_period(period).await?;

        let results = future::join_all(
            sales
                .iter()
                .map(|sale| async { (sale.id.clone(), self.calculate_for_sale(&sale.id).await) }),
        )
        .await;

        let mut outcome = PeriodCalculationOutcome {
            calculated: Vec::new(),
            failures: Vec::new(),
        };

        for (sale_id, result) in results {
            match result {
                Ok(_) => outcome.calculated.push(sale_id),
                Err(err) => {
                    warn!(sale_id = %sale_id, error = %err, "sale calculation failed");
                    outcome.failures.push(CalculationFailure {
                        sale_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            period = %period,
            calculated = outcome.calculated.len(),
            failed = outcome.failures.len(),
            "period calculation finished"
        );

        Ok(outcome)
    }
}
