// Commission ledger service.
//
// All mutations of a (agency, period) aggregate are serialized through a
// per-key async lock so concurrent sale confirmations and bonus approvals
// never race on the read-modify-write of the totals. Deductions are always
// re-evaluated against the new total; the stale per-component values are
// overwritten, never incremented.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

use crate::core::{AppError, Period, Result};
use crate::modules::agencies::models::Agency;
use crate::modules::agencies::repositories::AgencyRepository;
use crate::modules::commissions::models::{
    HierarchyBonusRecord, LedgerDelta, LedgerEntry, PaymentRecord,
};
use crate::modules::commissions::repositories::{
    CommissionRepository, HierarchyBonusRepository, LedgerRepository, PaymentRepository,
};
use crate::modules::taxes::services::TaxEvaluator;

/// One async lock per (agency, period) key
struct KeyedLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire(&self, key: String) -> OwnedMutexGuard<()> {
        let cell = {
            let mut map = self.inner.lock().await;
            map.entry(key).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
        };
        cell.lock_owned().await
    }
}

/// Result of a bulk bonus approval run
#[derive(Debug, Clone, Serialize)]
pub struct BulkApprovalOutcome {
    pub approved: Vec<String>,
    pub failures: Vec<ApprovalFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalFailure {
    pub bonus_id: String,
    pub reason: String,
}

/// Aggregation store for per-agency, per-period commission totals
pub struct CommissionLedger {
    agencies: Arc<dyn AgencyRepository>,
    records: Arc<dyn CommissionRepository>,
    bonuses: Arc<dyn HierarchyBonusRepository>,
    entries: Arc<dyn LedgerRepository>,
    payments: Arc<dyn PaymentRepository>,
    taxes: TaxEvaluator,
    locks: KeyedLocks,
}

impl CommissionLedger {
    pub fn new(
        agencies: Arc<dyn AgencyRepository>,
        records: Arc<dyn CommissionRepository>,
        bonuses: Arc<dyn HierarchyBonusRepository>,
        entries: Arc<dyn LedgerRepository>,
        payments: Arc<dyn PaymentRepository>,
        taxes: TaxEvaluator,
    ) -> Self {
        Self {
            agencies,
            records,
            bonuses,
            entries,
            payments,
            taxes,
            locks: KeyedLocks::new(),
        }
    }

    fn lock_key(agency_id: &str, period: Period) -> String {
        format!("{}:{}", agency_id, period)
    }

    async fn load_or_empty(&self, agency_id: &str, period: Period) -> Result<LedgerEntry> {
        Ok(self
            .entries
            .find(agency_id, period)
            .await?
            .unwrap_or_else(|| LedgerEntry::empty(agency_id, period, Utc::now())))
    }

    /// Re-derive total and deductions from the entry's components.
    fn reevaluate(&self, entry: &mut LedgerEntry, agency: &Agency) -> Result<()> {
        let breakdown = self
            .taxes
            .evaluate(entry.component_total(), &agency.fiscal_profile())?;
        entry.apply_evaluation(&breakdown, Utc::now());
        Ok(())
    }

    /// Merge a delta into the (agency, period) aggregate, creating the entry
    /// if absent, and re-run the deductions on the new total.
    pub async fn upsert(
        &self,
        agency: &Agency,
        period: Period,
        delta: LedgerDelta,
    ) -> Result<LedgerEntry> {
        let _guard = self.locks.acquire(Self::lock_key(&agency.id, period)).await;

        let mut entry = self.load_or_empty(&agency.id, period).await?;
        entry.merge_delta(&delta);
        self.reevaluate(&mut entry, agency)?;
        self.entries.save(&entry).await?;

        Ok(entry)
    }

    /// Replace the direct component with the current sum of the agency's
    /// direct commission records for the period. Used after a sale is
    /// calculated or recalculated, where a delta merge would double-count.
    pub async fn refresh_direct(&self, agency: &Agency, period: Period) -> Result<LedgerEntry> {
        let _guard = self.locks.acquire(Self::lock_key(&agency.id, period)).await;

        let direct_total = self.records.sum_direct_gross(&agency.id, period).await?;

        let mut entry = self.load_or_empty(&agency.id, period).await?;
        entry.set_direct_commission(direct_total);
        self.reevaluate(&mut entry, agency)?;
        self.entries.save(&entry).await?;

        info!(
            agency_id = %agency.id,
            period = %period,
            direct_commission = entry.direct_commission,
            net_payment = entry.net_payment,
            "refreshed ledger direct commission"
        );

        Ok(entry)
    }

    /// Approve one pending bonus and merge it into the beneficiary's totals.
    pub async fn on_bonus_approved(
        &self,
        bonus_id: &str,
        approved_by: &str,
    ) -> Result<LedgerEntry> {
        let mut bonus = self
            .bonuses
            .find_by_id(bonus_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Hierarchy bonus {}", bonus_id)))?;

        let agency = self
            .agencies
            .find_by_id(&bonus.benefit_agency_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Agency {}", bonus.benefit_agency_id))
            })?;

        bonus.approve(approved_by, Utc::now())?;
        self.bonuses.update(&bonus).await?;

        let entry = self
            .upsert(&agency, bonus.period, LedgerDelta::bonus(bonus.gross_amount))
            .await?;

        info!(
            bonus_id = %bonus.id,
            benefit_agency_id = %bonus.benefit_agency_id,
            period = %bonus.period,
            bonus_gross = bonus.gross_amount,
            total_commission = entry.total_commission,
            "merged approved bonus into ledger"
        );

        Ok(entry)
    }

    /// Approve every pending bonus in a period. One bonus failing does not
    /// abort the rest.
    pub async fn approve_all_pending(
        &self,
        period: Period,
        approved_by: &str,
    ) -> Result<BulkApprovalOutcome> {
        let pending = self.bonuses.list_pending_by_period(period).await?;

        let mut outcome = BulkApprovalOutcome {
            approved: Vec::new(),
            failures: Vec::new(),
        };

        for bonus in pending {
            match self.on_bonus_approved(&bonus.id, approved_by).await {
                Ok(_) => outcome.approved.push(bonus.id),
                Err(err) => {
                    warn!(bonus_id = %bonus.id, error = %err, "bonus approval failed");
                    outcome.failures.push(ApprovalFailure {
                        bonus_id: bonus.id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// Record the payout of an entry's net payment and append it to the
    /// payment history.
    pub async fn record_payment(
        &self,
        agency_id: &str,
        period: Period,
        payment_date: NaiveDate,
        payment_method: &str,
        note: Option<String>,
    ) -> Result<PaymentRecord> {
        let _guard = self.locks.acquire(Self::lock_key(agency_id, period)).await;

        let mut entry = self.entries.find(agency_id, period).await?.ok_or_else(|| {
            AppError::not_found(format!(
                "Ledger entry for agency {} period {}",
                agency_id, period
            ))
        })?;

        entry.mark_paid(payment_date, payment_method, Utc::now())?;
        self.entries.save(&entry).await?;

        let record = PaymentRecord::new(
            agency_id,
            period,
            entry.net_payment,
            payment_date,
            payment_method,
            note,
        );
        self.payments.insert(&record).await?;

        info!(
            agency_id = %agency_id,
            period = %period,
            amount = record.amount,
            "recorded commission payout"
        );

        Ok(record)
    }

    pub async fn entry(&self, agency_id: &str, period: Period) -> Result<LedgerEntry> {
        self.entries.find(agency_id, period).await?.ok_or_else(|| {
            AppError::not_found(format!(
                "Ledger entry for agency {} period {}",
                agency_id, period
            ))
        })
    }

    pub async fn bonuses_for_period(&self, period: Period) -> Result<Vec<HierarchyBonusRecord>> {
        self.bonuses.list_by_period(period).await
    }
}
