pub mod commission_calculator;
pub mod commission_ledger;
pub mod commission_service;

pub use commission_calculator::{CommissionCalculator, CommissionSet};
pub use commission_ledger::{ApprovalFailure, BulkApprovalOutcome, CommissionLedger};
pub use commission_service::{CalculationFailure, CommissionService, PeriodCalculationOutcome};
