// Commissions module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    CommissionKind, CommissionRecord, CommissionStatus, HierarchyBonusRecord, LedgerDelta,
    LedgerEntry, PaymentRecord,
};
pub use repositories::{
    CommissionRepository, HierarchyBonusRepository, LedgerRepository, MySqlCommissionRepository,
    MySqlHierarchyBonusRepository, MySqlLedgerRepository, MySqlPaymentRepository,
    PaymentRepository,
};
pub use services::{CommissionCalculator, CommissionLedger, CommissionService, CommissionSet};
