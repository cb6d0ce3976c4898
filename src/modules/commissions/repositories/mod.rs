pub mod bonus_repository;
pub mod commission_repository;
pub mod ledger_repository;
pub mod payment_repository;

pub use bonus_repository::{HierarchyBonusRepository, MySqlHierarchyBonusRepository};
pub use commission_repository::{CommissionRepository, MySqlCommissionRepository};
pub use ledger_repository::{LedgerRepository, MySqlLedgerRepository};
pub use payment_repository::{MySqlPaymentRepository, PaymentRepository};
