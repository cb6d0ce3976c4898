pub mod agencies;
pub mod commissions;
pub mod health;
pub mod rates;
pub mod sales;
pub mod taxes;
