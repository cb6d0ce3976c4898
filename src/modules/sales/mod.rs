// Sales module

pub mod models;
pub mod repositories;

pub use models::{Sale, SaleStatus};
pub use repositories::{MySqlSaleRepository, SaleRepository};
