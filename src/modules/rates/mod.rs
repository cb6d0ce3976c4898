// Rates module

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ProductRate, RateDefaults};
pub use repositories::{MySqlRateRepository, RateRepository};
pub use services::RateTable;
