pub mod rate_repository;

pub use rate_repository::{MySqlRateRepository, RateRepository};
