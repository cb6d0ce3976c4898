pub mod agency_repository;

pub use agency_repository::{AgencyRepository, MySqlAgencyRepository};
