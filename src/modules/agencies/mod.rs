// Agencies module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Agency, AgencyStatus, CompanyType, FiscalProfile};
pub use repositories::{AgencyRepository, MySqlAgencyRepository};
pub use services::{AncestorLink, HierarchyWalker};
