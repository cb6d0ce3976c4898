pub mod agency_controller;

pub use agency_controller::configure_agency_routes;
