// Health module

pub mod controllers;

pub use controllers::configure_health_routes;
