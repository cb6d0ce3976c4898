pub mod bonus_controller;
pub mod commission_controller;
pub mod ledger_controller;

pub use bonus_controller::configure_bonus_routes;
pub use commission_controller::configure_commission_routes;
pub use ledger_controller::configure_ledger_routes;
