use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub commission: CommissionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Commission engine settings: default rate schedules, the aggregate-rate
/// ceiling, and whether direct commissions skip the approval queue.
#[derive(Debug, Clone, Deserialize)]
pub struct CommissionConfig {
    /// Direct commission percentage by tier level (index 0 = tier 1),
    /// used when no product-specific rate is configured.
    pub direct_rates: [Decimal; 4],

    /// Hierarchy bonus percentage by level distance (index 0 = direct parent).
    pub bonus_rates: [Decimal; 4],

    /// Ceiling on direct rate + all bonus rates paid out of a single sale.
    pub max_aggregate_rate: Decimal,

    /// When set, direct commissions are created already completed instead of
    /// waiting for admin approval.
    pub auto_confirm_direct: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            commission: CommissionConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.commission.validate()
    }
}

impl CommissionConfig {
    pub fn from_env() -> Result<Self> {
        Ok(CommissionConfig {
            direct_rates: [
                rate_var("DIRECT_RATE_TIER_1", "30")?,
                rate_var("DIRECT_RATE_TIER_2", "25")?,
                rate_var("DIRECT_RATE_TIER_3", "20")?,
                rate_var("DIRECT_RATE_TIER_4", "15")?,
            ],
            bonus_rates: [
                rate_var("BONUS_RATE_LEVEL_1", "10")?,
                rate_var("BONUS_RATE_LEVEL_2", "8")?,
                rate_var("BONUS_RATE_LEVEL_3", "6")?,
                rate_var("BONUS_RATE_LEVEL_4", "4")?,
            ],
            max_aggregate_rate: rate_var("MAX_AGGREGATE_RATE", "60")?,
            auto_confirm_direct: env::var("AUTO_CONFIRM_DIRECT")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    pub fn validate(&self) -> Result<()> {
        for rate in self.direct_rates.iter().chain(self.bonus_rates.iter()) {
            if *rate <= Decimal::ZERO || *rate > Decimal::ONE_HUNDRED {
                return Err(AppError::Configuration(format!(
                    "Commission rate must be within (0, 100], got {}",
                    rate
                )));
            }
        }

        if self.max_aggregate_rate <= Decimal::ZERO {
            return Err(AppError::Configuration(
                "MAX_AGGREGATE_RATE must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn rate_var(name: &str, default: &str) -> Result<Decimal> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(&raw).map_err(|_| AppError::Configuration(format!("Invalid {}: {}", name, raw)))
}
