use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};

/// Integer-yen money helpers.
///
/// All commission amounts are carried as `i64` in the smallest currency unit
/// (whole yen). Percentage and tax-rate math goes through `Decimal` and is
/// floored back to an integer at every step; intermediate results are never
/// kept fractional and floating point is never involved.

/// Computes `floor(amount * rate / 100)` for a percentage rate like `30` or `2.5`.
pub fn percent_of(amount: i64, rate: Decimal) -> Result<i64> {
    let raw = Decimal::from(amount)
        .checked_mul(rate)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| AppError::internal(format!("percentage overflow: {} * {}%", amount, rate)))?;
    to_floored_i64(raw)
}

/// Computes `floor(amount * rate)` for a fractional rate like `0.02` or `0.1021`.
pub fn apply_rate(amount: i64, rate: Decimal) -> Result<i64> {
    let raw = Decimal::from(amount)
        .checked_mul(rate)
        .ok_or_else(|| AppError::internal(format!("rate overflow: {} * {}", amount, rate)))?;
    to_floored_i64(raw)
}

fn to_floored_i64(value: Decimal) -> Result<i64> {
    value
        .floor()
        .to_i64()
        .ok_or_else(|| AppError::internal(format!("amount out of i64 range: {}", value)))
}

/// Formats an integer amount for log and API output.
pub fn format_yen(amount: i64) -> String {
    format!("JPY {}", amount)
}
