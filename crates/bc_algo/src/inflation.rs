//! Inflation Projector: compound growth of a present-day total.
//!
//! projected = total × (1 + rate)^max(0, years_ahead)
//!
//! Past target years clamp to zero years (no deflation). A rate at or below
//! -1, or a non-finite one, is `InvalidConfiguration`. A valid rate whose
//! result does not fit `Money` is `InvalidInput`.

use bc_core::{EstimateError, Money, Projection};
use tracing::debug;

/// Annual construction inflation used when nothing else is configured.
pub const DEFAULT_ANNUAL_RATE: f64 = 0.07;

/// Reject rates that would imply a zero or negative future value.
pub fn check_rate(annual_rate: f64) -> Result<(), EstimateError> {
    if !annual_rate.is_finite() || annual_rate <= -1.0 {
        return Err(EstimateError::invalid_configuration(format!(
            "annual_rate must be finite and > -1, got {annual_rate}"
        )));
    }
    Ok(())
}

/// `target_year - current_year`, saturating. May be negative; `project` clamps.
pub fn years_between(current_year: i32, target_year: i32) -> i32 {
    target_year.saturating_sub(current_year)
}

pub fn project(total: Money, years_ahead: i32, annual_rate: f64) -> Result<Projection, EstimateError> {
    check_rate(annual_rate)?;
    let years = years_ahead.max(0);

    let target_year_total = if years == 0 {
        total
    } else {
        let amount = total.as_f64() * (1.0 + annual_rate).powi(years);
        Money::from_amount(amount).ok_or_else(|| {
            EstimateError::invalid_input(format!(
                "projection over {years} years at {annual_rate} is not representable"
            ))
        })?
    };
    debug!(years, annual_rate, projected = %target_year_total, "projection computed");

    Ok(Projection {
        present_total: total,
        target_year_total,
        years_ahead: years.unsigned_abs(),
        annual_rate,
    })
}
