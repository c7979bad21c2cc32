//! LPPL model equation.
//!
//! `ln p(t) = A + B*(tc - t)^m + C*(tc - t)^m * cos(omega * ln(tc - t) + phi)`
//!
//! The price follows a power-law trend modulated by log-periodic
//! oscillations that accelerate toward the critical time `tc`.

use bubble_spi::FittedParams;

/// Smallest allowed distance to the critical time.
///
/// The optimizer probes `tc` values at or before the evaluation horizon;
/// clamping keeps the power and log terms finite everywhere probed.
pub const MIN_TIME_TO_CRITICAL: f64 = 1e-10;

/// Predicted log-price at time `t`.
#[allow(clippy::too_many_arguments)]
pub fn log_price(t: f64, tc: f64, a: f64, b: f64, c: f64, m: f64, omega: f64, phi: f64) -> f64 {
    let dt = (tc - t).max(MIN_TIME_TO_CRITICAL);
    let dt_m = dt.powf(m);
    a + b * dt_m + c * dt_m * (omega * dt.ln() + phi).cos()
}

/// Predicted log-price at time `t` for a fitted parameter set.
pub fn log_price_at(t: f64, p: &FittedParams) -> f64 {
    log_price(t, p.tc, p.a, p.b, p.c, p.m, p.omega, p.phi)
}

/// Predicted log-prices over a slice of times.
pub fn log_prices(times: &[f64], p: &FittedParams) -> Vec<f64> {
    times.iter().map(|&t| log_price_at(t, p)).collect()
}
