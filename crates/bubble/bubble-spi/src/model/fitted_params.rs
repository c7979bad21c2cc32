//! Fitted LPPL parameter set.

use serde::{Deserialize, Serialize};

/// Parameters of a successfully fitted LPPL model.
///
/// `tc` is expressed on the window's synthetic time index and may lie
/// beyond the last observation. Created once per accepted fit, never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedParams {
    /// Critical time on the window's time index.
    pub tc: f64,
    /// Log-price level at the critical time.
    pub a: f64,
    /// Power-law amplitude (negative for a bubble).
    pub b: f64,
    /// Log-periodic oscillation amplitude.
    pub c: f64,
    /// Power-law exponent.
    pub m: f64,
    /// Angular frequency of the oscillations.
    pub omega: f64,
    /// Phase shift.
    pub phi: f64,
    /// Mean squared residual of the fit in log space.
    pub residual_error: f64,
}

impl FittedParams {
    /// Display copy with the precision used in reports: `tc` to two
    /// decimals, all other values to four.
    pub fn rounded(&self) -> FittedParams {
        FittedParams {
            tc: round_to(self.tc, 2),
            a: round_to(self.a, 4),
            b: round_to(self.b, 4),
            c: round_to(self.c, 4),
            m: round_to(self.m, 4),
            omega: round_to(self.omega, 4),
            phi: round_to(self.phi, 4),
            residual_error: round_to(self.residual_error, 4),
        }
    }
}

pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
