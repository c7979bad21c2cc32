//! Single-window LPPL parameter fitting.

use std::f64::consts::PI;

use bubble_spi::{
    BubbleError, CostFunction, FittedParams, GlobalMinimizer, PriceSeries, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lppl;
use crate::optimizer::{DeConfig, DifferentialEvolution};

/// Cost reported when a model evaluation is not finite, large enough for
/// the optimizer to discard the candidate and keep searching.
const COST_SENTINEL: f64 = 1e10;

/// Fixed search bounds for the shape parameters. The remaining bounds
/// (critical time, log-price level) are derived from the window itself.
const B_BOUNDS: (f64, f64) = (-2.0, 0.0);
const C_BOUNDS: (f64, f64) = (-1.0, 1.0);
const M_BOUNDS: (f64, f64) = (0.1, 0.9);
const OMEGA_BOUNDS: (f64, f64) = (2.0, 25.0);

/// Tuning constants for a single LPPL fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitConfig {
    /// Minimum finite, positive observations required after filtering.
    pub min_observations: usize,
    /// Acceptance ceiling for the mean squared residual. Deliberately
    /// lenient: the aggregate multi-window signal carries the meaning,
    /// not any single fit.
    pub max_mse: f64,
    /// Closest admissible critical time, in observations past the last one.
    pub tc_lead_min: f64,
    /// Farthest admissible critical time; also capped by the window length.
    pub tc_lead_max: f64,
    /// Differential evolution engine settings.
    pub de: DeConfig,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_observations: 30,
            max_mse: 0.1,
            tc_lead_min: 5.0,
            tc_lead_max: 504.0,
            de: DeConfig::default(),
        }
    }
}

/// Mean squared residual between observed and modeled log-prices.
struct LogResiduals<'a> {
    times: &'a [f64],
    log_prices: &'a [f64],
}

impl CostFunction for LogResiduals<'_> {
    fn cost(&self, x: &[f64]) -> f64 {
        let (tc, a, b, c, m, omega, phi) = (x[0], x[1], x[2], x[3], x[4], x[5], x[6]);
        let mut sum = 0.0;
        for (&t, &observed) in self.times.iter().zip(self.log_prices.iter()) {
            let predicted = lppl::log_price(t, tc, a, b, c, m, omega, phi);
            if !predicted.is_finite() {
                return COST_SENTINEL;
            }
            let residual = observed - predicted;
            sum += residual * residual;
        }
        let mse = sum / self.times.len() as f64;
        if mse.is_finite() {
            mse
        } else {
            COST_SENTINEL
        }
    }
}

/// Fits the LPPL model to one price window by bounded global optimization.
#[derive(Debug, Clone)]
pub struct LpplFitter {
    config: FitConfig,
}

impl LpplFitter {
    pub fn new() -> Self {
        Self {
            config: FitConfig::default(),
        }
    }

    pub fn with_config(config: FitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Fit the seven LPPL parameters to the series.
    ///
    /// Entries with non-finite or non-positive closes are dropped first;
    /// the synthetic time index runs over the retained observations. The
    /// fit is accepted when the optimizer converges or the final mean
    /// squared error is below the configured ceiling.
    pub fn fit(&self, prices: &PriceSeries, max_iterations: usize) -> Result<FittedParams> {
        let log_prices: Vec<f64> = prices
            .points()
            .iter()
            .filter(|p| p.close.is_finite() && p.close > 0.0)
            .map(|p| p.close.ln())
            .collect();

        if log_prices.len() < self.config.min_observations {
            return Err(BubbleError::InsufficientData {
                required: self.config.min_observations,
                actual: log_prices.len(),
            });
        }

        let times: Vec<f64> = (0..log_prices.len()).map(|i| i as f64).collect();
        let bounds = self.bounds(&times, &log_prices);
        let objective = LogResiduals {
            times: &times,
            log_prices: &log_prices,
        };

        let minimizer = DifferentialEvolution::with_config(self.config.de.clone());
        let result = minimizer.minimize(&objective, &bounds, max_iterations)?;

        if result.converged || result.fun < self.config.max_mse {
            debug!(
                mse = result.fun,
                iterations = result.iterations,
                converged = result.converged,
                "lppl fit accepted"
            );
            Ok(FittedParams {
                tc: result.x[0],
                a: result.x[1],
                b: result.x[2],
                c: result.x[3],
                m: result.x[4],
                omega: result.x[5],
                phi: result.x[6],
                residual_error: result.fun,
            })
        } else {
            debug!(mse = result.fun, "lppl fit rejected");
            Err(BubbleError::FitDivergence {
                final_error: result.fun,
                message: format!(
                    "mean squared error {:.6} above acceptance ceiling {}",
                    result.fun, self.config.max_mse
                ),
            })
        }
    }

    /// Per-window parameter bounds, derived from the data so the same
    /// procedure holds for windows from ~125 to 750+ observations.
    fn bounds(&self, times: &[f64], log_prices: &[f64]) -> Vec<(f64, f64)> {
        let t_last = times[times.len() - 1];
        let n = times.len() as f64;
        let min_lp = log_prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_lp = log_prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max_lp - min_lp;

        vec![
            // Critical time strictly in the future, capped at about two
            // trading years or the data span, whichever is smaller.
            (
                t_last + self.config.tc_lead_min,
                t_last + self.config.tc_lead_max.min(n),
            ),
            (min_lp - range, max_lp + range),
            B_BOUNDS,
            C_BOUNDS,
            M_BOUNDS,
            OMEGA_BOUNDS,
            (-PI, PI),
        ]
    }
}

impl Default for LpplFitter {
    fn default() -> Self {
        Self::new()
    }
}
