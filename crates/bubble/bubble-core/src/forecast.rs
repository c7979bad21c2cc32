//! Fitted-curve reconstruction and forward extrapolation.

use bubble_spi::{FittedParams, PriceCurve, PriceSeries};
use serde::{Deserialize, Serialize};

use crate::lppl;

const SECONDS_PER_DAY: i64 = 86_400;

/// Tuning constants for forecasting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Default extrapolation horizon, in observations.
    pub horizon_days: usize,
    /// Safety margin before the critical time. The model is singular at
    /// `tc`; no forecast point is produced at or past `tc` minus this.
    pub tc_margin: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 60,
            tc_margin: 0.1,
        }
    }
}

/// Reconstructs and extrapolates prices from a fitted parameter set.
#[derive(Debug, Clone, Default)]
pub struct LpplForecaster {
    config: ForecastConfig,
}

impl LpplForecaster {
    pub fn new() -> Self {
        Self {
            config: ForecastConfig::default(),
        }
    }

    pub fn with_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// The model price at every historical observation.
    pub fn fitted_curve(&self, prices: &PriceSeries, fitted: &FittedParams) -> PriceCurve {
        let mut curve = PriceCurve::new();
        for (i, point) in prices.points().iter().enumerate() {
            let price = lppl::log_price_at(i as f64, fitted).exp();
            curve.push(i, point.timestamp, price);
        }
        curve
    }

    /// Extrapolate with the configured horizon.
    pub fn forecast(&self, prices: &PriceSeries, fitted: &FittedParams) -> PriceCurve {
        self.forecast_horizon(prices, fitted, self.config.horizon_days)
    }

    /// Extrapolate up to `horizon_days` observations past the series end.
    ///
    /// Stops strictly before `tc` minus the safety margin. When the whole
    /// horizon lies at or past that point the curve is empty; forecasting
    /// past the critical time is not an error, there is just nothing valid
    /// to return.
    pub fn forecast_horizon(
        &self,
        prices: &PriceSeries,
        fitted: &FittedParams,
        horizon_days: usize,
    ) -> PriceCurve {
        let n = prices.len();
        let last_timestamp = prices.last_timestamp().unwrap_or(0);
        let cutoff = fitted.tc - self.config.tc_margin;

        let mut curve = PriceCurve::new();
        for offset in 0..horizon_days {
            let t = n + offset;
            if t as f64 >= cutoff {
                break;
            }
            let price = lppl::log_price_at(t as f64, fitted).exp();
            let timestamp = last_timestamp + (offset as i64 + 1) * SECONDS_PER_DAY;
            curve.push(t, timestamp, price);
        }
        curve
    }
}
