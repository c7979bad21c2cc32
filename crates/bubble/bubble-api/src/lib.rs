//! Bubble Detection Consumer API
//!
//! Consumer configurations and a high-level entry point for LPPL bubble
//! detection.
//!
//! This crate provides:
//! - [`BubbleDetector`], bundling the fitter, diagnoser, analyzer and
//!   forecaster behind one surface
//! - Re-exports from SPI and core for convenience

use chrono::NaiveDate;

// Re-export from core
pub use bubble_core::{
    diagnosis, fitter, forecast, lppl, multi_window, optimizer, AnalysisConfig, BubbleDiagnoser,
    DeConfig, DifferentialEvolution, FitConfig, ForecastConfig, LpplFitter, LpplForecaster,
    MultiWindowAnalyzer,
};

// Re-export traits and models from SPI
pub use bubble_spi::{
    BubbleCriteria, BubbleDiagnosis, BubbleError, BubbleIndicators, BubbleState, CostFunction,
    FitQuality, FittedParams, GlobalMinimizer, Minimization, MultiWindowResult, PriceCurve,
    PricePoint, PriceSeries, Result, WindowRange, WindowResult, WindowStatistics,
};

/// High-level bubble detection entry point.
///
/// Bundles the single-window fitter, diagnoser, multi-window analyzer and
/// forecaster behind one stateless surface. Fitted parameters are explicit
/// values threaded by the caller, never stored on the detector, so calls
/// can happen in any order and repeated calls with identical inputs give
/// identical results.
///
/// # Example
///
/// ```rust,ignore
/// use bubble_api::prelude::*;
///
/// let detector = BubbleDetector::new();
/// let fitted = detector.fit(&prices, 2000)?;
/// let diagnosis = detector.diagnose(&fitted, prices.len(), prices.len() - 1, prices.last_date());
/// let result = detector.analyze_multi_window(&prices)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BubbleDetector {
    fitter: LpplFitter,
    diagnoser: BubbleDiagnoser,
    analyzer: MultiWindowAnalyzer,
    forecaster: LpplForecaster,
}

impl BubbleDetector {
    /// Detector with default configuration throughout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with explicit analysis and forecast configuration.
    ///
    /// The analyzer's fit settings and bubble criteria also drive the
    /// standalone fitter and diagnoser, so a single-window fit behaves
    /// exactly like one window of the multi-window sweep.
    pub fn with_configs(analysis: AnalysisConfig, forecast: ForecastConfig) -> Self {
        Self {
            fitter: LpplFitter::with_config(analysis.fit.clone()),
            diagnoser: BubbleDiagnoser::with_criteria(analysis.criteria.clone()),
            forecaster: LpplForecaster::with_config(forecast),
            analyzer: MultiWindowAnalyzer::with_config(analysis),
        }
    }

    /// Fit the LPPL model to the whole series.
    pub fn fit(&self, prices: &PriceSeries, max_iterations: usize) -> Result<FittedParams> {
        self.fitter.fit(prices, max_iterations)
    }

    /// Diagnose bubble risk from a fitted parameter set.
    pub fn diagnose(
        &self,
        fitted: &FittedParams,
        observations: usize,
        current_index: usize,
        series_end_date: Option<NaiveDate>,
    ) -> BubbleDiagnosis {
        self.diagnoser
            .diagnose(fitted, observations, current_index, series_end_date)
    }

    /// Fit the series and diagnose the result in one call.
    ///
    /// The reference index is the last retained observation, so the
    /// distance to the critical time is measured on the same time index
    /// the fit used.
    pub fn fit_and_diagnose(
        &self,
        prices: &PriceSeries,
        max_iterations: usize,
    ) -> Result<BubbleDiagnosis> {
        let fitted = self.fitter.fit(prices, max_iterations)?;
        let observations = prices
            .points()
            .iter()
            .filter(|p| p.close.is_finite() && p.close > 0.0)
            .count();
        Ok(self.diagnoser.diagnose(
            &fitted,
            observations,
            observations.saturating_sub(1),
            prices.last_date(),
        ))
    }

    /// Run the multi-window sweep with the configured window range.
    pub fn analyze_multi_window(&self, prices: &PriceSeries) -> Result<MultiWindowResult> {
        self.analyzer.analyze(prices)
    }

    /// Run the multi-window sweep with an explicit window range.
    pub fn analyze_windows(
        &self,
        prices: &PriceSeries,
        min_window: usize,
        max_window: usize,
        step: usize,
        max_iterations: usize,
    ) -> Result<MultiWindowResult> {
        self.analyzer
            .analyze_windows(prices, min_window, max_window, step, max_iterations)
    }

    /// The model price at every historical observation.
    pub fn fitted_curve(&self, prices: &PriceSeries, fitted: &FittedParams) -> PriceCurve {
        self.forecaster.fitted_curve(prices, fitted)
    }

    /// Extrapolate forward, clipped before the fitted critical time.
    pub fn forecast(
        &self,
        prices: &PriceSeries,
        fitted: &FittedParams,
        horizon_days: usize,
    ) -> PriceCurve {
        self.forecaster.forecast_horizon(prices, fitted, horizon_days)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::BubbleDetector;
    pub use bubble_core::{
        AnalysisConfig, BubbleDiagnoser, DeConfig, DifferentialEvolution, FitConfig,
        ForecastConfig, LpplFitter, LpplForecaster, MultiWindowAnalyzer,
    };
    pub use bubble_spi::{
        BubbleCriteria, BubbleDiagnosis, BubbleError, BubbleIndicators, BubbleState, CostFunction,
        FitQuality, FittedParams, GlobalMinimizer, Minimization, MultiWindowResult, PriceCurve,
        PricePoint, PriceSeries, Result, WindowRange, WindowResult, WindowStatistics,
    };
}
