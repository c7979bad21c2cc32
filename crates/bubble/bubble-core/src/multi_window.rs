//! Multi-window LPPLS confidence aggregation.
//!
//! Repeats the single-window fit over trailing windows of increasing size
//! and reduces the outcomes to one confidence indicator: the share of
//! successful fits whose parameters qualify as a bubble. No single fit
//! carries the signal; the aggregate does.

use bubble_spi::{
    BubbleCriteria, BubbleError, BubbleState, MultiWindowResult, PriceSeries, Result,
    WindowRange, WindowResult, WindowStatistics,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fitter::{FitConfig, LpplFitter};

/// Tuning constants for a multi-window analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Smallest trailing window, in observations (about half a trading year).
    pub min_window: usize,
    /// Largest trailing window, clamped to the series length (about three
    /// trading years).
    pub max_window: usize,
    /// Increment between consecutive window sizes.
    pub step: usize,
    /// Optimizer iteration budget per window.
    pub max_iterations: usize,
    /// A successful fit only counts as a bubble window when its residual
    /// error stays below this ceiling. Stricter than the single-fit
    /// acceptance rule.
    pub bubble_max_residual: f64,
    /// Confidence indicator at or above which the state is critical.
    pub critical_threshold: f64,
    /// Confidence indicator at or above which the state is warning.
    pub warning_threshold: f64,
    /// Confidence indicator at or above which the state is watch.
    pub watch_threshold: f64,
    /// Fit windows concurrently on the rayon pool.
    pub parallel: bool,
    /// Single-window fit settings shared by every window.
    pub fit: FitConfig,
    /// Structural bubble conditions applied to every successful fit.
    pub criteria: BubbleCriteria,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_window: 125,
            max_window: 750,
            step: 5,
            max_iterations: 2000,
            bubble_max_residual: 0.5,
            critical_threshold: 60.0,
            warning_threshold: 40.0,
            watch_threshold: 20.0,
            parallel: true,
            fit: FitConfig::default(),
            criteria: BubbleCriteria::default(),
        }
    }
}

/// Drives the fitter across a sweep of trailing windows and aggregates
/// the outcomes into a [`MultiWindowResult`].
#[derive(Debug, Clone, Default)]
pub struct MultiWindowAnalyzer {
    config: AnalysisConfig,
}

impl MultiWindowAnalyzer {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze with the configured window sweep.
    pub fn analyze(&self, prices: &PriceSeries) -> Result<MultiWindowResult> {
        self.analyze_windows(
            prices,
            self.config.min_window,
            self.config.max_window,
            self.config.step,
            self.config.max_iterations,
        )
    }

    /// Analyze with an explicit window sweep.
    ///
    /// Window sizes run `min_window, min_window + step, ...` up to
    /// `max_window` clamped to the series length. Every window is fitted
    /// independently; a failed fit is recorded in its window's result and
    /// never aborts the sweep.
    pub fn analyze_windows(
        &self,
        prices: &PriceSeries,
        min_window: usize,
        max_window: usize,
        step: usize,
        max_iterations: usize,
    ) -> Result<MultiWindowResult> {
        validate_sweep(min_window, max_window, step, max_iterations)?;

        if prices.len() < min_window {
            return Err(BubbleError::InsufficientData {
                required: min_window,
                actual: prices.len(),
            });
        }

        let actual_max = max_window.min(prices.len());
        let windows: Vec<usize> = (min_window..=actual_max).step_by(step).collect();
        let fitter = LpplFitter::with_config(self.config.fit.clone());

        let mut results: Vec<WindowResult> = if self.config.parallel {
            windows
                .par_iter()
                .map(|&w| self.fit_window(&fitter, prices, w, max_iterations))
                .collect()
        } else {
            windows
                .iter()
                .map(|&w| self.fit_window(&fitter, prices, w, max_iterations))
                .collect()
        };
        // The output contract orders windows by size, independent of
        // completion order.
        results.sort_by_key(|r| r.window_size);

        let total_windows = results.len();
        let successful_fits = results.iter().filter(|r| r.success).count();
        let bubble_windows = results.iter().filter(|r| r.is_bubble).count();

        let confidence_indicator = if successful_fits > 0 {
            bubble_windows as f64 / successful_fits as f64 * 100.0
        } else {
            0.0
        };
        let success_rate = if total_windows > 0 {
            successful_fits as f64 / total_windows as f64 * 100.0
        } else {
            0.0
        };

        let (state, message) = self.classify(confidence_indicator);
        debug!(
            confidence_indicator,
            successful_fits,
            bubble_windows,
            %state,
            "multi-window analysis complete"
        );

        Ok(MultiWindowResult {
            confidence_indicator,
            state,
            message: message.to_string(),
            statistics: WindowStatistics {
                total_windows,
                successful_fits,
                bubble_windows,
                success_rate,
            },
            window_range: WindowRange {
                min: min_window,
                max: actual_max,
                step,
            },
            detailed_results: results,
        })
    }

    /// Fit one trailing window and apply the bubble acceptance predicate.
    fn fit_window(
        &self,
        fitter: &LpplFitter,
        prices: &PriceSeries,
        window: usize,
        max_iterations: usize,
    ) -> WindowResult {
        match fitter.fit(&prices.tail(window), max_iterations) {
            Ok(params) => {
                let indicators = self.config.criteria.indicators(&params, window - 1);
                let is_bubble =
                    indicators.all() && params.residual_error < self.config.bubble_max_residual;
                WindowResult {
                    window_size: window,
                    success: true,
                    is_bubble,
                    params: Some(params),
                    error_message: None,
                }
            }
            Err(err) => {
                warn!(window, %err, "window fit failed");
                WindowResult {
                    window_size: window,
                    success: false,
                    is_bubble: false,
                    params: None,
                    error_message: Some(err.to_string()),
                }
            }
        }
    }

    fn classify(&self, confidence_indicator: f64) -> (BubbleState, &'static str) {
        if confidence_indicator >= self.config.critical_threshold {
            (
                BubbleState::Critical,
                "Strong bubble signal across window sizes, high crash risk",
            )
        } else if confidence_indicator >= self.config.warning_threshold {
            (
                BubbleState::Warning,
                "Bubble signal in a large share of windows, elevated risk",
            )
        } else if confidence_indicator >= self.config.watch_threshold {
            (
                BubbleState::Watch,
                "Early bubble signs in some windows, monitoring recommended",
            )
        } else {
            (BubbleState::Normal, "No significant bubble signal")
        }
    }
}

fn validate_sweep(
    min_window: usize,
    max_window: usize,
    step: usize,
    max_iterations: usize,
) -> Result<()> {
    if step == 0 {
        return Err(BubbleError::InvalidConfig("step must be positive".into()));
    }
    if min_window == 0 {
        return Err(BubbleError::InvalidConfig(
            "min_window must be positive".into(),
        ));
    }
    if min_window > max_window {
        return Err(BubbleError::InvalidConfig(format!(
            "min_window {} exceeds max_window {}",
            min_window, max_window
        )));
    }
    if max_iterations == 0 {
        return Err(BubbleError::InvalidConfig(
            "max_iterations must be positive".into(),
        ));
    }
    Ok(())
}
