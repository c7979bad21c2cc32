//! Bubble Detection Core
//!
//! Core implementations for LPPL model evaluation, single-window fitting,
//! bubble diagnosis, multi-window confidence aggregation, and forecasting.

pub mod diagnosis;
pub mod fitter;
pub mod forecast;
pub mod lppl;
pub mod multi_window;
pub mod optimizer;

// Re-export SPI types for implementations
pub use bubble_spi::{
    BubbleCriteria, BubbleDiagnosis, BubbleError, BubbleIndicators, BubbleState, CostFunction,
    FitQuality, FittedParams, GlobalMinimizer, Minimization, MultiWindowResult, PriceCurve,
    PricePoint, PriceSeries, Result, WindowRange, WindowResult, WindowStatistics,
};

// Re-export main types
pub use diagnosis::BubbleDiagnoser;
pub use fitter::{FitConfig, LpplFitter};
pub use forecast::{ForecastConfig, LpplForecaster};
pub use multi_window::{AnalysisConfig, MultiWindowAnalyzer};
pub use optimizer::{DeConfig, DifferentialEvolution};
