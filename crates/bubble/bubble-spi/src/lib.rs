//! Bubble Detection Service Provider Interface
//!
//! Defines traits, error types, and result models for LPPL bubble detection.
//! This is the extension point for custom global minimizers.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{CostFunction, GlobalMinimizer};
pub use error::{BubbleError, Result};
pub use model::{
    BubbleCriteria, BubbleDiagnosis, BubbleIndicators, BubbleState, FitQuality, FittedParams,
    Minimization, MultiWindowResult, PriceCurve, PricePoint, PriceSeries, WindowRange,
    WindowResult, WindowStatistics,
};
