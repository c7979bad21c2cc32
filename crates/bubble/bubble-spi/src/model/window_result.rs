//! Multi-window analysis result types.

use serde::{Deserialize, Serialize};

use crate::model::{BubbleState, FittedParams};

/// Outcome of fitting one trailing window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowResult {
    /// Number of trailing observations fitted.
    pub window_size: usize,
    /// Whether the fit met the acceptance rule.
    pub success: bool,
    /// Whether the fitted parameters passed the bubble acceptance predicate.
    pub is_bubble: bool,
    /// Fitted parameters of a successful fit.
    pub params: Option<FittedParams>,
    /// Failure description of an unsuccessful fit.
    pub error_message: Option<String>,
}

/// Aggregate counts over all attempted windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStatistics {
    pub total_windows: usize,
    pub successful_fits: usize,
    pub bubble_windows: usize,
    /// Successful fits as a share of attempted windows, 0 to 100.
    pub success_rate: f64,
}

/// The window sweep that was actually analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRange {
    pub min: usize,
    /// Requested maximum, clamped to the series length.
    pub max: usize,
    pub step: usize,
}

/// Result of a multi-window analysis.
///
/// This is the unit handed to an external persistence layer; it is
/// immutable and fully serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiWindowResult {
    /// Share of successful fits that qualify as bubble windows, 0 to 100.
    pub confidence_indicator: f64,
    /// Risk state derived from the confidence indicator.
    pub state: BubbleState,
    /// Fixed human-readable description of the state.
    pub message: String,
    pub statistics: WindowStatistics,
    pub window_range: WindowRange,
    /// Per-window outcomes, ordered by ascending window size.
    pub detailed_results: Vec<WindowResult>,
}
