//! Single-window diagnosis types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{BubbleIndicators, FittedParams};

/// Discrete bubble risk state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleState {
    Normal,
    Watch,
    Warning,
    Critical,
}

impl std::fmt::Display for BubbleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BubbleState::Normal => write!(f, "NORMAL"),
            BubbleState::Watch => write!(f, "WATCH"),
            BubbleState::Warning => write!(f, "WARNING"),
            BubbleState::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Fit quality summary attached to a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Mean squared residual of the fit.
    pub residual_error: f64,
    /// Number of observations the fit used.
    pub observations: usize,
}

/// Outcome of diagnosing a single fitted window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleDiagnosis {
    /// Risk state from the confidence score and critical-time proximity.
    pub state: BubbleState,
    /// Share of satisfied structural conditions, 0 to 100.
    pub confidence: f64,
    /// Fixed human-readable description of the state.
    pub message: String,
    /// Observations until the predicted critical time (may be negative).
    pub days_to_critical: f64,
    /// Projected calendar date of the critical time, when derivable.
    pub critical_date: Option<NaiveDate>,
    /// The individual structural condition outcomes.
    pub indicators: BubbleIndicators,
    /// Fitted parameters, display-rounded.
    pub parameters: FittedParams,
    /// Residual error and observation count of the underlying fit.
    pub fit_quality: FitQuality,
}
