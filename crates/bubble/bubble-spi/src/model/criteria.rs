//! Structural bubble conditions evaluated on fitted parameters.

use serde::{Deserialize, Serialize};

use crate::model::FittedParams;

/// Parameter windows associated with genuine log-periodic structure.
///
/// The numeric defaults are empirical and deliberately configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleCriteria {
    /// Closest admissible critical time, in observations past the
    /// reference index.
    pub tc_days_min: f64,
    /// Farthest admissible critical time (about two trading years).
    pub tc_days_max: f64,
    /// Lower bound of the valid power-law exponent range.
    pub m_min: f64,
    /// Upper bound of the valid power-law exponent range.
    pub m_max: f64,
    /// Lower bound of the valid oscillation frequency range.
    pub omega_min: f64,
    /// Upper bound of the valid oscillation frequency range.
    pub omega_max: f64,
    /// A critical time closer than this many observations escalates a
    /// high-confidence diagnosis to critical.
    pub critical_proximity_days: f64,
}

impl Default for BubbleCriteria {
    fn default() -> Self {
        Self {
            tc_days_min: 5.0,
            tc_days_max: 504.0,
            m_min: 0.1,
            m_max: 0.9,
            omega_min: 2.0,
            omega_max: 25.0,
            critical_proximity_days: 60.0,
        }
    }
}

impl BubbleCriteria {
    /// Evaluate the four structural conditions against a fitted parameter
    /// set, with the critical-time distance measured from `current_index`.
    pub fn indicators(&self, fitted: &FittedParams, current_index: usize) -> BubbleIndicators {
        let days_to_critical = fitted.tc - current_index as f64;
        BubbleIndicators {
            tc_in_range: days_to_critical >= self.tc_days_min
                && days_to_critical <= self.tc_days_max,
            b_negative: fitted.b < 0.0,
            m_valid: fitted.m >= self.m_min && fitted.m <= self.m_max,
            omega_valid: fitted.omega >= self.omega_min && fitted.omega <= self.omega_max,
        }
    }
}

/// Outcome of the four structural condition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleIndicators {
    /// Critical time lies in a plausible future window.
    pub tc_in_range: bool,
    /// Power-law amplitude has the bubble sign.
    pub b_negative: bool,
    /// Power-law exponent is non-degenerate.
    pub m_valid: bool,
    /// Oscillation frequency is in the log-periodic band.
    pub omega_valid: bool,
}

impl BubbleIndicators {
    /// Number of conditions checked.
    pub const COUNT: usize = 4;

    /// Number of satisfied conditions.
    pub fn satisfied(&self) -> usize {
        [self.tc_in_range, self.b_negative, self.m_valid, self.omega_valid]
            .iter()
            .filter(|&&x| x)
            .count()
    }

    /// Whether every condition holds.
    pub fn all(&self) -> bool {
        self.satisfied() == Self::COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble_params() -> FittedParams {
        FittedParams {
            tc: 230.0,
            a: 5.0,
            b: -0.5,
            c: 0.05,
            m: 0.5,
            omega: 8.0,
            phi: 0.0,
            residual_error: 0.01,
        }
    }

    #[test]
    fn test_all_conditions_hold_for_textbook_bubble() {
        let criteria = BubbleCriteria::default();
        let indicators = criteria.indicators(&bubble_params(), 199);
        assert!(indicators.all());
        assert_eq!(indicators.satisfied(), 4);
    }

    #[test]
    fn test_tc_too_close_fails_range_check() {
        let criteria = BubbleCriteria::default();
        let mut params = bubble_params();
        params.tc = 201.0; // 2 observations ahead of index 199
        let indicators = criteria.indicators(&params, 199);
        assert!(!indicators.tc_in_range);
        assert_eq!(indicators.satisfied(), 3);
    }

    #[test]
    fn test_tc_too_far_fails_range_check() {
        let criteria = BubbleCriteria::default();
        let mut params = bubble_params();
        params.tc = 199.0 + 600.0;
        let indicators = criteria.indicators(&params, 199);
        assert!(!indicators.tc_in_range);
    }

    #[test]
    fn test_positive_b_fails_sign_check() {
        let criteria = BubbleCriteria::default();
        let mut params = bubble_params();
        params.b = 0.1;
        let indicators = criteria.indicators(&params, 199);
        assert!(!indicators.b_negative);
    }

    #[test]
    fn test_degenerate_exponent_fails() {
        let criteria = BubbleCriteria::default();
        let mut params = bubble_params();
        params.m = 0.95;
        assert!(!criteria.indicators(&params, 199).m_valid);
        params.m = 0.05;
        assert!(!criteria.indicators(&params, 199).m_valid);
    }

    #[test]
    fn test_omega_outside_band_fails() {
        let criteria = BubbleCriteria::default();
        let mut params = bubble_params();
        params.omega = 40.0;
        assert!(!criteria.indicators(&params, 199).omega_valid);
    }
}
