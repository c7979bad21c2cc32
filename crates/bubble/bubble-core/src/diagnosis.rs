//! Single-window bubble diagnosis.

use bubble_spi::{
    BubbleCriteria, BubbleDiagnosis, BubbleState, FitQuality, FittedParams,
};
use chrono::{Days, NaiveDate};
use tracing::debug;

/// Diagnoses bubble risk from one fitted parameter set.
///
/// Evaluates the four structural conditions of [`BubbleCriteria`] and maps
/// the share of satisfied conditions to a risk state. Stateless: fitted
/// parameters are passed in by the caller, never stored.
#[derive(Debug, Clone, Default)]
pub struct BubbleDiagnoser {
    criteria: BubbleCriteria,
}

impl BubbleDiagnoser {
    pub fn new() -> Self {
        Self {
            criteria: BubbleCriteria::default(),
        }
    }

    pub fn with_criteria(criteria: BubbleCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &BubbleCriteria {
        &self.criteria
    }

    /// Diagnose a fitted window.
    ///
    /// `observations` is the number of points the fit used, `current_index`
    /// the reference position on the window's time index (normally the last
    /// one). When `series_end_date` is given and the critical time lies in
    /// the future, the diagnosis carries a projected calendar date.
    pub fn diagnose(
        &self,
        fitted: &FittedParams,
        observations: usize,
        current_index: usize,
        series_end_date: Option<NaiveDate>,
    ) -> BubbleDiagnosis {
        let days_to_critical = fitted.tc - current_index as f64;
        let indicators = self.criteria.indicators(fitted, current_index);
        let confidence =
            indicators.satisfied() as f64 / bubble_spi::BubbleIndicators::COUNT as f64 * 100.0;

        // First match wins: a high-confidence signal close to the critical
        // time escalates to critical.
        let (state, message) =
            if confidence >= 75.0 && days_to_critical < self.criteria.critical_proximity_days {
                (
                    BubbleState::Critical,
                    "Strong bubble signal, correction may be imminent",
                )
            } else if confidence >= 75.0 {
                (BubbleState::Warning, "Bubble warning, caution advised")
            } else if confidence >= 50.0 {
                (BubbleState::Watch, "Possible bubble, monitoring recommended")
            } else {
                (BubbleState::Normal, "Within normal range")
            };

        let critical_date = match series_end_date {
            Some(end) if days_to_critical > 0.0 => {
                end.checked_add_days(Days::new(days_to_critical.round() as u64))
            }
            _ => None,
        };

        debug!(
            %state,
            confidence,
            days_to_critical,
            "bubble diagnosis"
        );

        BubbleDiagnosis {
            state,
            confidence,
            message: message.to_string(),
            days_to_critical: round_to(days_to_critical, 1),
            critical_date,
            indicators,
            parameters: fitted.rounded(),
            fit_quality: FitQuality {
                residual_error: round_to(fitted.residual_error, 4),
                observations,
            },
        }
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
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
            residual_error: 0.0123456,
        }
    }

    #[test]
    fn test_all_conditions_give_full_confidence() {
        let diagnosis = BubbleDiagnoser::new().diagnose(&bubble_params(), 200, 199, None);
        assert_eq!(diagnosis.confidence, 100.0);
        assert!(diagnosis.indicators.all());
    }

    #[test]
    fn test_critical_when_confident_and_close() {
        // tc 31 observations ahead, all four conditions hold.
        let diagnosis = BubbleDiagnoser::new().diagnose(&bubble_params(), 200, 199, None);
        assert!(diagnosis.days_to_critical < 60.0);
        assert_eq!(diagnosis.state, BubbleState::Critical);
    }

    #[test]
    fn test_warning_when_confident_but_distant() {
        let mut params = bubble_params();
        params.tc = 199.0 + 200.0;
        let diagnosis = BubbleDiagnoser::new().diagnose(&params, 200, 199, None);
        assert_eq!(diagnosis.confidence, 100.0);
        assert_eq!(diagnosis.state, BubbleState::Warning);
    }

    #[test]
    fn test_watch_at_half_confidence() {
        let mut params = bubble_params();
        params.b = 0.1; // sign check fails
        params.omega = 40.0; // frequency check fails
        let diagnosis = BubbleDiagnoser::new().diagnose(&params, 200, 199, None);
        assert_eq!(diagnosis.confidence, 50.0);
        assert_eq!(diagnosis.state, BubbleState::Watch);
    }

    #[test]
    fn test_normal_below_half_confidence() {
        let mut params = bubble_params();
        params.b = 0.1;
        params.omega = 40.0;
        params.m = 0.95;
        let diagnosis = BubbleDiagnoser::new().diagnose(&params, 200, 199, None);
        assert_eq!(diagnosis.confidence, 25.0);
        assert_eq!(diagnosis.state, BubbleState::Normal);
        assert_eq!(diagnosis.message, "Within normal range");
    }

    #[test]
    fn test_critical_date_projection() {
        let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let diagnosis = BubbleDiagnoser::new().diagnose(&bubble_params(), 200, 199, Some(end));
        // 31 observations ahead of the series end.
        assert_eq!(diagnosis.days_to_critical, 31.0);
        assert_eq!(
            diagnosis.critical_date,
            NaiveDate::from_ymd_opt(2024, 2, 2)
        );
    }

    #[test]
    fn test_no_critical_date_without_end_date() {
        let diagnosis = BubbleDiagnoser::new().diagnose(&bubble_params(), 200, 199, None);
        assert!(diagnosis.critical_date.is_none());
    }

    #[test]
    fn test_no_critical_date_when_tc_in_the_past() {
        let mut params = bubble_params();
        params.tc = 150.0;
        let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let diagnosis = BubbleDiagnoser::new().diagnose(&params, 200, 199, Some(end));
        assert!(diagnosis.days_to_critical < 0.0);
        assert!(diagnosis.critical_date.is_none());
    }

    #[test]
    fn test_fractional_days_rounded_for_display() {
        let mut params = bubble_params();
        params.tc = 199.0 + 30.67;
        let diagnosis = BubbleDiagnoser::new().diagnose(&params, 200, 199, None);
        assert_eq!(diagnosis.days_to_critical, 30.7);
    }

    #[test]
    fn test_parameters_are_display_rounded() {
        let diagnosis = BubbleDiagnoser::new().diagnose(&bubble_params(), 200, 199, None);
        assert_eq!(diagnosis.parameters.residual_error, 0.0123);
        assert_eq!(diagnosis.fit_quality.residual_error, 0.0123);
        assert_eq!(diagnosis.fit_quality.observations, 200);
    }

    #[test]
    fn test_custom_criteria_shift_state_boundary() {
        let criteria = BubbleCriteria {
            critical_proximity_days: 20.0,
            ..BubbleCriteria::default()
        };
        // 31 observations ahead is no longer "close".
        let diagnosis =
            BubbleDiagnoser::with_criteria(criteria).diagnose(&bubble_params(), 200, 199, None);
        assert_eq!(diagnosis.state, BubbleState::Warning);
    }
}
