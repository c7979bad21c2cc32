//! Integration tests for the bubble detection stack.

use bubble_facade::{
    AnalysisConfig, BubbleDetector, BubbleError, LpplFitter, MultiWindowAnalyzer, PriceSeries,
};

fn linear_series(n: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64 * 0.5).collect();
    PriceSeries::from_closes(1_700_000_000, &closes)
}

fn quarter_step_config() -> AnalysisConfig {
    AnalysisConfig {
        min_window: 125,
        max_window: 200,
        step: 25,
        max_iterations: 50,
        ..AnalysisConfig::default()
    }
}

#[test]
fn test_window_sweep_enumerates_expected_sizes() {
    let series = linear_series(200);
    let analyzer = MultiWindowAnalyzer::with_config(quarter_step_config());
    let result = analyzer.analyze(&series).unwrap();

    let sizes: Vec<usize> = result
        .detailed_results
        .iter()
        .map(|r| r.window_size)
        .collect();
    assert_eq!(sizes, vec![125, 150, 175, 200]);
    assert_eq!(result.statistics.total_windows, 4);
    assert_eq!(result.window_range.min, 125);
    assert_eq!(result.window_range.max, 200);
    assert_eq!(result.window_range.step, 25);
}

#[test]
fn test_max_window_clamped_to_series_length() {
    let series = linear_series(150);
    let config = AnalysisConfig {
        min_window: 125,
        max_window: 400,
        step: 25,
        max_iterations: 50,
        ..AnalysisConfig::default()
    };
    let result = MultiWindowAnalyzer::with_config(config)
        .analyze(&series)
        .unwrap();

    assert_eq!(result.window_range.max, 150);
    // Windows 125 and 150.
    assert_eq!(result.statistics.total_windows, 2);
}

#[test]
fn test_series_shorter_than_min_window_fails() {
    let series = linear_series(100);
    let analyzer = MultiWindowAnalyzer::with_config(quarter_step_config());
    let result = analyzer.analyze(&series);

    assert!(matches!(
        result,
        Err(BubbleError::InsufficientData {
            required: 125,
            actual: 100
        })
    ));
}

#[test]
fn test_confidence_indicator_bounded() {
    let series = linear_series(200);
    let result = MultiWindowAnalyzer::with_config(quarter_step_config())
        .analyze(&series)
        .unwrap();

    assert!(result.confidence_indicator >= 0.0);
    assert!(result.confidence_indicator <= 100.0);
    assert!(result.statistics.success_rate >= 0.0);
    assert!(result.statistics.success_rate <= 100.0);
    assert!(result.statistics.bubble_windows <= result.statistics.successful_fits);
}

#[test]
fn test_fit_is_deterministic_across_calls() {
    let series = linear_series(200);
    let fitter = LpplFitter::new();

    let a = fitter.fit(&series, 100);
    let b = fitter.fit(&series, 100);

    match (a, b) {
        (Ok(pa), Ok(pb)) => assert_eq!(pa, pb),
        (Err(BubbleError::FitDivergence { final_error: ea, .. }),
         Err(BubbleError::FitDivergence { final_error: eb, .. })) => assert_eq!(ea, eb),
        (a, b) => panic!("outcomes differ: {:?} vs {:?}", a, b),
    }
}

#[test]
fn test_repeated_analysis_is_identical() {
    // The external cache layer re-runs the analysis on a miss, so two
    // runs over the same inputs must agree exactly.
    let series = linear_series(160);
    let config = AnalysisConfig {
        min_window: 125,
        max_window: 160,
        step: 25,
        max_iterations: 40,
        ..AnalysisConfig::default()
    };
    let analyzer = MultiWindowAnalyzer::with_config(config);

    let first = analyzer.analyze(&series).unwrap();
    let second = analyzer.analyze(&series).unwrap();

    assert_eq!(first.confidence_indicator, second.confidence_indicator);
    assert_eq!(first.statistics, second.statistics);
    for (a, b) in first
        .detailed_results
        .iter()
        .zip(second.detailed_results.iter())
    {
        assert_eq!(a.window_size, b.window_size);
        assert_eq!(a.success, b.success);
        assert_eq!(a.is_bubble, b.is_bubble);
        assert_eq!(a.params, b.params);
    }
}

#[test]
fn test_detector_delegates_to_components() {
    let series = linear_series(40);
    let detector = BubbleDetector::new();

    // Too short for the default 125-observation sweep.
    assert!(detector.analyze_multi_window(&series).is_err());

    // Long enough for a single fit attempt; outcome may be either way
    // on a trendline, but the call must not panic.
    let _ = detector.fit(&series, 50);
}

#[test]
fn test_detector_explicit_window_sweep() {
    let series = linear_series(200);
    let detector = BubbleDetector::new();
    let result = detector
        .analyze_windows(&series, 125, 200, 25, 50)
        .unwrap();

    assert_eq!(result.statistics.total_windows, 4);
}

#[test]
fn test_detector_rejects_degenerate_sweep() {
    let series = linear_series(200);
    let detector = BubbleDetector::new();

    assert!(matches!(
        detector.analyze_windows(&series, 125, 200, 0, 50),
        Err(BubbleError::InvalidConfig(_))
    ));
    assert!(matches!(
        detector.analyze_windows(&series, 200, 125, 25, 50),
        Err(BubbleError::InvalidConfig(_))
    ));
}
