//! Price series input type.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BubbleError, Result};

/// A single closing-price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp (seconds).
    pub timestamp: i64,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Date-ordered series of closing prices.
///
/// Timestamps must be strictly increasing; insertion order is time order.
/// The series is read-only after construction. Non-finite or non-positive
/// closes are tolerated here and filtered out by the fitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, validating that timestamps are strictly increasing.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(BubbleError::InvalidParameter {
                    name: "prices".to_string(),
                    reason: "timestamps must be strictly increasing".to_string(),
                });
            }
        }
        Ok(Self { points })
    }

    /// Build a series from closes on a synthetic daily grid starting at `start`.
    pub fn from_closes(start: i64, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + i as i64 * 86_400, close))
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in time order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// The trailing `n` observations as an owned series.
    ///
    /// Returns the whole series when `n >= len`.
    pub fn tail(&self, n: usize) -> PriceSeries {
        let start = self.points.len().saturating_sub(n);
        PriceSeries {
            points: self.points[start..].to_vec(),
        }
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.points.last().map(|p| p.timestamp)
    }

    /// Calendar date of the last observation, when representable.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last_timestamp()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_increasing_timestamps() {
        let series = PriceSeries::new(vec![
            PricePoint::new(0, 100.0),
            PricePoint::new(86_400, 101.0),
            PricePoint::new(172_800, 102.0),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_new_rejects_unordered_timestamps() {
        let result = PriceSeries::new(vec![
            PricePoint::new(86_400, 100.0),
            PricePoint::new(0, 101.0),
        ]);
        assert!(matches!(
            result,
            Err(BubbleError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_timestamps() {
        let result = PriceSeries::new(vec![
            PricePoint::new(0, 100.0),
            PricePoint::new(0, 101.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tail_returns_trailing_window() {
        let series = PriceSeries::from_closes(0, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let tail = series.tail(2);
        assert_eq!(tail.closes(), vec![4.0, 5.0]);
    }

    #[test]
    fn test_tail_larger_than_series_returns_all() {
        let series = PriceSeries::from_closes(0, &[1.0, 2.0]);
        assert_eq!(series.tail(10).len(), 2);
    }

    #[test]
    fn test_last_date_from_timestamp() {
        // 2024-01-02 00:00:00 UTC
        let series = PriceSeries::from_closes(1_704_153_600, &[100.0]);
        let date = series.last_date().unwrap();
        assert_eq!(date.to_string(), "2024-01-02");
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new(vec![]).unwrap();
        assert!(series.is_empty());
        assert!(series.last_timestamp().is_none());
        assert!(series.last_date().is_none());
    }
}
