//! Time-indexed price curves produced by the forecaster.

use serde::{Deserialize, Serialize};

/// A price curve on the analysis time index.
///
/// The three vectors are parallel: `indices` are positions on the
/// series' synthetic time index, `timestamps` the corresponding Unix
/// timestamps, and `prices` the model prices (not log prices).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceCurve {
    pub indices: Vec<usize>,
    pub timestamps: Vec<i64>,
    pub prices: Vec<f64>,
}

impl PriceCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn push(&mut self, index: usize, timestamp: i64, price: f64) {
        self.indices.push(index);
        self.timestamps.push(timestamp);
        self.prices.push(price);
    }
}
