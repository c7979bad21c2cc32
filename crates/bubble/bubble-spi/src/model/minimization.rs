//! Global minimization outcome.

use serde::{Deserialize, Serialize};

/// Best candidate found by a global minimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Minimization {
    /// Parameter vector of the best candidate.
    pub x: Vec<f64>,
    /// Objective value at the best candidate.
    pub fun: f64,
    /// Outer iterations performed.
    pub iterations: usize,
    /// Objective evaluations performed.
    pub evaluations: usize,
    /// Whether the convergence test was met before the budget ran out.
    pub converged: bool,
}
