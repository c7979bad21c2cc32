//! Global minimizer trait definitions.

use crate::error::Result;
use crate::model::Minimization;

/// Objective function evaluated by a global minimizer.
///
/// Implementations must map numerically invalid evaluations (overflow,
/// log of a non-positive value) to a large finite sentinel instead of
/// returning NaN or infinity, so the minimizer can reject the point and
/// keep searching.
pub trait CostFunction: Send + Sync {
    /// Evaluate the cost at a parameter vector.
    fn cost(&self, x: &[f64]) -> f64;
}

/// Bounded, derivative-free global minimizer.
///
/// Implementations search a box-bounded parameter space and must be
/// deterministic for a fixed configuration: two runs over the same
/// objective and bounds yield the same candidate.
pub trait GlobalMinimizer: Send + Sync {
    /// Minimize the objective over the given per-dimension bounds.
    ///
    /// `max_iterations` caps the outer iteration count. When the budget
    /// is exhausted the best candidate found so far is returned with
    /// `converged == false`; implementations never hang.
    fn minimize(
        &self,
        objective: &dyn CostFunction,
        bounds: &[(f64, f64)],
        max_iterations: usize,
    ) -> Result<Minimization>;
}
