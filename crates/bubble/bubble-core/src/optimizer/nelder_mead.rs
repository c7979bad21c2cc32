//! Nelder-Mead simplex refinement of the global best candidate.

use bubble_spi::CostFunction;

/// Result of a local polish run.
#[derive(Debug, Clone)]
pub struct PolishOutcome {
    pub x: Vec<f64>,
    pub fun: f64,
    pub evaluations: usize,
}

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;
const FTOL: f64 = 1e-10;
const MAX_ITERATIONS_PER_DIM: usize = 200;
/// Initial vertex offset as a share of each dimension's bound width.
const INITIAL_STEP: f64 = 0.05;

/// Refine `start` with a bounds-clamped Nelder-Mead simplex search.
///
/// Every probed vertex is clamped into the feasible box, so the polish
/// never leaves the bounds the global phase searched.
pub fn polish(objective: &dyn CostFunction, start: &[f64], bounds: &[(f64, f64)]) -> PolishOutcome {
    let dims = start.len();
    let mut evaluations = 0usize;

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dims + 1);
    simplex.push(clamp_point(start.to_vec(), bounds));
    for j in 0..dims {
        let (lo, hi) = bounds[j];
        let width = hi - lo;
        let step = if width > 0.0 { width * INITIAL_STEP } else { INITIAL_STEP };
        let mut vertex = start.to_vec();
        vertex[j] = (vertex[j] + step).clamp(lo, hi);
        if (vertex[j] - start[j]).abs() < f64::EPSILON {
            // Start sits on the upper bound; step down instead.
            vertex[j] = (start[j] - step).clamp(lo, hi);
        }
        simplex.push(vertex);
    }

    let mut values: Vec<f64> = simplex
        .iter()
        .map(|v| {
            evaluations += 1;
            objective.cost(v)
        })
        .collect();

    for _ in 0..MAX_ITERATIONS_PER_DIM * dims.max(1) {
        sort_simplex(&mut simplex, &mut values);

        let best = values[0];
        let worst = values[dims];
        if (worst - best).abs() <= FTOL * (1.0 + best.abs()) {
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; dims];
        for vertex in simplex.iter().take(dims) {
            for (c, &v) in centroid.iter_mut().zip(vertex.iter()) {
                *c += v;
            }
        }
        for c in centroid.iter_mut() {
            *c /= dims as f64;
        }

        let reflected = move_through(&centroid, &simplex[dims], REFLECTION, bounds);
        evaluations += 1;
        let f_reflected = objective.cost(&reflected);

        if f_reflected < values[0] {
            let expanded = move_through(&centroid, &simplex[dims], EXPANSION, bounds);
            evaluations += 1;
            let f_expanded = objective.cost(&expanded);
            if f_expanded < f_reflected {
                simplex[dims] = expanded;
                values[dims] = f_expanded;
            } else {
                simplex[dims] = reflected;
                values[dims] = f_reflected;
            }
        } else if f_reflected < values[dims - 1] {
            simplex[dims] = reflected;
            values[dims] = f_reflected;
        } else {
            let (base, f_base) = if f_reflected < values[dims] {
                (reflected.clone(), f_reflected)
            } else {
                (simplex[dims].clone(), values[dims])
            };
            let contracted: Vec<f64> = centroid
                .iter()
                .zip(base.iter())
                .map(|(&c, &b)| c + CONTRACTION * (b - c))
                .collect();
            let contracted = clamp_point(contracted, bounds);
            evaluations += 1;
            let f_contracted = objective.cost(&contracted);

            if f_contracted < f_base {
                simplex[dims] = contracted;
                values[dims] = f_contracted;
            } else {
                // Shrink every non-best vertex toward the best.
                let best_vertex = simplex[0].clone();
                for i in 1..=dims {
                    let shrunk: Vec<f64> = best_vertex
                        .iter()
                        .zip(simplex[i].iter())
                        .map(|(&b, &v)| b + SHRINK * (v - b))
                        .collect();
                    simplex[i] = clamp_point(shrunk, bounds);
                    evaluations += 1;
                    values[i] = objective.cost(&simplex[i]);
                }
            }
        }
    }

    sort_simplex(&mut simplex, &mut values);
    PolishOutcome {
        x: simplex.swap_remove(0),
        fun: values[0],
        evaluations,
    }
}

fn sort_simplex(simplex: &mut [Vec<f64>], values: &mut [f64]) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| {
        values[i]
            .partial_cmp(&values[j])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted_simplex: Vec<Vec<f64>> = order.iter().map(|&i| simplex[i].clone()).collect();
    let sorted_values: Vec<f64> = order.iter().map(|&i| values[i]).collect();
    for (slot, vertex) in simplex.iter_mut().zip(sorted_simplex) {
        *slot = vertex;
    }
    values.copy_from_slice(&sorted_values);
}

/// Point at `centroid + coeff * (centroid - worst)`, clamped into bounds.
fn move_through(centroid: &[f64], worst: &[f64], coeff: f64, bounds: &[(f64, f64)]) -> Vec<f64> {
    let point = centroid
        .iter()
        .zip(worst.iter())
        .map(|(&c, &w)| c + coeff * (c - w))
        .collect();
    clamp_point(point, bounds)
}

fn clamp_point(mut point: Vec<f64>, bounds: &[(f64, f64)]) -> Vec<f64> {
    for (v, &(lo, hi)) in point.iter_mut().zip(bounds.iter()) {
        *v = v.clamp(lo, hi);
    }
    point
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quadratic;

    impl CostFunction for Quadratic {
        fn cost(&self, x: &[f64]) -> f64 {
            (x[0] - 0.25).powi(2) + 3.0 * (x[1] + 1.5).powi(2)
        }
    }

    #[test]
    fn test_polish_reaches_quadratic_minimum() {
        let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
        let outcome = polish(&Quadratic, &[2.0, 2.0], &bounds);

        assert!(outcome.fun < 1e-8, "fun = {}", outcome.fun);
        assert!((outcome.x[0] - 0.25).abs() < 1e-4);
        assert!((outcome.x[1] + 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_polish_improves_on_start() {
        let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
        let start = [3.0, -3.0];
        let outcome = polish(&Quadratic, &start, &bounds);
        assert!(outcome.fun <= Quadratic.cost(&start));
    }

    #[test]
    fn test_polish_stays_within_bounds() {
        // Unconstrained minimum at (0.25, -1.5) lies outside the box.
        let bounds = vec![(1.0, 5.0), (0.0, 5.0)];
        let outcome = polish(&Quadratic, &[4.0, 4.0], &bounds);

        assert!(outcome.x[0] >= 1.0 && outcome.x[0] <= 5.0);
        assert!(outcome.x[1] >= 0.0 && outcome.x[1] <= 5.0);
        assert!((outcome.x[0] - 1.0).abs() < 1e-3);
        assert!(outcome.x[1].abs() < 1e-3);
    }

    #[test]
    fn test_polish_from_bound_edge() {
        let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
        // Start exactly on the upper corner; the initial simplex must
        // still be non-degenerate.
        let outcome = polish(&Quadratic, &[5.0, 5.0], &bounds);
        assert!(outcome.fun < 1e-6);
    }
}
