//! Bounded differential evolution (best/1/bin).

use bubble_spi::{BubbleError, CostFunction, GlobalMinimizer, Minimization, Result};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::nelder_mead;

/// Configuration for differential evolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeConfig {
    /// Individuals per search dimension.
    pub population_multiplier: usize,
    /// Dither range for the differential weight, resampled per generation.
    pub mutation: (f64, f64),
    /// Binomial crossover probability.
    pub recombination: f64,
    /// Relative convergence tolerance on the population energies.
    pub tol: f64,
    /// Absolute convergence tolerance on the population energies.
    pub atol: f64,
    /// RNG seed. Identical inputs and seed reproduce the same result.
    pub seed: u64,
    /// Refine the best candidate with a simplex polish after the
    /// population phase.
    pub polish: bool,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_multiplier: 15,
            mutation: (0.5, 1.0),
            recombination: 0.7,
            tol: 1e-6,
            atol: 1e-6,
            seed: 42,
            polish: true,
        }
    }
}

/// Differential evolution minimizer over a box-bounded space.
///
/// Uses best/1/bin mutation-crossover with per-generation dither on the
/// differential weight. All randomness comes from a seeded generator, so
/// runs are reproducible.
#[derive(Debug, Clone)]
pub struct DifferentialEvolution {
    config: DeConfig,
}

impl DifferentialEvolution {
    pub fn new() -> Self {
        Self {
            config: DeConfig::default(),
        }
    }

    pub fn with_config(config: DeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeConfig {
        &self.config
    }

    fn validate(&self, bounds: &[(f64, f64)]) -> Result<()> {
        if bounds.is_empty() {
            return Err(BubbleError::InvalidConfig(
                "bounds must not be empty".to_string(),
            ));
        }
        for &(lo, hi) in bounds {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(BubbleError::InvalidConfig(format!(
                    "invalid bound ({}, {})",
                    lo, hi
                )));
            }
        }
        if self.config.mutation.0 >= self.config.mutation.1 {
            return Err(BubbleError::InvalidConfig(
                "mutation dither range must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DifferentialEvolution {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalMinimizer for DifferentialEvolution {
    fn minimize(
        &self,
        objective: &dyn CostFunction,
        bounds: &[(f64, f64)],
        max_iterations: usize,
    ) -> Result<Minimization> {
        self.validate(bounds)?;

        let dims = bounds.len();
        let pop_size = (self.config.population_multiplier * dims).max(5);
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        // Uniform random initialization within bounds.
        let mut population: Vec<Vec<f64>> = (0..pop_size)
            .map(|_| {
                bounds
                    .iter()
                    .map(|&(lo, hi)| rng.gen_range(lo..=hi))
                    .collect()
            })
            .collect();
        let mut energies: Vec<f64> = population.iter().map(|x| objective.cost(x)).collect();
        let mut evaluations = pop_size;

        let mut best_idx = argmin(&energies);
        let mut converged = false;
        let mut iterations = 0;

        for generation in 0..max_iterations {
            iterations = generation + 1;
            let weight = rng.gen_range(self.config.mutation.0..self.config.mutation.1);

            for i in 0..pop_size {
                let r1 = sample_excluding(&mut rng, pop_size, &[i]);
                let r2 = sample_excluding(&mut rng, pop_size, &[i, r1]);
                let forced_gene = rng.gen_range(0..dims);

                let mut trial = vec![0.0; dims];
                for (j, slot) in trial.iter_mut().enumerate() {
                    let from_mutant =
                        j == forced_gene || rng.gen::<f64>() < self.config.recombination;
                    *slot = if from_mutant {
                        let v = population[best_idx][j]
                            + weight * (population[r1][j] - population[r2][j]);
                        v.clamp(bounds[j].0, bounds[j].1)
                    } else {
                        population[i][j]
                    };
                }

                let energy = objective.cost(&trial);
                evaluations += 1;
                if energy <= energies[i] {
                    population[i] = trial;
                    energies[i] = energy;
                    if energy < energies[best_idx] {
                        best_idx = i;
                    }
                }
            }

            let mean = energies.iter().sum::<f64>() / pop_size as f64;
            let variance =
                energies.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / pop_size as f64;
            let spread = variance.sqrt();
            trace!(
                generation,
                best = energies[best_idx],
                spread,
                "differential evolution generation"
            );
            if spread <= self.config.atol + self.config.tol * mean.abs() {
                converged = true;
                break;
            }
        }

        let mut best_x = population[best_idx].clone();
        let mut best_fun = energies[best_idx];

        if self.config.polish {
            let polished = nelder_mead::polish(objective, &best_x, bounds);
            evaluations += polished.evaluations;
            if polished.fun < best_fun {
                best_x = polished.x;
                best_fun = polished.fun;
            }
        }

        Ok(Minimization {
            x: best_x,
            fun: best_fun,
            iterations,
            evaluations,
            converged,
        })
    }
}

fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < values[best] {
            best = i;
        }
    }
    best
}

fn sample_excluding(rng: &mut StdRng, len: usize, exclude: &[usize]) -> usize {
    loop {
        let candidate = rng.gen_range(0..len);
        if !exclude.contains(&candidate) {
            return candidate;
        }
    }
}
