//! Stochastic first-improvement local search over orders.
//!
//! Each iteration applies one random neighborhood move (swap or insertion,
//! chosen with equal probability) to the current order, decodes it and
//! accepts it only if the fitness strictly improves. The search stops after
//! `patience` consecutive rejections, after `max_iterations` iterations, or
//! when the target fitness is reached.

use crate::error::{Error, Result};
use crate::permutation::{insertion_move, swap_move, PermutationProblem};
use rand::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`LocalSearch`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalSearchConfig {
    /// Maximum number of neighbor evaluations.
    pub max_iterations: u32,
    /// Consecutive non-improving iterations before giving up.
    pub patience: u32,
    /// Stop as soon as the fitness is at or below this value.
    pub target_fitness: Option<f64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            patience: 50,
            target_fitness: Some(0.0),
        }
    }
}

impl LocalSearchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum iterations.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the patience.
    pub fn with_patience(mut self, patience: u32) -> Self {
        self.patience = patience;
        self
    }

    /// Sets the target fitness.
    pub fn with_target_fitness(mut self, fitness: Option<f64>) -> Self {
        self.target_fitness = fitness;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.patience == 0 {
            return Err(Error::InvalidConfig(
                "local search patience must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Neighborhood move applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NeighborhoodMove {
    /// Exchange two distinct positions.
    Swap,
    /// Remove one element and re-insert it elsewhere.
    Insertion,
}

impl NeighborhoodMove {
    /// Picks a move with equal probability.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            NeighborhoodMove::Swap
        } else {
            NeighborhoodMove::Insertion
        }
    }

    /// Applies the move to `order` in place.
    pub fn apply<R: Rng>(self, order: &mut Vec<usize>, rng: &mut R) {
        match self {
            NeighborhoodMove::Swap => swap_move(order, rng),
            NeighborhoodMove::Insertion => insertion_move(order, rng),
        }
    }
}

/// Outcome of a local search pass.
#[derive(Debug, Clone)]
pub struct LocalSearchResult<S> {
    /// Best solution found (the input if nothing improved).
    pub solution: S,
    /// Its fitness.
    pub fitness: f64,
    /// Neighbors evaluated.
    pub iterations: u32,
    /// Accepted moves.
    pub improvements: u32,
}

impl<S> LocalSearchResult<S> {
    /// Returns true if at least one move was accepted.
    pub fn improved(&self) -> bool {
        self.improvements > 0
    }
}

/// Local search bound to a problem.
pub struct LocalSearch<'p, P: PermutationProblem> {
    problem: &'p P,
    config: LocalSearchConfig,
}

impl<'p, P: PermutationProblem> LocalSearch<'p, P> {
    /// Creates a local search for the given problem.
    pub fn new(problem: &'p P, config: LocalSearchConfig) -> Self {
        Self { problem, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Improves an already evaluated solution.
    ///
    /// The returned fitness is never worse than the input's.
    pub fn improve<R: Rng>(&self, solution: &P::Solution, rng: &mut R) -> LocalSearchResult<P::Solution> {
        let mut best = solution.clone();
        let mut best_fitness = self.problem.fitness(&best);
        let mut iterations = 0;
        let mut improvements = 0;
        let mut no_improve = 0;

        let target_met = |fitness: f64| {
            self.config
                .target_fitness
                .is_some_and(|target| fitness <= target)
        };

        if self.problem.num_items() < 2 || target_met(best_fitness) {
            return LocalSearchResult {
                solution: best,
                fitness: best_fitness,
                iterations,
                improvements,
            };
        }

        while iterations < self.config.max_iterations && no_improve < self.config.patience {
            iterations += 1;

            let mut order = self.problem.order(&best).to_vec();
            NeighborhoodMove::random(rng).apply(&mut order, rng);

            let candidate = self.problem.evaluate_order(&order);
            let candidate_fitness = self.problem.fitness(&candidate);

            if candidate_fitness < best_fitness {
                best = candidate;
                best_fitness = candidate_fitness;
                improvements += 1;
                no_improve = 0;
                if target_met(best_fitness) {
                    break;
                }
            } else {
                no_improve += 1;
            }
        }

        log::trace!(
            "local search: {} iterations, {} improvements, fitness {:.4}",
            iterations,
            improvements,
            best_fitness
        );

        LocalSearchResult {
            solution: best,
            fitness: best_fitness,
            iterations,
            improvements,
        }
    }
}
