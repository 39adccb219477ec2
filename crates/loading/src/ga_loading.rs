//! Genetic Algorithm based cargo loading.
//!
//! The genome is a placement order; decoding runs the bottom-left grid
//! placement and the penalty fitness. With local search enabled on the
//! problem, the best individuals of every generation are hill-climbed
//! (hybrid GA).

use crate::problem::LoadingProblem;
use crate::refine::refine_solution;
use crate::solution::Solution;
use cylpack_core::ga::{GaConfig, GaProblem, GaProgress, GaRunner, Individual, PermutationChromosome};
use cylpack_core::local_search::LocalSearch;
use cylpack_core::solver::{ProgressCallback, ProgressInfo};
use cylpack_core::{PermutationProblem, Result, SolveResult};
use rand::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// A population member: genome plus its decoded solution.
#[derive(Debug, Clone)]
pub struct LoadingIndividual {
    chromosome: PermutationChromosome,
    solution: Option<Solution>,
}

impl LoadingIndividual {
    /// Creates an unevaluated individual with a random order.
    pub fn random<R: Rng>(num_items: usize, rng: &mut R) -> Self {
        Self {
            chromosome: PermutationChromosome::random(num_items, rng),
            solution: None,
        }
    }

    /// Wraps an evaluated solution.
    pub fn from_solution(solution: Solution) -> Self {
        let mut chromosome = PermutationChromosome::from_genes(solution.order.clone());
        chromosome.set_fitness(solution.fitness);
        Self {
            chromosome,
            solution: Some(solution),
        }
    }

    /// The placement order.
    pub fn order(&self) -> &[usize] {
        &self.chromosome.genes
    }

    /// The decoded solution, if evaluated.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Consumes the individual and returns its solution, if evaluated.
    pub fn into_solution(self) -> Option<Solution> {
        self.solution
    }
}

impl Individual for LoadingIndividual {
    fn fitness(&self) -> f64 {
        self.chromosome.fitness()
    }

    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        Self {
            chromosome: self.chromosome.order_crossover(&other.chromosome, rng),
            solution: None,
        }
    }

    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        self.chromosome.swap_mutate(rng);
        self.solution = None;
    }

    fn placed_count(&self) -> usize {
        self.solution.as_ref().map_or(0, Solution::placed_count)
    }
}

impl GaProblem for LoadingProblem {
    type Individual = LoadingIndividual;

    fn evaluate(&self, individual: &mut Self::Individual) {
        // Unmutated clones keep their decoded solution.
        if individual.solution.is_some() {
            return;
        }
        let solution = self.evaluate_order(individual.order());
        individual.chromosome.set_fitness(solution.fitness);
        individual.solution = Some(solution);
    }

    fn initialize_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Self::Individual> {
        (0..size)
            .map(|_| LoadingIndividual::random(self.num_items(), rng))
            .collect()
    }

    fn refine<R: Rng>(&self, individual: &Self::Individual, rng: &mut R) -> Self::Individual {
        let (Some(config), Some(solution)) = (self.local_search(), individual.solution()) else {
            return individual.clone();
        };
        let result = LocalSearch::new(self, config.clone()).improve(solution, rng);
        LoadingIndividual::from_solution(result.solution)
    }

    fn on_generation(
        &self,
        generation: u32,
        best: &Self::Individual,
        _population: &[Self::Individual],
    ) {
        log::debug!(
            "GA Generation {}: fitness={:.4}, placed={}/{}",
            generation,
            best.fitness(),
            best.placed_count(),
            self.num_items()
        );
    }
}

/// Runs GA-based cargo loading.
///
/// `refine_step` re-places the final best order at a finer grid (kept only
/// if not worse).
pub fn run_ga_loading<R: Rng>(
    problem: LoadingProblem,
    ga_config: GaConfig,
    refine_step: Option<f64>,
    cancelled: Arc<AtomicBool>,
    rng: &mut R,
    callback: Option<&ProgressCallback>,
) -> Result<SolveResult<Solution>> {
    let total_items = problem.num_items();
    let runner = GaRunner::new(ga_config, problem).with_cancel_flag(cancelled);

    let ga_result = match callback {
        Some(callback) => runner.run_with_rng_and_progress(
            rng,
            Some(|progress: GaProgress| {
                let mut info = ProgressInfo::new()
                    .with_iteration(progress.generation, progress.max_generations)
                    .with_fitness(progress.best_fitness)
                    .with_items(progress.best_placed, total_items)
                    .with_elapsed(progress.elapsed.as_millis() as u64)
                    .with_phase("GeneticAlgorithm");
                if !progress.running {
                    info = info.finished();
                }
                callback(info);
            }),
        )?,
        None => runner.run_with_rng(rng)?,
    };

    let problem = runner.problem();
    let mut best = match ga_result.best.solution() {
        Some(solution) => solution.clone(),
        None => problem.evaluate_order(ga_result.best.order()),
    };
    if let Some(step) = refine_step {
        best = refine_solution(problem, &best, step);
    }

    Ok(SolveResult::new()
        .with_strategy("GeneticAlgorithm")
        .with_generations(ga_result.generations)
        .with_best_generation(ga_result.best_generation)
        .with_best_fitness(best.fitness)
        .with_fitness_history(ga_result.history)
        .with_termination(ga_result.termination)
        .with_computation_time(ga_result.elapsed.as_millis() as u64)
        .with_solution(best))
}
