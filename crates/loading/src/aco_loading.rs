//! Ant Colony Optimization based cargo loading.
//!
//! Ants build placement orders guided by pheromone and a static
//! `diameter × weight` desirability. Each ant's solution is hill-climbed
//! when the problem has local search enabled, and the colony's best order is
//! re-placed on the problem's final grid step when one is set.

use crate::problem::LoadingProblem;
use crate::refine::refine_solution;
use crate::solution::Solution;
use cylpack_core::aco::{AcoConfig, AcoProblem, AcoProgress, AcoRunner};
use cylpack_core::local_search::LocalSearch;
use cylpack_core::solver::{ProgressCallback, ProgressInfo};
use cylpack_core::{Result, SolveResult};
use rand::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

impl AcoProblem for LoadingProblem {
    fn heuristic(&self, item: usize) -> f64 {
        self.items()
            .get(item)
            .map_or(0.0, |cargo| cargo.diameter * cargo.weight)
    }

    fn refine_ant<R: Rng>(&self, solution: Solution, rng: &mut R) -> Solution {
        match self.local_search() {
            Some(config) => {
                LocalSearch::new(self, config.clone())
                    .improve(&solution, rng)
                    .solution
            }
            None => solution,
        }
    }

    fn finalize(&self, best: Solution) -> Solution {
        match self.final_grid_step() {
            Some(step) => refine_solution(self, &best, step),
            None => best,
        }
    }
}

/// Runs ACO-based cargo loading.
pub fn run_aco_loading<R: Rng>(
    problem: LoadingProblem,
    aco_config: AcoConfig,
    cancelled: Arc<AtomicBool>,
    rng: &mut R,
    callback: Option<&ProgressCallback>,
) -> Result<SolveResult<Solution>> {
    let total_items = problem.items().len();
    let runner = AcoRunner::new(aco_config, problem).with_cancel_flag(cancelled);

    let aco_result = match callback {
        Some(callback) => runner.run_with_rng_and_progress(
            rng,
            Some(|progress: AcoProgress| {
                let mut info = ProgressInfo::new()
                    .with_iteration(progress.iteration, progress.max_iterations)
                    .with_fitness(progress.best_fitness)
                    .with_items(progress.best_placed, total_items)
                    .with_elapsed(progress.elapsed.as_millis() as u64)
                    .with_phase("AntColony");
                if !progress.running {
                    info = info.finished();
                }
                callback(info);
            }),
        )?,
        None => runner.run_with_rng(rng)?,
    };

    Ok(SolveResult::new()
        .with_strategy("AntColony")
        .with_iterations(u64::from(aco_result.iterations))
        .with_best_generation(aco_result.best_iteration)
        .with_best_fitness(aco_result.best_fitness)
        .with_fitness_history(aco_result.history)
        .with_termination(aco_result.termination)
        .with_computation_time(aco_result.elapsed.as_millis() as u64)
        .with_solution(aco_result.best))
}
