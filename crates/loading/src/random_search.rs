//! Random search baseline: best of many uniformly random orders.

use crate::problem::LoadingProblem;
use crate::solution::Solution;
use cylpack_core::solver::{ProgressCallback, ProgressInfo};
use cylpack_core::{random_permutation, PermutationProblem, SolveResult, TerminationReason};
use rand::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Iterations between history samples.
pub const HISTORY_INTERVAL: u32 = 10;

/// Samples up to `iterations` random orders and keeps the strictly best.
///
/// Stops early on a perfect solution, cancellation or the time limit. The
/// running best is recorded every [`HISTORY_INTERVAL`] iterations, and once
/// more at the end if it changed since the last sample.
pub fn run_random_search<R: Rng>(
    problem: &LoadingProblem,
    iterations: u32,
    time_limit: Option<Duration>,
    cancelled: Arc<AtomicBool>,
    rng: &mut R,
    callback: Option<&ProgressCallback>,
) -> SolveResult<Solution> {
    let start = Instant::now();
    let n = problem.num_items();

    let mut best: Option<Solution> = None;
    let mut best_fitness = f64::INFINITY;
    let mut improvements = 0u32;
    let mut history = Vec::new();
    let mut ran = 0u32;
    let mut termination = TerminationReason::MaxGenerations;

    for iteration in 0..iterations {
        if cancelled.load(Ordering::Relaxed) {
            termination = TerminationReason::Cancelled;
            break;
        }
        if time_limit.is_some_and(|limit| start.elapsed() > limit) {
            termination = TerminationReason::TimeLimit;
            break;
        }

        let candidate = problem.evaluate_order(&random_permutation(n, rng));
        ran += 1;

        if candidate.fitness < best_fitness {
            best_fitness = candidate.fitness;
            best = Some(candidate);
            improvements += 1;
            log::debug!(
                "Random search iteration {}: new best fitness {:.4}",
                iteration,
                best_fitness
            );
        }

        if iteration % HISTORY_INTERVAL == 0 {
            history.push(best_fitness);
            if let Some(callback) = callback {
                callback(
                    ProgressInfo::new()
                        .with_iteration(iteration, iterations)
                        .with_fitness(best_fitness)
                        .with_items(best.as_ref().map_or(0, Solution::placed_count), n)
                        .with_elapsed(start.elapsed().as_millis() as u64)
                        .with_phase("RandomSearch"),
                );
            }
        }

        if best_fitness == 0.0 {
            termination = TerminationReason::TargetReached;
            break;
        }
    }

    // A best found between samples would otherwise be missing from the history.
    if ran > 0 && history.last() != Some(&best_fitness) {
        history.push(best_fitness);
    }

    // Nothing sampled: fall back to the identity order so callers always get a solution.
    let best = best.unwrap_or_else(|| problem.evaluate_order(&(0..n).collect::<Vec<_>>()));
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if let Some(callback) = callback {
        callback(
            ProgressInfo::new()
                .with_iteration(ran, iterations)
                .with_fitness(best.fitness)
                .with_items(best.placed_count(), n)
                .with_elapsed(elapsed_ms)
                .with_phase("RandomSearch")
                .finished(),
        );
    }

    log::info!(
        "Random search finished after {} iterations ({:?}): {} improvements, best fitness {:.4}",
        ran,
        termination,
        improvements,
        best.fitness
    );

    SolveResult::new()
        .with_strategy("RandomSearch")
        .with_iterations(u64::from(ran))
        .with_best_fitness(best.fitness)
        .with_fitness_history(history)
        .with_termination(termination)
        .with_computation_time(elapsed_ms)
        .with_solution(best)
}
