//! Solve result representation.

use crate::ga::TerminationReason;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a solve operation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResult<S> {
    /// Final solution (None only if the solver produced nothing).
    pub solution: Option<S>,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Number of generations (for GA-based solvers).
    pub generations: Option<u32>,

    /// Generation at which the best solution was found (for GA-based solvers).
    pub best_generation: Option<u32>,

    /// Number of iterations (for random search and ACO).
    pub iterations: Option<u64>,

    /// Best fitness value achieved.
    pub best_fitness: Option<f64>,

    /// Fitness history over generations/iterations (for analysis).
    pub fitness_history: Option<Vec<f64>>,

    /// Strategy used for solving.
    pub strategy: Option<String>,

    /// Why the search stopped, for iterative strategies.
    pub termination: Option<TerminationReason>,

    /// Whether the solve was cancelled early.
    pub cancelled: bool,

    /// Whether the target fitness was reached.
    pub target_reached: bool,
}

impl<S> SolveResult<S> {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            solution: None,
            computation_time_ms: 0,
            generations: None,
            best_generation: None,
            iterations: None,
            best_fitness: None,
            fitness_history: None,
            strategy: None,
            termination: None,
            cancelled: false,
            target_reached: false,
        }
    }

    /// Returns true if a solution is present.
    pub fn is_successful(&self) -> bool {
        self.solution.is_some()
    }

    /// Returns true if the solve was not cancelled.
    pub fn completed_normally(&self) -> bool {
        !self.cancelled
    }

    /// Sets the solution.
    pub fn with_solution(mut self, solution: S) -> Self {
        self.solution = Some(solution);
        self
    }

    /// Sets the strategy name.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Sets the generations count.
    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Sets the generation of the best solution.
    pub fn with_best_generation(mut self, generation: u32) -> Self {
        self.best_generation = Some(generation);
        self
    }

    /// Sets the iteration count.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the best fitness.
    pub fn with_best_fitness(mut self, fitness: f64) -> Self {
        self.best_fitness = Some(fitness);
        self
    }

    /// Sets the fitness history.
    pub fn with_fitness_history(mut self, history: Vec<f64>) -> Self {
        self.fitness_history = Some(history);
        self
    }

    /// Sets the termination reason and derives the cancelled/target flags from it.
    pub fn with_termination(mut self, reason: TerminationReason) -> Self {
        self.termination = Some(reason);
        self.cancelled = reason == TerminationReason::Cancelled;
        self.target_reached = reason == TerminationReason::TargetReached;
        self
    }

    /// Sets the computation time.
    pub fn with_computation_time(mut self, ms: u64) -> Self {
        self.computation_time_ms = ms;
        self
    }

    /// Maps the solution to another type, keeping the statistics.
    pub fn map_solution<T, F: FnOnce(S) -> T>(self, f: F) -> SolveResult<T> {
        SolveResult {
            solution: self.solution.map(f),
            computation_time_ms: self.computation_time_ms,
            generations: self.generations,
            best_generation: self.best_generation,
            iterations: self.iterations,
            best_fitness: self.best_fitness,
            fitness_history: self.fitness_history,
            strategy: self.strategy,
            termination: self.termination,
            cancelled: self.cancelled,
            target_reached: self.target_reached,
        }
    }
}

impl<S> Default for SolveResult<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a solve result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveSummary {
    /// Best fitness (infinity if unknown).
    pub best_fitness: f64,
    /// Generations or iterations run.
    pub steps: u64,
    /// Computation time in milliseconds.
    pub time_ms: u64,
    /// Strategy used.
    pub strategy: String,
}

impl<S> From<&SolveResult<S>> for SolveSummary {
    fn from(result: &SolveResult<S>) -> Self {
        Self {
            best_fitness: result.best_fitness.unwrap_or(f64::INFINITY),
            steps: result
                .generations
                .map(u64::from)
                .or(result.iterations)
                .unwrap_or(0),
            time_ms: result.computation_time_ms,
            strategy: result
                .strategy
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_new() {
        let result: SolveResult<Vec<usize>> = SolveResult::new();
        assert!(!result.is_successful());
        assert!(result.completed_normally());
        assert!(result.fitness_history.is_none());
    }

    #[test]
    fn test_termination_sets_flags() {
        let result: SolveResult<()> = SolveResult::new().with_termination(TerminationReason::Cancelled);
        assert!(result.cancelled);
        assert!(!result.target_reached);

        let result: SolveResult<()> =
            SolveResult::new().with_termination(TerminationReason::TargetReached);
        assert!(result.target_reached);
        assert!(result.completed_normally());
    }

    #[test]
    fn test_map_solution_keeps_statistics() {
        let result = SolveResult::new()
            .with_solution(vec![2usize, 0, 1])
            .with_generations(12)
            .with_best_fitness(3.5)
            .with_strategy("ga");
        let mapped = result.map_solution(|order| order.len());
        assert_eq!(mapped.solution, Some(3));
        assert_eq!(mapped.generations, Some(12));
        assert_eq!(mapped.best_fitness, Some(3.5));
    }

    #[test]
    fn test_solve_summary() {
        let result: SolveResult<()> = SolveResult::new()
            .with_iterations(2000)
            .with_best_fitness(0.0)
            .with_computation_time(100)
            .with_strategy("random");

        let summary = SolveSummary::from(&result);
        assert_eq!(summary.steps, 2000);
        assert_eq!(summary.best_fitness, 0.0);
        assert_eq!(summary.strategy, "random");
    }
}
