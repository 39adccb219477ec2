//! Solver traits and configuration.

use crate::aco::AcoConfig;
use crate::error::{Error, Result};
use crate::ga::GaConfig;
use crate::local_search::LocalSearchConfig;
use crate::result::SolveResult;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optimization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Largest-first single placement (fast, baseline).
    Greedy,
    /// Best of many random orders (baseline).
    RandomSearch,
    /// Genetic Algorithm with optional local-search hybridization.
    #[default]
    GeneticAlgorithm,
    /// Ant Colony Optimization with per-ant local search.
    AntColony,
}

impl Strategy {
    /// All strategies, in benchmark order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Greedy,
        Strategy::RandomSearch,
        Strategy::GeneticAlgorithm,
        Strategy::AntColony,
    ];

    /// Short identifier used in reports and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::RandomSearch => "random",
            Strategy::GeneticAlgorithm => "ga",
            Strategy::AntColony => "aco",
        }
    }

    /// Parses an identifier produced by [`Strategy::name`] (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "greedy" => Some(Strategy::Greedy),
            "random" | "random_search" => Some(Strategy::RandomSearch),
            "ga" | "genetic" => Some(Strategy::GeneticAlgorithm),
            "aco" | "ant_colony" => Some(Strategy::AntColony),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Common configuration for solvers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Optimization strategy.
    pub strategy: Strategy,

    /// Grid spacing used by the placement scan.
    pub grid_step: f64,

    /// Finer grid spacing used by the final refinement pass.
    pub refine_grid_step: f64,

    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,

    /// RNG seed for reproducible runs (None = entropy).
    pub seed: Option<u64>,

    /// Orders sampled by random search.
    pub random_iterations: u32,

    /// GA parameters.
    pub ga: GaConfig,

    /// ACO parameters.
    pub aco: AcoConfig,

    /// Local search parameters shared by GA hybridization and ACO ants.
    pub local_search: LocalSearchConfig,

    /// Refine the GA's best individuals with local search each generation.
    pub ga_local_search: bool,

    /// Refine each ant's solution with local search before the pheromone update.
    pub aco_local_search: bool,

    /// Re-place the GA result at `refine_grid_step` before returning it.
    pub refine_final: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            grid_step: 0.1,
            refine_grid_step: 0.05,
            time_limit_ms: 0,
            seed: None,
            random_iterations: 2000,
            ga: GaConfig::default(),
            aco: AcoConfig::default(),
            local_search: LocalSearchConfig::default(),
            ga_local_search: false,
            aco_local_search: true,
            refine_final: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the optimization strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the placement grid step.
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step;
        self
    }

    /// Sets the refinement grid step.
    pub fn with_refine_grid_step(mut self, step: f64) -> Self {
        self.refine_grid_step = step;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the random search iteration count.
    pub fn with_random_iterations(mut self, iterations: u32) -> Self {
        self.random_iterations = iterations;
        self
    }

    /// Sets the GA parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the ACO parameters.
    pub fn with_aco(mut self, aco: AcoConfig) -> Self {
        self.aco = aco;
        self
    }

    /// Sets the local search parameters.
    pub fn with_local_search(mut self, local_search: LocalSearchConfig) -> Self {
        self.local_search = local_search;
        self
    }

    /// Enables or disables GA hybridization.
    pub fn with_ga_local_search(mut self, enabled: bool) -> Self {
        self.ga_local_search = enabled;
        self
    }

    /// Enables or disables per-ant local search.
    pub fn with_aco_local_search(mut self, enabled: bool) -> Self {
        self.aco_local_search = enabled;
        self
    }

    /// Enables or disables the final fine-grid pass on GA results.
    pub fn with_refine_final(mut self, enabled: bool) -> Self {
        self.refine_final = enabled;
        self
    }

    /// Time limit as a duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }

    /// Checks the configuration and the nested configs of the selected strategy.
    pub fn validate(&self) -> Result<()> {
        for (name, step) in [
            ("grid_step", self.grid_step),
            ("refine_grid_step", self.refine_grid_step),
        ] {
            if !(step.is_finite() && step > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite positive value, got {}",
                    name, step
                )));
            }
        }
        // Only the nested configs the selected strategy reads are checked.
        match self.strategy {
            Strategy::Greedy => {}
            Strategy::RandomSearch => {
                if self.random_iterations == 0 {
                    return Err(Error::InvalidConfig(
                        "random_iterations must be at least 1".into(),
                    ));
                }
            }
            Strategy::GeneticAlgorithm => {
                self.ga.validate()?;
                if self.ga_local_search {
                    self.local_search.validate()?;
                }
            }
            Strategy::AntColony => {
                self.aco.validate()?;
                if self.aco_local_search {
                    self.local_search.validate()?;
                }
            }
        }
        Ok(())
    }
}

/// Progress callback for long-running operations.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during solving.
#[derive(Debug, Clone, Default)]
pub struct ProgressInfo {
    /// Current iteration/generation number.
    pub iteration: u32,
    /// Total expected iterations (0 if unknown).
    pub total_iterations: u32,
    /// Current best fitness value.
    pub best_fitness: f64,
    /// Number of items placed in the best solution.
    pub items_placed: usize,
    /// Total number of items.
    pub total_items: usize,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Current phase/stage description.
    pub phase: String,
    /// Whether the solver is still running.
    pub running: bool,
}

impl ProgressInfo {
    /// Creates a new progress info with default values.
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Sets the iteration info.
    pub fn with_iteration(mut self, current: u32, total: u32) -> Self {
        self.iteration = current;
        self.total_iterations = total;
        self
    }

    /// Sets the best fitness.
    pub fn with_fitness(mut self, fitness: f64) -> Self {
        self.best_fitness = fitness;
        self
    }

    /// Sets the items placed info.
    pub fn with_items(mut self, placed: usize, total: usize) -> Self {
        self.items_placed = placed;
        self.total_items = total;
        self
    }

    /// Sets the elapsed time.
    pub fn with_elapsed(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    /// Sets the phase description.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Marks the solver as finished.
    pub fn finished(mut self) -> Self {
        self.running = false;
        self
    }

    /// Calculates the progress percentage (0.0 to 1.0).
    pub fn progress_percent(&self) -> f64 {
        if self.total_iterations > 0 {
            self.iteration as f64 / self.total_iterations as f64
        } else {
            0.0
        }
    }
}

/// Trait for loading solvers.
pub trait Solver {
    /// The item specification this solver places.
    type Item;
    /// The container the items are placed into.
    type Container;
    /// The solution type returned.
    type Solution;

    /// Solves the loading problem.
    fn solve(
        &self,
        items: &[Self::Item],
        container: &Self::Container,
    ) -> Result<SolveResult<Self::Solution>>;

    /// Solves with a progress callback.
    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        container: &Self::Container,
        callback: ProgressCallback,
    ) -> Result<SolveResult<Self::Solution>>;

    /// Cancels an ongoing solve operation.
    fn cancel(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_step, 0.1);
        assert_eq!(config.refine_grid_step, 0.05);
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn test_config_rejects_bad_grid_step() {
        assert!(Config::new().with_grid_step(0.0).validate().is_err());
        assert!(Config::new().with_refine_grid_step(-0.1).validate().is_err());
        assert!(Config::new().with_grid_step(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_config_propagates_nested_errors() {
        let ga = GaConfig::default().with_population_size(2);
        let err = Config::new().with_ga(ga).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_unused_nested_configs_are_not_checked() {
        let bad_ga = GaConfig::default().with_population_size(2);
        let bad_aco = AcoConfig::default().with_ants(0);
        for strategy in [Strategy::Greedy, Strategy::RandomSearch] {
            let config = Config::new()
                .with_strategy(strategy)
                .with_ga(bad_ga.clone())
                .with_aco(bad_aco.clone());
            assert!(config.validate().is_ok());
        }

        let aco_run = Config::new()
            .with_strategy(Strategy::AntColony)
            .with_ga(bad_ga);
        assert!(aco_run.validate().is_ok());
        assert!(aco_run.with_aco(bad_aco).validate().is_err());
    }

    #[test]
    fn test_local_search_checked_only_when_enabled() {
        let mut bad_local = LocalSearchConfig::default();
        bad_local.patience = 0;
        assert!(bad_local.validate().is_err());

        let ga = Config::new()
            .with_strategy(Strategy::GeneticAlgorithm)
            .with_local_search(bad_local.clone());
        assert!(ga.clone().with_ga_local_search(false).validate().is_ok());
        assert!(ga.with_ga_local_search(true).validate().is_err());

        let aco = Config::new()
            .with_strategy(Strategy::AntColony)
            .with_local_search(bad_local);
        assert!(aco.clone().with_aco_local_search(false).validate().is_ok());
        assert!(aco.with_aco_local_search(true).validate().is_err());
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_name(strategy.name()), Some(strategy));
        }
        assert_eq!(Strategy::from_name("GA"), Some(Strategy::GeneticAlgorithm));
        assert_eq!(Strategy::from_name("annealing"), None);
    }

    #[test]
    fn test_progress_info() {
        let info = ProgressInfo::new()
            .with_iteration(25, 100)
            .with_fitness(12.5)
            .with_items(3, 4)
            .with_phase("GA");
        assert!(info.running);
        assert_eq!(info.progress_percent(), 0.25);
        assert!(!info.finished().running);
    }
}
