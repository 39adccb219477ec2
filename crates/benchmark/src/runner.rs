//! Benchmark runner for loading instances.

use crate::dataset::{Instance, InstanceSet};
use crate::result::{BenchmarkResult, PlacementInfo, RunResult};
use cylpack_core::{AcoConfig, Config, GaConfig, Solver, Strategy};
use cylpack_loading::Loader;
use instant::Instant;

/// Configuration for benchmark runs.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Strategies to benchmark.
    pub strategies: Vec<Strategy>,
    /// Time limit per run in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,
    /// Number of runs per strategy and instance.
    pub runs_per_config: usize,
    /// Base seed; run `k` uses `seed + k`.
    pub seed: Option<u64>,
    /// Whether to keep item coordinates in the results.
    pub record_placements: bool,
    /// Whether to show progress.
    pub show_progress: bool,
    /// Solver settings shared by every run (strategy and seed are overridden).
    pub solver: Config,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            strategies: Strategy::ALL.to_vec(),
            time_limit_ms: 0,
            runs_per_config: 1,
            seed: None,
            record_placements: false,
            show_progress: true,
            solver: Config::default(),
        }
    }
}

impl BenchmarkConfig {
    /// Creates a new benchmark configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strategies to benchmark.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Sets the time limit per run.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the number of runs per configuration.
    pub fn with_runs_per_config(mut self, n: usize) -> Self {
        self.runs_per_config = n;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Keeps item coordinates in every run result.
    pub fn with_placements(mut self, record: bool) -> Self {
        self.record_placements = record;
        self
    }

    /// Enables or disables progress output.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Sets the shared solver settings.
    pub fn with_solver(mut self, solver: Config) -> Self {
        self.solver = solver;
        self
    }

    /// Quick preset for fast benchmarking.
    pub fn quick() -> Self {
        Self {
            solver: Config::default()
                .with_random_iterations(500)
                .with_ga(
                    GaConfig::default()
                        .with_population_size(60)
                        .with_max_generations(200)
                        .with_stagnation_limit(Some(80)),
                )
                .with_aco(AcoConfig::default().with_ants(10).with_iterations(30)),
            time_limit_ms: 10_000,
            ..Self::default()
        }
    }

    /// Standard preset: full default parameters, three runs each.
    pub fn standard() -> Self {
        Self {
            runs_per_config: 3,
            ..Self::default()
        }
    }

    fn run_seed(&self, run_idx: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(run_idx as u64))
    }

    fn solver_config(&self, strategy: Strategy, run_idx: usize) -> Config {
        let mut config = self
            .solver
            .clone()
            .with_strategy(strategy)
            .with_time_limit(self.time_limit_ms);
        config.seed = self.run_seed(run_idx);
        config
    }
}

/// Benchmark runner.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Creates a new benchmark runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Runs every configured strategy on one instance.
    pub fn run_instance(&self, instance: &Instance) -> BenchmarkResult {
        let mut results = BenchmarkResult::new();

        if self.config.show_progress {
            println!("\nBenchmarking instance: {}", instance.name);
            println!("  Category: {}", instance.category);
            println!("  Items: {}", instance.items.len());
            println!(
                "  Container: {} x {} (max {} kg, cargo {} kg)",
                instance.container.width,
                instance.container.depth,
                instance.container.max_weight,
                instance.total_weight()
            );
        }

        for &strategy in &self.config.strategies {
            if self.config.show_progress {
                println!("  Running {}...", strategy);
            }

            for run_idx in 0..self.config.runs_per_config {
                let solver_config = self.config.solver_config(strategy, run_idx);
                let seed = solver_config.seed;
                let loader = Loader::new(solver_config);

                let start = Instant::now();
                let result = loader.solve(&instance.items, &instance.container);
                let elapsed = start.elapsed().as_millis() as u64;

                match result {
                    Ok(solve_result) => {
                        let mut run_result =
                            RunResult::new(instance, strategy, run_idx + 1, &solve_result, elapsed)
                                .with_seed(seed);

                        if self.config.record_placements {
                            if let Some(solution) = &solve_result.solution {
                                let placements = solution
                                    .placements()
                                    .into_iter()
                                    .map(|(id, x, y, placed)| PlacementInfo { id, x, y, placed })
                                    .collect();
                                run_result = run_result.with_placements(placements);
                            }
                        }

                        if self.config.show_progress {
                            println!(
                                "    Run {}: fitness={:.2}, placed={}/{}, perfect={}, time={}ms",
                                run_idx + 1,
                                run_result.fitness,
                                run_result.items_placed,
                                run_result.total_items,
                                run_result.perfect,
                                elapsed
                            );
                        }
                        if !run_result.verified {
                            log::warn!(
                                "{} run {} on {} failed verification (score {})",
                                strategy,
                                run_idx + 1,
                                instance.name,
                                run_result.violation_score
                            );
                        }

                        results.add_run(run_result);
                    }
                    Err(e) => {
                        log::error!("{} run {} on {} failed: {}", strategy, run_idx + 1, instance.name, e);
                        if self.config.show_progress {
                            println!("    Run {} failed: {}", run_idx + 1, e);
                        }
                    }
                }
            }
        }

        results
    }

    /// Runs benchmarks on every instance of a set.
    pub fn run_instances(&self, instances: &InstanceSet) -> BenchmarkResult {
        let mut combined = BenchmarkResult::new();
        for instance in instances {
            combined.merge(self.run_instance(instance));
        }
        combined
    }
}
