//! Cargo loading solver.

use crate::aco_loading::run_aco_loading;
use crate::cargo::CargoItem;
use crate::container::Container;
use crate::fitness::FitnessEvaluator;
use crate::ga_loading::run_ga_loading;
use crate::greedy::run_greedy;
use crate::problem::{validate_instance, LoadingProblem};
use crate::random_search::run_random_search;
use crate::solution::Solution;
use cylpack_core::solver::{Config, ProgressCallback, Solver, Strategy};
use cylpack_core::{Result, SolveResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Cargo loading solver.
///
/// Validates the instance, builds a [`LoadingProblem`] and dispatches on
/// [`Config::strategy`].
pub struct Loader {
    config: Config,
    evaluator: FitnessEvaluator,
    cancelled: Arc<AtomicBool>,
}

impl Loader {
    /// Creates a loader with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            evaluator: FitnessEvaluator::default(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a loader with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Replaces the fitness evaluator.
    pub fn with_evaluator(mut self, evaluator: FitnessEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a handle that cancels the running solve when set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn problem(&self, items: &[CargoItem], container: &Container) -> LoadingProblem {
        LoadingProblem::new(items.to_vec(), *container)
            .with_grid_step(self.config.grid_step)
            .with_evaluator(self.evaluator)
    }

    /// Genetic Algorithm with optional hybridization and final refinement.
    fn genetic_algorithm(
        &self,
        problem: LoadingProblem,
        rng: &mut StdRng,
        callback: Option<&ProgressCallback>,
    ) -> Result<SolveResult<Solution>> {
        let mut ga_config = self.config.ga.clone();
        if let Some(limit) = self.config.time_limit() {
            ga_config = ga_config.with_time_limit(limit);
        }

        let problem = if self.config.ga_local_search {
            // Hybridization needs at least the best individual refined.
            if ga_config.refine_count == 0 {
                ga_config = ga_config.with_refine_count(1);
            }
            problem.with_local_search(Some(self.config.local_search.clone()))
        } else {
            ga_config = ga_config.with_refine_count(0);
            problem
        };

        let refine_step = self
            .config
            .refine_final
            .then_some(self.config.refine_grid_step);

        run_ga_loading(
            problem,
            ga_config,
            refine_step,
            self.cancelled.clone(),
            rng,
            callback,
        )
    }

    /// Ant colony with per-ant local search and a final grid pass.
    fn ant_colony(
        &self,
        problem: LoadingProblem,
        rng: &mut StdRng,
        callback: Option<&ProgressCallback>,
    ) -> Result<SolveResult<Solution>> {
        let mut aco_config = self.config.aco.clone();
        if let Some(limit) = self.config.time_limit() {
            aco_config = aco_config.with_time_limit(limit);
        }

        let local_search = self
            .config
            .aco_local_search
            .then(|| self.config.local_search.clone());
        let problem = problem
            .with_local_search(local_search)
            .with_final_grid_step(Some(self.config.refine_grid_step));

        run_aco_loading(problem, aco_config, self.cancelled.clone(), rng, callback)
    }

    fn run(
        &self,
        items: &[CargoItem],
        container: &Container,
        callback: Option<&ProgressCallback>,
    ) -> Result<SolveResult<Solution>> {
        validate_instance(items, container)?;
        self.config.validate()?;

        let problem = self.problem(items, container);
        problem.validate()?;

        // Reset cancellation flag
        self.cancelled.store(false, Ordering::Relaxed);

        let start = Instant::now();
        let mut rng = self.rng();

        log::info!(
            "Solving {} items in {}x{} container (max {} kg) with {}",
            items.len(),
            container.width,
            container.depth,
            container.max_weight,
            self.config.strategy
        );

        let result = match self.config.strategy {
            Strategy::Greedy => run_greedy(&problem),
            Strategy::RandomSearch => run_random_search(
                &problem,
                self.config.random_iterations,
                self.config.time_limit(),
                self.cancelled.clone(),
                &mut rng,
                callback,
            ),
            Strategy::GeneticAlgorithm => self.genetic_algorithm(problem, &mut rng, callback)?,
            Strategy::AntColony => self.ant_colony(problem, &mut rng, callback)?,
        };

        Ok(result.with_computation_time(start.elapsed().as_millis() as u64))
    }
}

impl Solver for Loader {
    type Item = CargoItem;
    type Container = Container;
    type Solution = Solution;

    fn solve(
        &self,
        items: &[Self::Item],
        container: &Self::Container,
    ) -> Result<SolveResult<Solution>> {
        self.run(items, container, None)
    }

    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        container: &Self::Container,
        callback: ProgressCallback,
    ) -> Result<SolveResult<Solution>> {
        self.run(items, container, Some(&callback))
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cylpack_core::{Error, GaConfig};

    fn identical(n: usize) -> Vec<CargoItem> {
        (0..n).map(|id| CargoItem::new(id, 2.0, 10.0)).collect()
    }

    #[test]
    fn test_rejects_empty_instance() {
        let loader = Loader::default_config();
        let result = loader.solve(&[], &Container::new(10.0, 10.0, 100.0));
        assert!(matches!(result, Err(Error::InvalidInstance(_))));
    }

    #[test]
    fn test_rejects_bad_config_before_running() {
        let ga = GaConfig::default().with_population_size(3);
        let loader = Loader::new(Config::new().with_ga(ga));
        let result = loader.solve(&identical(3), &Container::new(10.0, 10.0, 100.0));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_greedy_strategy() {
        let loader = Loader::new(Config::new().with_strategy(Strategy::Greedy));
        let result = loader
            .solve(&identical(3), &Container::new(10.0, 10.0, 100.0))
            .unwrap();
        assert_eq!(result.strategy.as_deref(), Some("Greedy"));
        assert!(result.solution.unwrap().complete);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = Config::new()
            .with_strategy(Strategy::RandomSearch)
            .with_random_iterations(50)
            .with_seed(7);
        let items = vec![
            CargoItem::new(0, 3.0, 50.0),
            CargoItem::new(1, 2.0, 20.0),
            CargoItem::new(2, 2.5, 30.0),
        ];
        let container = Container::new(6.0, 6.0, 200.0);

        let a = Loader::new(config.clone()).solve(&items, &container).unwrap();
        let b = Loader::new(config).solve(&items, &container).unwrap();
        assert_eq!(a.solution.unwrap().order, b.solution.unwrap().order);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_progress_callback_is_invoked() {
        use std::sync::atomic::AtomicUsize;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let ga = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(3)
            .with_elite_count(1)
            .with_tournament_size(2)
            .with_target_fitness(None);
        let loader = Loader::new(Config::new().with_ga(ga).with_seed(1));
        loader
            .solve_with_progress(
                &identical(4),
                &Container::new(10.0, 10.0, 100.0),
                Box::new(move |_| {
                    counter.fetch_add(1, Ordering::Relaxed);
                }),
            )
            .unwrap();

        // One call per generation plus the final one.
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_progress_reports_items_placed_by_best() {
        use cylpack_core::{AcoConfig, ProgressInfo};
        use std::sync::Mutex;

        let ga = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(2)
            .with_elite_count(1)
            .with_tournament_size(2)
            .with_target_fitness(None);
        let aco = AcoConfig::default()
            .with_ants(4)
            .with_iterations(2)
            .with_target_fitness(None);

        for strategy in [Strategy::GeneticAlgorithm, Strategy::AntColony] {
            let seen: Arc<Mutex<Vec<ProgressInfo>>> = Arc::new(Mutex::new(Vec::new()));
            let sink = seen.clone();
            let loader = Loader::new(
                Config::new()
                    .with_strategy(strategy)
                    .with_ga(ga.clone())
                    .with_aco(aco.clone())
                    .with_seed(5),
            );
            loader
                .solve_with_progress(
                    &identical(4),
                    &Container::new(10.0, 10.0, 100.0),
                    Box::new(move |info| sink.lock().unwrap().push(info)),
                )
                .unwrap();

            let seen = seen.lock().unwrap();
            assert!(!seen.is_empty());
            for info in seen.iter() {
                assert_eq!((info.items_placed, info.total_items), (4, 4), "{}", strategy);
            }
            assert!(!seen.last().unwrap().running);
        }
    }

    #[test]
    fn test_greedy_ignores_unused_ga_config() {
        let ga = GaConfig::default().with_population_size(3);
        let loader = Loader::new(Config::new().with_strategy(Strategy::Greedy).with_ga(ga));
        let result = loader.solve(&identical(3), &Container::new(10.0, 10.0, 100.0));
        assert!(result.unwrap().solution.unwrap().complete);
    }
}
