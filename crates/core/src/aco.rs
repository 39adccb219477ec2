//! Ant Colony Optimization over orders.
//!
//! Each ant builds a permutation item by item, choosing the next unvisited
//! item with probability proportional to `tau[current][next]^alpha *
//! heuristic(next)^beta`. Constructed orders are decoded (and optionally
//! refined) in parallel; the pheromone matrix is only updated after every
//! ant of an iteration has finished.

use crate::error::{check_unit_interval, Error, Result};
use crate::ga::TerminationReason;
use crate::permutation::PermutationProblem;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the ant colony.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcoConfig {
    /// Ants per iteration.
    pub n_ants: usize,
    /// Maximum number of iterations.
    pub n_iterations: u32,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Heuristic exponent.
    pub beta: f64,
    /// Fraction of pheromone removed each iteration (0.0 - 1.0).
    pub evaporation: f64,
    /// Deposit numerator: an ant deposits `q / fitness` on each edge of its order.
    pub q: f64,
    /// Initial value of every pheromone entry.
    pub initial_pheromone: f64,
    /// Deposit for ants with fitness 0 (None = perfect ants deposit nothing).
    pub perfect_deposit: Option<f64>,
    /// Stop as soon as the best fitness is at or below this value.
    pub target_fitness: Option<f64>,
    /// Maximum time limit (None = unlimited).
    pub time_limit: Option<Duration>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 20,
            n_iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation: 0.5,
            q: 100.0,
            initial_pheromone: 1.0,
            perfect_deposit: None,
            target_fitness: Some(0.0),
            time_limit: None,
        }
    }
}

impl AcoConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of ants.
    pub fn with_ants(mut self, n_ants: usize) -> Self {
        self.n_ants = n_ants;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n_iterations: u32) -> Self {
        self.n_iterations = n_iterations;
        self
    }

    /// Sets the pheromone and heuristic exponents.
    pub fn with_exponents(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation(mut self, evaporation: f64) -> Self {
        self.evaporation = evaporation;
        self
    }

    /// Sets the deposit numerator.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the deposit used for perfect (fitness 0) ants.
    pub fn with_perfect_deposit(mut self, deposit: Option<f64>) -> Self {
        self.perfect_deposit = deposit;
        self
    }

    /// Sets the target fitness.
    pub fn with_target_fitness(mut self, fitness: Option<f64>) -> Self {
        self.target_fitness = fitness;
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants == 0 {
            return Err(Error::InvalidConfig("n_ants must be at least 1".into()));
        }
        check_unit_interval("evaporation", self.evaporation)?;
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("q", self.q),
            ("initial_pheromone", self.initial_pheromone),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative value, got {}",
                    name, value
                )));
            }
        }
        if let Some(deposit) = self.perfect_deposit {
            if !(deposit.is_finite() && deposit >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "perfect_deposit must be a finite non-negative value, got {}",
                    deposit
                )));
            }
        }
        Ok(())
    }
}

/// Dense N x N pheromone table, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    size: usize,
    tau: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates a matrix with every entry set to `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            size,
            tau: vec![initial; size * size],
        }
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Desirability of placing `to` right after `from`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.tau[from * self.size + to]
    }

    /// Multiplies every entry by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for value in &mut self.tau {
            *value *= keep;
        }
    }

    /// Adds `amount` to every consecutive edge `(order[i], order[i + 1])`.
    pub fn deposit(&mut self, order: &[usize], amount: f64) {
        for edge in order.windows(2) {
            if edge[0] < self.size && edge[1] < self.size {
                self.tau[edge[0] * self.size + edge[1]] += amount;
            }
        }
    }

    /// One colony update: evaporation, then every ant `(fitness, order)`
    /// deposits `q / fitness` on its edges. Ants with fitness 0 deposit
    /// `perfect_deposit`, or nothing when it is `None`.
    pub fn update(&mut self, ants: &[(f64, &[usize])], config: &AcoConfig) {
        self.evaporate(config.evaporation);
        for &(fitness, order) in ants {
            let amount = if fitness > 0.0 {
                config.q / fitness
            } else {
                match config.perfect_deposit {
                    Some(amount) => amount,
                    None => continue,
                }
            };
            self.deposit(order, amount);
        }
    }
}

/// Problem-specific hooks for the ant colony.
pub trait AcoProblem: PermutationProblem {
    /// Static desirability of an item, independent of the current partial order.
    fn heuristic(&self, item: usize) -> f64;

    /// Improves an ant's decoded solution before the pheromone update.
    /// Default: no refinement.
    fn refine_ant<R: Rng>(&self, solution: Self::Solution, _rng: &mut R) -> Self::Solution {
        solution
    }

    /// Post-processes the best solution once the colony has finished.
    /// Default: returns it unchanged.
    fn finalize(&self, best: Self::Solution) -> Self::Solution {
        best
    }
}

/// Builds one order by roulette-wheel sampling.
///
/// If rounding keeps the accumulated probability below the draw (or every
/// weight is zero) the next item is drawn uniformly from the unvisited ones.
pub fn construct_order<R: Rng>(
    pheromone: &PheromoneMatrix,
    heuristic: &[f64],
    alpha: f64,
    beta: f64,
    rng: &mut R,
) -> Vec<usize> {
    let n = heuristic.len();
    if n == 0 {
        return Vec::new();
    }

    let mut unvisited: Vec<usize> = (0..n).collect();
    let mut order = Vec::with_capacity(n);

    let mut current = unvisited.swap_remove(rng.gen_range(0..n));
    order.push(current);

    let mut weights: Vec<f64> = Vec::with_capacity(n);
    while !unvisited.is_empty() {
        weights.clear();
        weights.extend(
            unvisited
                .iter()
                .map(|&j| pheromone.get(current, j).powf(alpha) * heuristic[j].powf(beta)),
        );
        let total: f64 = weights.iter().sum();

        let draw = rng.gen::<f64>();
        let mut chosen = None;
        if total > 0.0 && total.is_finite() {
            let mut acc = 0.0;
            for (pos, w) in weights.iter().enumerate() {
                acc += w / total;
                if draw <= acc {
                    chosen = Some(pos);
                    break;
                }
            }
        }
        let pos = chosen.unwrap_or_else(|| rng.gen_range(0..unvisited.len()));

        // `remove` keeps the candidate order stable for the next roulette.
        current = unvisited.remove(pos);
        order.push(current);
    }

    order
}

/// Progress information during ACO execution.
#[derive(Debug, Clone)]
pub struct AcoProgress {
    /// Current iteration number.
    pub iteration: u32,
    /// Maximum iterations configured.
    pub max_iterations: u32,
    /// Best fitness so far.
    pub best_fitness: f64,
    /// Best fitness among this iteration's ants.
    pub iteration_best: f64,
    /// Items placed by the best solution.
    pub best_placed: usize,
    /// Elapsed time since start.
    pub elapsed: Duration,
    /// Whether the algorithm is still running.
    pub running: bool,
}

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoResult<S> {
    /// Best solution found (after `AcoProblem::finalize`).
    pub best: S,
    /// Its fitness.
    pub best_fitness: f64,
    /// Iteration at which the best was found (1-based).
    pub best_iteration: u32,
    /// Iterations run.
    pub iterations: u32,
    /// Total elapsed time.
    pub elapsed: Duration,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Running best fitness, one entry per iteration.
    pub history: Vec<f64>,
}

/// Ant colony runner.
pub struct AcoRunner<P: AcoProblem> {
    config: AcoConfig,
    problem: P,
    cancelled: Arc<AtomicBool>,
}

impl<P: AcoProblem> AcoRunner<P> {
    /// Creates a new ACO runner.
    pub fn new(config: AcoConfig, problem: P) -> Self {
        Self {
            config,
            problem,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares an external cancellation flag with this runner.
    pub fn with_cancel_flag(mut self, cancelled: Arc<AtomicBool>) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Returns a handle to cancel the algorithm.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Returns the problem being optimized.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Runs the colony.
    pub fn run(&self) -> Result<AcoResult<P::Solution>> {
        self.run_with_rng(&mut thread_rng())
    }

    /// Runs the colony with a specific RNG.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<AcoResult<P::Solution>> {
        self.run_with_rng_and_progress::<R, fn(AcoProgress)>(rng, None)
    }

    /// Runs the colony with a specific RNG and optional progress callback.
    pub fn run_with_rng_and_progress<R: Rng, F>(
        &self,
        rng: &mut R,
        progress_callback: Option<F>,
    ) -> Result<AcoResult<P::Solution>>
    where
        F: Fn(AcoProgress),
    {
        self.config.validate()?;

        let start = Instant::now();
        let n = self.problem.num_items();
        let heuristic: Vec<f64> = (0..n).map(|i| self.problem.heuristic(i)).collect();
        let mut pheromone = PheromoneMatrix::new(n, self.config.initial_pheromone);

        let mut best: Option<P::Solution> = None;
        let mut best_fitness = f64::INFINITY;
        let mut best_iteration = 0;
        let mut iterations = 0;
        let mut history = Vec::new();
        let mut termination = TerminationReason::MaxGenerations;

        for iteration in 1..=self.config.n_iterations {
            if self.cancelled.load(Ordering::Relaxed) {
                termination = TerminationReason::Cancelled;
                break;
            }
            if let Some(limit) = self.config.time_limit {
                if start.elapsed() > limit {
                    termination = TerminationReason::TimeLimit;
                    break;
                }
            }

            // Construction reads a fixed pheromone snapshot.
            let orders: Vec<Vec<usize>> = (0..self.config.n_ants)
                .map(|_| {
                    construct_order(
                        &pheromone,
                        &heuristic,
                        self.config.alpha,
                        self.config.beta,
                        rng,
                    )
                })
                .collect();
            let seeds: Vec<u64> = (0..self.config.n_ants).map(|_| rng.gen()).collect();

            let solutions: Vec<P::Solution> = orders
                .into_par_iter()
                .zip(seeds.into_par_iter())
                .map(|(order, seed)| {
                    let decoded = self.problem.evaluate_order(&order);
                    let mut ant_rng = StdRng::seed_from_u64(seed);
                    self.problem.refine_ant(decoded, &mut ant_rng)
                })
                .collect();

            let mut iteration_best = f64::INFINITY;
            for solution in &solutions {
                let fitness = self.problem.fitness(solution);
                iteration_best = iteration_best.min(fitness);
                if fitness < best_fitness {
                    best_fitness = fitness;
                    best = Some(solution.clone());
                    best_iteration = iteration;
                }
            }

            let ants: Vec<(f64, &[usize])> = solutions
                .iter()
                .map(|solution| (self.problem.fitness(solution), self.problem.order(solution)))
                .collect();
            pheromone.update(&ants, &self.config);

            iterations = iteration;
            history.push(best_fitness);

            log::debug!(
                "ACO iteration {}: iteration best {:.4}, best {:.4}",
                iteration,
                iteration_best,
                best_fitness
            );

            if let Some(ref callback) = progress_callback {
                callback(AcoProgress {
                    iteration,
                    max_iterations: self.config.n_iterations,
                    best_fitness,
                    iteration_best,
                    best_placed: best
                        .as_ref()
                        .map_or(0, |solution| self.problem.placed_count(solution)),
                    elapsed: start.elapsed(),
                    running: true,
                });
            }

            if self
                .config
                .target_fitness
                .is_some_and(|target| best_fitness <= target)
            {
                termination = TerminationReason::TargetReached;
                break;
            }
        }

        let best = match best {
            Some(best) => best,
            // No iteration ran (cancelled or zero iterations): decode the identity order.
            None => {
                let identity: Vec<usize> = (0..n).collect();
                self.problem.evaluate_order(&identity)
            }
        };
        let best = self.problem.finalize(best);
        let best_fitness = self.problem.fitness(&best);

        if let Some(ref callback) = progress_callback {
            callback(AcoProgress {
                iteration: iterations,
                max_iterations: self.config.n_iterations,
                best_fitness,
                iteration_best: best_fitness,
                best_placed: self.problem.placed_count(&best),
                elapsed: start.elapsed(),
                running: false,
            });
        }

        log::info!(
            "ACO finished after {} iterations ({:?}): best fitness {:.4} at iteration {}",
            iterations,
            termination,
            best_fitness,
            best_iteration
        );

        Ok(AcoResult {
            best,
            best_fitness,
            best_iteration,
            iterations,
            elapsed: start.elapsed(),
            termination,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::is_permutation;

    /// Fitness = number of adjacent pairs that are not `(k, k + 1)`.
    struct Chain {
        n: usize,
    }

    #[derive(Clone)]
    struct Scored {
        order: Vec<usize>,
        fitness: f64,
    }

    impl PermutationProblem for Chain {
        type Solution = Scored;

        fn num_items(&self) -> usize {
            self.n
        }

        fn evaluate_order(&self, order: &[usize]) -> Scored {
            let broken = order.windows(2).filter(|w| w[1] != w[0] + 1).count();
            Scored {
                order: order.to_vec(),
                fitness: broken as f64,
            }
        }

        fn fitness(&self, solution: &Scored) -> f64 {
            solution.fitness
        }

        fn order<'a>(&self, solution: &'a Scored) -> &'a [usize] {
            &solution.order
        }
    }

    impl AcoProblem for Chain {
        fn heuristic(&self, _item: usize) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_construct_order_is_permutation() {
        let pheromone = PheromoneMatrix::new(7, 1.0);
        let heuristic = vec![1.0, 2.0, 3.0, 0.5, 4.0, 1.0, 2.0];
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..100 {
            let order = construct_order(&pheromone, &heuristic, 1.0, 2.0, &mut rng);
            assert_eq!(order.len(), 7);
            assert!(is_permutation(&order));
        }
    }

    #[test]
    fn test_construct_order_degenerate_weights_fall_back() {
        // Zero pheromone everywhere: roulette total is zero.
        let pheromone = PheromoneMatrix::new(5, 0.0);
        let heuristic = vec![1.0; 5];
        let mut rng = StdRng::seed_from_u64(3);
        let order = construct_order(&pheromone, &heuristic, 1.0, 1.0, &mut rng);
        assert!(is_permutation(&order));
        assert!(construct_order(&PheromoneMatrix::new(0, 1.0), &[], 1.0, 1.0, &mut rng).is_empty());
    }

    #[test]
    fn test_strong_edge_dominates_roulette() {
        let mut pheromone = PheromoneMatrix::new(3, 1e-9);
        pheromone.deposit(&[0, 2, 1], 1.0);
        let heuristic = vec![1.0; 3];
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let order = construct_order(&pheromone, &heuristic, 1.0, 1.0, &mut rng);
            if order[0] == 0 {
                assert_eq!(order, vec![0, 2, 1]);
            }
        }
    }

    #[test]
    fn test_pheromone_update() {
        let mut pheromone = PheromoneMatrix::new(3, 1.0);
        pheromone.evaporate(0.5);
        assert_eq!(pheromone.get(1, 2), 0.5);

        pheromone.deposit(&[2, 0, 1], 4.0);
        assert_eq!(pheromone.get(2, 0), 4.5);
        assert_eq!(pheromone.get(0, 1), 4.5);
        assert_eq!(pheromone.get(1, 2), 0.5);
        assert_eq!(pheromone.get(0, 2), 0.5);
    }

    #[test]
    fn test_colony_update_deposits_inverse_fitness() {
        let config = AcoConfig::default().with_evaporation(0.5).with_q(100.0);
        let mut pheromone = PheromoneMatrix::new(3, 1.0);
        let order = [0, 1, 2];
        pheromone.update(&[(50.0, &order[..])], &config);

        assert_eq!(pheromone.get(0, 1), 0.5 + 2.0);
        assert_eq!(pheromone.get(1, 2), 0.5 + 2.0);
        assert_eq!(pheromone.get(1, 0), 0.5);
        assert_eq!(pheromone.get(2, 0), 0.5);
    }

    #[test]
    fn test_perfect_ant_deposits_nothing_by_default() {
        let config = AcoConfig::default().with_evaporation(0.5);
        assert_eq!(config.perfect_deposit, None);

        let mut updated = PheromoneMatrix::new(3, 1.0);
        let order = [2, 1, 0];
        updated.update(&[(0.0, &order[..])], &config);

        let mut evaporated = PheromoneMatrix::new(3, 1.0);
        evaporated.evaporate(0.5);
        assert_eq!(updated, evaporated);
    }

    #[test]
    fn test_perfect_deposit_amount_is_configurable() {
        let config = AcoConfig::default()
            .with_evaporation(0.5)
            .with_perfect_deposit(Some(3.0));
        let mut pheromone = PheromoneMatrix::new(3, 1.0);
        let perfect = [2, 1, 0];
        let imperfect = [0, 1, 2];
        pheromone.update(&[(0.0, &perfect[..]), (25.0, &imperfect[..])], &config);

        assert_eq!(pheromone.get(2, 1), 0.5 + 3.0);
        assert_eq!(pheromone.get(1, 0), 0.5 + 3.0);
        assert_eq!(pheromone.get(0, 1), 0.5 + 4.0);
        assert_eq!(pheromone.get(1, 2), 0.5 + 4.0);
        assert_eq!(pheromone.get(0, 2), 0.5);
    }

    #[test]
    fn test_aco_improves_and_tracks_history() {
        let config = AcoConfig::default().with_ants(10).with_iterations(30);
        let runner = AcoRunner::new(config, Chain { n: 6 });
        let result = runner.run_with_rng(&mut StdRng::seed_from_u64(77)).unwrap();

        assert!(is_permutation(&result.best.order));
        assert_eq!(result.history.len() as u32, result.iterations);
        for pair in result.history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert!(result.best_iteration >= 1 && result.best_iteration <= result.iterations);
    }

    #[test]
    fn test_aco_stops_on_target() {
        let runner = AcoRunner::new(AcoConfig::default(), Chain { n: 1 });
        let result = runner.run_with_rng(&mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(result.termination, TerminationReason::TargetReached);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best_fitness, 0.0);
    }

    #[test]
    fn test_cancelled_colony_returns_identity() {
        let runner = AcoRunner::new(AcoConfig::default(), Chain { n: 4 });
        runner.cancel_handle().store(true, Ordering::Relaxed);
        let result = runner.run_with_rng(&mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(result.termination, TerminationReason::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best.order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = AcoConfig::default()
            .with_ants(8)
            .with_iterations(5)
            .with_target_fitness(None);
        let a = AcoRunner::new(config.clone(), Chain { n: 8 })
            .run_with_rng(&mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = AcoRunner::new(config, Chain { n: 8 })
            .run_with_rng(&mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best.order, b.best.order);
    }

    #[test]
    fn test_config_validation() {
        assert!(AcoConfig::default().validate().is_ok());
        assert!(AcoConfig::default().with_ants(0).validate().is_err());
        assert!(AcoConfig::default().with_evaporation(1.5).validate().is_err());
        assert!(AcoConfig::default()
            .with_exponents(-1.0, 2.0)
            .validate()
            .is_err());
    }
}
