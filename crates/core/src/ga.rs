//! Genetic Algorithm framework for optimization.
//!
//! This module provides the GA abstraction layer for cylpack. It defines
//! domain-specific traits ([`Individual`], [`GaProblem`]) and a generational
//! runner with elitism, tournament selection, crossover, mutation, adaptive
//! mutation on stagnation and optional per-generation refinement of the best
//! individuals (hybridization with local search).
//!
//! Fitness is minimized: lower is better and `0.0` is a perfect solution.
//!
//! # Lifecycle
//!
//! [`GaEvolution`] makes the run an explicit state machine:
//! `Uninitialized -> Initialized -> Evolving -> Terminated`.
//! [`GaRunner`] drives it to completion and reports progress.

use crate::error::{check_unit_interval, Error, Result};
use crate::permutation::{is_permutation, order_crossover, random_permutation, swap_move};
use rand::prelude::*;
use rand::seq::index;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mutation-rate escalation applied while the search is stagnating.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdaptiveMutation {
    /// Stagnant generations tolerated before the rate starts growing.
    pub threshold: u32,
    /// Multiplier applied every stagnant generation past the threshold.
    pub factor: f64,
    /// Upper bound for the escalated rate.
    pub max_rate: f64,
}

impl Default for AdaptiveMutation {
    fn default() -> Self {
        Self {
            threshold: 30,
            factor: 1.5,
            max_rate: 0.5,
        }
    }
}

impl AdaptiveMutation {
    /// Returns the mutation rate to use after `stagnant` generations
    /// without improvement, given the rate currently in use.
    ///
    /// The rate never decreases here; resetting to the configured rate on
    /// improvement is the runner's job.
    pub fn escalate(&self, current: f64, stagnant: u32) -> f64 {
        if stagnant <= self.threshold {
            return current;
        }
        current.max((current * self.factor).min(self.max_rate))
    }
}

/// Configuration for the genetic algorithm.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Population size.
    pub population_size: usize,
    /// Maximum number of generations.
    pub max_generations: u32,
    /// Probability that a child comes from crossover instead of a clone (0.0 - 1.0).
    pub crossover_rate: f64,
    /// Probability that a child is mutated (0.0 - 1.0).
    pub mutation_rate: f64,
    /// Number of elite individuals to preserve each generation.
    pub elite_count: usize,
    /// Tournament size for selection.
    pub tournament_size: usize,
    /// Stagnation generations before early stop (None = never).
    pub stagnation_limit: Option<u32>,
    /// Mutation escalation on stagnation (None = fixed rate).
    pub adaptive_mutation: Option<AdaptiveMutation>,
    /// Number of best individuals refined each generation (0 = no hybridization).
    pub refine_count: usize,
    /// Stop as soon as the best fitness is at or below this value.
    pub target_fitness: Option<f64>,
    /// Maximum time limit (None = unlimited).
    pub time_limit: Option<Duration>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            max_generations: 1500,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            elite_count: 8,
            tournament_size: 4,
            stagnation_limit: Some(400),
            adaptive_mutation: Some(AdaptiveMutation::default()),
            refine_count: 0,
            target_fitness: Some(0.0),
            time_limit: None,
        }
    }
}

impl GaConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the maximum generations.
    pub fn with_max_generations(mut self, gen: u32) -> Self {
        self.max_generations = gen;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: Option<u32>) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the adaptive mutation policy.
    pub fn with_adaptive_mutation(mut self, adaptive: Option<AdaptiveMutation>) -> Self {
        self.adaptive_mutation = adaptive;
        self
    }

    /// Sets how many of the best individuals are refined each generation.
    pub fn with_refine_count(mut self, count: usize) -> Self {
        self.refine_count = count;
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

    /// Checks the configuration for inconsistent tunables.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig("population_size must be at least 1".into()));
        }
        if self.tournament_size == 0 {
            return Err(Error::InvalidConfig("tournament_size must be at least 1".into()));
        }
        if self.tournament_size > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "tournament_size {} exceeds population_size {}",
                self.tournament_size, self.population_size
            )));
        }
        if self.elite_count > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "elite_count {} exceeds population_size {}",
                self.elite_count, self.population_size
            )));
        }
        if self.refine_count > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "refine_count {} exceeds population_size {}",
                self.refine_count, self.population_size
            )));
        }
        check_unit_interval("crossover_rate", self.crossover_rate)?;
        check_unit_interval("mutation_rate", self.mutation_rate)?;
        if let Some(adaptive) = &self.adaptive_mutation {
            check_unit_interval("adaptive max_rate", adaptive.max_rate)?;
            if !(adaptive.factor >= 1.0 && adaptive.factor.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "adaptive mutation factor must be a finite value >= 1, got {}",
                    adaptive.factor
                )));
            }
        }
        if self.stagnation_limit == Some(0) {
            return Err(Error::InvalidConfig("stagnation_limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// Trait for individuals in the genetic algorithm.
///
/// Crossover and mutation are defined on the individual itself.
pub trait Individual: Clone + Send + Sync {
    /// Returns the fitness of this individual (lower is better).
    fn fitness(&self) -> f64;

    /// Performs crossover with another individual.
    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self;

    /// Mutates this individual in place.
    fn mutate<R: Rng>(&mut self, rng: &mut R);

    /// Number of items the decoded individual places (0 if unknown).
    fn placed_count(&self) -> usize {
        0
    }
}

/// Trait for problem-specific GA operations.
pub trait GaProblem: Send + Sync {
    /// The individual type for this problem.
    type Individual: Individual;

    /// Evaluates the fitness of an individual.
    fn evaluate(&self, individual: &mut Self::Individual);

    /// Evaluates multiple individuals in parallel.
    /// Default implementation uses rayon for parallel evaluation.
    fn evaluate_parallel(&self, individuals: &mut [Self::Individual]) {
        individuals.par_iter_mut().for_each(|ind| {
            self.evaluate(ind);
        });
    }

    /// Creates an (unevaluated) initial population.
    fn initialize_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Self::Individual>;

    /// Returns an improved copy of an evaluated individual.
    ///
    /// Called on the best `refine_count` individuals each generation. The
    /// result must not be worse than the input. Default: no refinement.
    fn refine<R: Rng>(&self, individual: &Self::Individual, _rng: &mut R) -> Self::Individual {
        individual.clone()
    }

    /// Called after each generation (for progress reporting).
    fn on_generation(
        &self,
        _generation: u32,
        _best: &Self::Individual,
        _population: &[Self::Individual],
    ) {
        // Default: do nothing
    }
}

/// Lifecycle state of a GA run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GaState {
    /// No population yet.
    Uninitialized,
    /// Initial population evaluated, no generation run yet.
    Initialized,
    /// At least one generation has been produced.
    Evolving,
    /// A termination condition was met.
    Terminated,
}

/// Why a GA run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// Best fitness reached the target (a perfect solution by default).
    TargetReached,
    /// No improvement for `stagnation_limit` generations.
    Stagnation,
    /// `max_generations` generations were run.
    MaxGenerations,
    /// The time limit elapsed.
    TimeLimit,
    /// The run was cancelled through its cancel handle.
    Cancelled,
}

/// Progress information during GA execution.
#[derive(Debug, Clone)]
pub struct GaProgress {
    /// Current generation number.
    pub generation: u32,
    /// Maximum generations configured.
    pub max_generations: u32,
    /// Best fitness so far.
    pub best_fitness: f64,
    /// Items placed by the best individual.
    pub best_placed: usize,
    /// Average fitness of current population.
    pub avg_fitness: f64,
    /// Mutation rate currently in use.
    pub mutation_rate: f64,
    /// Elapsed time since start.
    pub elapsed: Duration,
    /// Whether the algorithm is still running.
    pub running: bool,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found.
    pub best: I,
    /// Fitness of the best individual.
    pub best_fitness: f64,
    /// Generation at which the best individual was found (0 = initial population).
    pub best_generation: u32,
    /// Number of generations run.
    pub generations: u32,
    /// Total elapsed time.
    pub elapsed: Duration,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Running best fitness: initial population, then one entry per generation.
    pub history: Vec<f64>,
}

impl<I: Individual> GaResult<I> {
    /// Returns true if the target fitness was reached.
    pub fn target_reached(&self) -> bool {
        self.termination == TerminationReason::TargetReached
    }
}

fn by_fitness<I: Individual>(a: &I, b: &I) -> std::cmp::Ordering {
    a.fitness().total_cmp(&b.fitness())
}

/// One GA run as an explicit state machine.
///
/// The population is replaced wholesale every generation; evaluation of the
/// new children may run in parallel but is joined before selection reads the
/// population again.
pub struct GaEvolution<'p, P: GaProblem> {
    config: &'p GaConfig,
    problem: &'p P,
    state: GaState,
    population: Vec<P::Individual>,
    best: Option<P::Individual>,
    best_fitness: f64,
    best_generation: u32,
    generation: u32,
    stagnant_count: u32,
    mutation_rate: f64,
    history: Vec<f64>,
    termination: Option<TerminationReason>,
}

impl<'p, P: GaProblem> GaEvolution<'p, P> {
    /// Creates an uninitialized run.
    pub fn new(config: &'p GaConfig, problem: &'p P) -> Self {
        Self {
            config,
            problem,
            state: GaState::Uninitialized,
            population: Vec::new(),
            best: None,
            best_fitness: f64::INFINITY,
            best_generation: 0,
            generation: 0,
            stagnant_count: 0,
            mutation_rate: config.mutation_rate,
            history: Vec::new(),
            termination: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GaState {
        self.state
    }

    /// Current population (empty before initialization).
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// Best individual found so far.
    pub fn best(&self) -> Option<&P::Individual> {
        self.best.as_ref()
    }

    /// Best fitness found so far (infinity before initialization).
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Number of generations produced so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Consecutive generations without improvement.
    pub fn stagnant_count(&self) -> u32 {
        self.stagnant_count
    }

    /// Mutation rate currently in use.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Running best fitness history.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Reason the run terminated, if it has.
    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    /// Average fitness of the current population.
    pub fn average_fitness(&self) -> f64 {
        self.population.iter().map(|ind| ind.fitness()).sum::<f64>()
            / self.population.len().max(1) as f64
    }

    /// Builds and evaluates the initial population.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        if self.state != GaState::Uninitialized {
            return Err(Error::Internal("GA population already initialized".into()));
        }

        let mut population = self
            .problem
            .initialize_population(self.config.population_size, rng);
        if population.is_empty() {
            return Err(Error::Internal("problem produced an empty population".into()));
        }
        self.problem.evaluate_parallel(&mut population);
        population.sort_by(by_fitness);

        self.best_fitness = population[0].fitness();
        self.best = Some(population[0].clone());
        self.best_generation = 0;
        self.population = population;
        self.history.push(self.best_fitness);
        self.state = GaState::Initialized;

        if self.target_met() {
            self.terminate(TerminationReason::TargetReached);
        }
        Ok(())
    }

    /// Stops the run with the given reason.
    pub fn terminate(&mut self, reason: TerminationReason) {
        if self.termination.is_none() {
            self.termination = Some(reason);
        }
        self.state = GaState::Terminated;
    }

    fn target_met(&self) -> bool {
        self.config
            .target_fitness
            .is_some_and(|target| self.best_fitness <= target)
    }

    /// Produces one generation. Returns false once the run has terminated.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<bool> {
        match self.state {
            GaState::Uninitialized => {
                return Err(Error::Internal("GA stepped before initialization".into()))
            }
            GaState::Terminated => return Ok(false),
            GaState::Initialized | GaState::Evolving => {}
        }
        if self.generation >= self.config.max_generations {
            self.terminate(TerminationReason::MaxGenerations);
            return Ok(false);
        }

        let pop_size = self.config.population_size;
        let elite_count = self.config.elite_count.min(self.population.len());

        // Population is kept sorted ascending, so the elites are the prefix.
        let mut new_population: Vec<P::Individual> = Vec::with_capacity(pop_size);
        new_population.extend(self.population.iter().take(elite_count).cloned());

        let child_count = pop_size.saturating_sub(new_population.len());
        let mut children: Vec<P::Individual> = Vec::with_capacity(child_count);
        while children.len() < child_count {
            let parent1 = self.tournament_select(rng);
            let parent2 = self.tournament_select(rng);

            let mut child = if rng.gen::<f64>() < self.config.crossover_rate {
                parent1.crossover(parent2, rng)
            } else {
                parent1.clone()
            };

            if rng.gen::<f64>() < self.mutation_rate {
                child.mutate(rng);
            }

            children.push(child);
        }

        self.problem.evaluate_parallel(&mut children);
        new_population.extend(children);
        new_population.sort_by(by_fitness);

        // Hybridization: refine the current best individuals.
        let refine_count = self.config.refine_count.min(new_population.len());
        if refine_count > 0 {
            for slot in new_population.iter_mut().take(refine_count) {
                let refined = self.problem.refine(slot, rng);
                if refined.fitness() <= slot.fitness() {
                    *slot = refined;
                }
            }
            new_population.sort_by(by_fitness);
        }

        self.population = new_population;
        self.generation += 1;
        self.state = GaState::Evolving;

        let generation_best = self.population[0].fitness();
        if generation_best < self.best_fitness {
            self.best_fitness = generation_best;
            self.best = Some(self.population[0].clone());
            self.best_generation = self.generation;
            self.stagnant_count = 0;
            self.mutation_rate = self.config.mutation_rate;
        } else {
            self.stagnant_count += 1;
            if let Some(adaptive) = &self.config.adaptive_mutation {
                let escalated = adaptive.escalate(self.mutation_rate, self.stagnant_count);
                if escalated > self.mutation_rate {
                    log::debug!(
                        "GA stagnant for {} generations, mutation rate {:.3} -> {:.3}",
                        self.stagnant_count,
                        self.mutation_rate,
                        escalated
                    );
                }
                self.mutation_rate = escalated;
            }
        }

        self.history.push(self.best_fitness);

        if let Some(best) = &self.best {
            self.problem
                .on_generation(self.generation, best, &self.population);
        }

        if self.target_met() {
            self.terminate(TerminationReason::TargetReached);
        } else if self
            .config
            .stagnation_limit
            .is_some_and(|limit| self.stagnant_count >= limit)
        {
            self.terminate(TerminationReason::Stagnation);
        } else if self.generation >= self.config.max_generations {
            self.terminate(TerminationReason::MaxGenerations);
        }

        Ok(self.state != GaState::Terminated)
    }

    /// Tournament selection: best of `tournament_size` distinct random members.
    fn tournament_select<R: Rng>(&self, rng: &mut R) -> &P::Individual {
        let n = self.population.len();
        let k = self.config.tournament_size.clamp(1, n);
        let best_idx = index::sample(rng, n, k)
            .into_iter()
            .min_by(|&a, &b| by_fitness(&self.population[a], &self.population[b]))
            .unwrap_or(0);
        &self.population[best_idx]
    }

    /// Consumes the run and returns its result.
    pub fn finish(mut self, elapsed: Duration) -> Result<GaResult<P::Individual>> {
        if self.termination.is_none() {
            self.terminate(TerminationReason::MaxGenerations);
        }
        let best = self
            .best
            .take()
            .ok_or_else(|| Error::Internal("GA finished without a population".into()))?;

        Ok(GaResult {
            best,
            best_fitness: self.best_fitness,
            best_generation: self.best_generation,
            generations: self.generation,
            elapsed,
            termination: self.termination.unwrap_or(TerminationReason::MaxGenerations),
            history: self.history,
        })
    }
}

/// Genetic algorithm runner.
pub struct GaRunner<P: GaProblem> {
    config: GaConfig,
    problem: P,
    cancelled: Arc<AtomicBool>,
}

impl<P: GaProblem> GaRunner<P> {
    /// Creates a new GA runner.
    pub fn new(config: GaConfig, problem: P) -> Self {
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

    /// Returns the configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the genetic algorithm.
    pub fn run(&self) -> Result<GaResult<P::Individual>> {
        self.run_with_rng(&mut thread_rng())
    }

    /// Runs the genetic algorithm with a progress callback.
    pub fn run_with_progress<F>(&self, progress_callback: F) -> Result<GaResult<P::Individual>>
    where
        F: Fn(GaProgress),
    {
        self.run_with_rng_and_progress(&mut thread_rng(), Some(progress_callback))
    }

    /// Runs the genetic algorithm with a specific RNG.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<GaResult<P::Individual>> {
        self.run_with_rng_and_progress::<R, fn(GaProgress)>(rng, None)
    }

    /// Runs the genetic algorithm with a specific RNG and optional progress callback.
    pub fn run_with_rng_and_progress<R: Rng, F>(
        &self,
        rng: &mut R,
        progress_callback: Option<F>,
    ) -> Result<GaResult<P::Individual>>
    where
        F: Fn(GaProgress),
    {
        self.config.validate()?;

        let start = Instant::now();
        let mut evolution = GaEvolution::new(&self.config, &self.problem);
        evolution.initialize(rng)?;

        while evolution.state() != GaState::Terminated {
            if self.cancelled.load(Ordering::Relaxed) {
                evolution.terminate(TerminationReason::Cancelled);
                break;
            }
            if let Some(limit) = self.config.time_limit {
                if start.elapsed() > limit {
                    evolution.terminate(TerminationReason::TimeLimit);
                    break;
                }
            }

            evolution.step(rng)?;

            if let Some(ref callback) = progress_callback {
                callback(GaProgress {
                    generation: evolution.generation(),
                    max_generations: self.config.max_generations,
                    best_fitness: evolution.best_fitness(),
                    best_placed: evolution.best().map_or(0, Individual::placed_count),
                    avg_fitness: evolution.average_fitness(),
                    mutation_rate: evolution.mutation_rate(),
                    elapsed: start.elapsed(),
                    running: true,
                });
            }
        }

        // Final progress callback indicating completion
        if let Some(ref callback) = progress_callback {
            callback(GaProgress {
                generation: evolution.generation(),
                max_generations: self.config.max_generations,
                best_fitness: evolution.best_fitness(),
                best_placed: evolution.best().map_or(0, Individual::placed_count),
                avg_fitness: evolution.average_fitness(),
                mutation_rate: evolution.mutation_rate(),
                elapsed: start.elapsed(),
                running: false,
            });
        }

        let result = evolution.finish(start.elapsed())?;
        log::info!(
            "GA finished after {} generations ({:?}): best fitness {:.4} at generation {}",
            result.generations,
            result.termination,
            result.best_fitness,
            result.best_generation
        );
        Ok(result)
    }
}

/// Chromosome representation for permutation-based problems.
#[derive(Debug, Clone)]
pub struct PermutationChromosome {
    /// The permutation (indices).
    pub genes: Vec<usize>,
    /// Cached fitness value.
    fitness: f64,
}

impl PermutationChromosome {
    /// Creates the identity permutation of the given size.
    pub fn new(size: usize) -> Self {
        Self::from_genes((0..size).collect())
    }

    /// Wraps an existing permutation.
    pub fn from_genes(genes: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&genes));
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Creates a random chromosome.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        Self::from_genes(random_permutation(size, rng))
    }

    /// Returns the cached fitness (infinity until evaluated).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Sets the fitness value.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Returns the number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Order crossover (OX).
    pub fn order_crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        Self::from_genes(order_crossover(&self.genes, &other.genes, rng))
    }

    /// Swap mutation: exchanges two distinct positions.
    pub fn swap_mutate<R: Rng>(&mut self, rng: &mut R) {
        swap_move(&mut self.genes, rng);
        self.fitness = f64::INFINITY;
    }
}

impl Individual for PermutationChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        self.order_crossover(other, rng)
    }

    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        self.swap_mutate(rng);
    }
}
