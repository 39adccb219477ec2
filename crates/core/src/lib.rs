//! # cylpack core
//!
//! Domain-agnostic search machinery for order-based layout optimization.
//!
//! Candidate solutions are permutations of item indices that a domain crate
//! decodes into a placed, scored solution. This crate provides the error
//! type, the permutation seam and the search frameworks built on it.
//!
//! ## Core Components
//!
//! - **Permutation seam**: [`PermutationProblem`] plus order operators
//! - **Solver trait**: [`Solver`] - Common interface for all strategies
//! - **GA framework**: [`GaRunner`], [`GaEvolution`], [`GaProblem`]
//! - **Local search**: [`LocalSearch`] - swap/insertion hill climbing
//! - **ACO framework**: [`AcoRunner`], [`AcoProblem`], [`PheromoneMatrix`]
//!
//! ## Optimization Strategies
//!
//! | Strategy | Speed | Quality | Description |
//! |----------|-------|---------|-------------|
//! | `Greedy` | Fast | Basic | Largest items first, single placement |
//! | `RandomSearch` | Medium | Basic | Best of many random orders |
//! | `GeneticAlgorithm` | Slow | High | OX crossover, swap mutation, elitism |
//! | `AntColony` | Slow | High | Pheromone-guided construction |
//!
//! ## Configuration
//!
//! ```rust
//! use cylpack_core::{Config, GaConfig, Strategy};
//!
//! let config = Config::new()
//!     .with_strategy(Strategy::GeneticAlgorithm)
//!     .with_ga(GaConfig::new().with_population_size(50).with_max_generations(100))
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod aco;
pub mod error;
pub mod ga;
pub mod local_search;
pub mod permutation;
pub mod result;
pub mod solver;

// Re-exports
pub use aco::{construct_order, AcoConfig, AcoProblem, AcoProgress, AcoResult, AcoRunner, PheromoneMatrix};
pub use error::{Error, Result};
pub use ga::{
    AdaptiveMutation, GaConfig, GaEvolution, GaProblem, GaProgress, GaResult, GaRunner, GaState,
    Individual, PermutationChromosome, TerminationReason,
};
pub use local_search::{LocalSearch, LocalSearchConfig, LocalSearchResult, NeighborhoodMove};
pub use permutation::{
    insertion_move, is_permutation, order_crossover, random_permutation, swap_move,
    PermutationProblem,
};
pub use result::{SolveResult, SolveSummary};
pub use solver::{Config, ProgressCallback, ProgressInfo, Solver, Strategy};
