//! # cylpack loading
//!
//! Loading of circular cargo (cylinders standing upright) onto a
//! rectangular container floor.
//!
//! A candidate solution is a placement order. The [`placement`] engine scans
//! each item onto the first bottom-left grid position that neither overlaps
//! an earlier item nor leaves the floor; the [`fitness`] evaluator scores the
//! result (unplaced items, excess weight, off-center mass). Search drivers
//! look for the order with the lowest score:
//!
//! - [`greedy`]: largest items first
//! - [`random_search`]: best of many random orders
//! - [`ga_loading`]: genetic algorithm, optionally hybridized with local search
//! - [`aco_loading`]: ant colony with per-ant local search
//!
//! ## Quick Start
//!
//! ```rust
//! use cylpack_loading::{CargoItem, Config, Container, Loader, Solver, Strategy};
//!
//! let items: Vec<CargoItem> = (0..3).map(|id| CargoItem::new(id, 2.0, 10.0)).collect();
//! let container = Container::new(10.0, 10.0, 100.0);
//!
//! let loader = Loader::new(Config::new().with_strategy(Strategy::Greedy));
//! let result = loader.solve(&items, &container).unwrap();
//! assert!(result.solution.unwrap().complete);
//! ```

pub mod aco_loading;
pub mod cargo;
pub mod container;
pub mod fitness;
pub mod ga_loading;
pub mod greedy;
pub mod loader;
pub mod placement;
pub mod problem;
pub mod random_search;
pub mod refine;
pub mod solution;
pub mod verify;

// Re-exports
pub use aco_loading::run_aco_loading;
pub use cargo::CargoItem;
pub use container::Container;
pub use fitness::{
    calculate_fitness, FitnessEvaluator, PenaltyWeights, SafeZone, SafeZoneBounds, Violations,
    PENALTY_COM_DISTANCE, PENALTY_UNPLACED, PENALTY_WEIGHT_KG, SAFE_ZONE_MARGIN,
    SAFE_ZONE_RADIUS_RATIO,
};
pub use ga_loading::{run_ga_loading, LoadingIndividual};
pub use greedy::{greedy_order, run_greedy};
pub use loader::Loader;
pub use placement::{find_position, is_valid_position, place_cargo, DEFAULT_GRID_STEP, FINE_GRID_STEP};
pub use problem::{validate_instance, LoadingProblem};
pub use random_search::run_random_search;
pub use refine::refine_solution;
pub use solution::Solution;
pub use verify::{verify_solution, VerificationReport, OVERLAP_TOLERANCE};

pub use cylpack_core::{
    AcoConfig, AdaptiveMutation, Config, Error, GaConfig, LocalSearchConfig, PermutationProblem,
    ProgressCallback, ProgressInfo, Result, SolveResult, Solver, Strategy, TerminationReason,
};
