//! The loading problem: placement + fitness behind the core search seams.

use crate::cargo::CargoItem;
use crate::container::Container;
use crate::fitness::FitnessEvaluator;
use crate::placement::{place_cargo, DEFAULT_GRID_STEP};
use crate::solution::Solution;
use cylpack_core::{Error, LocalSearchConfig, PermutationProblem, Result};

/// Checks an instance before any search runs.
///
/// The cargo list must be non-empty, every item valid, and ids must equal
/// their position (`items[i].id == i`).
pub fn validate_instance(items: &[CargoItem], container: &Container) -> Result<()> {
    container.validate()?;
    if items.is_empty() {
        return Err(Error::InvalidInstance("cargo list is empty".into()));
    }
    for (index, item) in items.iter().enumerate() {
        if item.id != index {
            return Err(Error::InvalidInstance(format!(
                "item at position {} has id {}; ids must be contiguous from 0",
                index, item.id
            )));
        }
        item.validate()?;
    }
    Ok(())
}

/// Decoder and objective shared by every strategy.
///
/// Owns the instance. Each decode works on its own copy of the items, so a
/// single problem can be evaluated from many threads at once.
#[derive(Debug, Clone)]
pub struct LoadingProblem {
    items: Vec<CargoItem>,
    container: Container,
    grid_step: f64,
    evaluator: FitnessEvaluator,
    local_search: Option<LocalSearchConfig>,
    final_grid_step: Option<f64>,
}

impl LoadingProblem {
    /// Creates a problem with the default grid step and canonical fitness.
    pub fn new(items: Vec<CargoItem>, container: Container) -> Self {
        Self {
            items,
            container,
            grid_step: DEFAULT_GRID_STEP,
            evaluator: FitnessEvaluator::default(),
            local_search: None,
            final_grid_step: None,
        }
    }

    /// Sets the placement grid step.
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step;
        self
    }

    /// Sets the fitness evaluator.
    pub fn with_evaluator(mut self, evaluator: FitnessEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Enables local-search refinement (GA hybridization, per-ant improvement).
    pub fn with_local_search(mut self, config: Option<LocalSearchConfig>) -> Self {
        self.local_search = config;
        self
    }

    /// Enables a final fine-grid pass on the colony's best solution.
    pub fn with_final_grid_step(mut self, step: Option<f64>) -> Self {
        self.final_grid_step = step;
        self
    }

    /// Validates the instance and the problem's tunables.
    pub fn validate(&self) -> Result<()> {
        validate_instance(&self.items, &self.container)?;
        for step in std::iter::once(self.grid_step).chain(self.final_grid_step) {
            if !(step.is_finite() && step > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "grid step must be a finite positive value, got {}",
                    step
                )));
            }
        }
        if let Some(config) = &self.local_search {
            config.validate()?;
        }
        self.evaluator.validate()
    }

    /// The cargo specifications.
    pub fn items(&self) -> &[CargoItem] {
        &self.items
    }

    /// The container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Placement grid step.
    pub fn grid_step(&self) -> f64 {
        self.grid_step
    }

    /// Fitness evaluator.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// Local search configuration, if refinement is enabled.
    pub fn local_search(&self) -> Option<&LocalSearchConfig> {
        self.local_search.as_ref()
    }

    /// Final refinement grid step, if enabled.
    pub fn final_grid_step(&self) -> Option<f64> {
        self.final_grid_step
    }

    /// Places and evaluates `order` at an explicit grid step.
    pub fn evaluate_order_at(&self, order: &[usize], grid_step: f64) -> Solution {
        let mut solution = place_cargo(order, &self.items, &self.container, grid_step);
        self.evaluator.evaluate(&mut solution);
        solution
    }
}

impl PermutationProblem for LoadingProblem {
    type Solution = Solution;

    fn num_items(&self) -> usize {
        self.items.len()
    }

    fn evaluate_order(&self, order: &[usize]) -> Solution {
        self.evaluate_order_at(order, self.grid_step)
    }

    fn fitness(&self, solution: &Solution) -> f64 {
        solution.fitness
    }

    fn order<'a>(&self, solution: &'a Solution) -> &'a [usize] {
        &solution.order
    }

    fn placed_count(&self, solution: &Solution) -> usize {
        solution.placed_count()
    }
}
