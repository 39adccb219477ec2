//! Penalty-based fitness evaluation.
//!
//! Fitness is a sum of weighted penalties, lower is better and `0.0` means
//! complete, within the weight limit and balanced:
//!
//! 1. `unplaced × PENALTY_UNPLACED`. If anything is unplaced the score is
//!    this term alone; positions of a partial packing are not scored.
//! 2. `max(0, placed_weight − max_weight) × PENALTY_WEIGHT_KG`.
//! 3. Distance of the center of mass outside the safe zone × `PENALTY_COM_DISTANCE`.
//!
//! The canonical safe zone is the rectangle `[0.2·W, 0.8·W] × [0.2·D, 0.8·D]`
//! with a per-axis clipped (Manhattan) distance. The circular zone of radius
//! `0.6 · min(W, D) / 2` around the container center is available as
//! [`SafeZone::Circular`] but is not the default.

use crate::container::Container;
use crate::solution::Solution;
use cylpack_core::{Error, Result};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Penalty per unplaced item.
pub const PENALTY_UNPLACED: f64 = 1000.0;
/// Penalty per kg above the weight limit.
pub const PENALTY_WEIGHT_KG: f64 = 10.0;
/// Penalty per unit of distance between the center of mass and the safe zone.
pub const PENALTY_COM_DISTANCE: f64 = 100.0;
/// Margin of the rectangular safe zone, as a fraction of each side.
pub const SAFE_ZONE_MARGIN: f64 = 0.2;
/// Radius of the circular safe zone, as a fraction of half the shorter side.
pub const SAFE_ZONE_RADIUS_RATIO: f64 = 0.6;

/// Region the center of mass must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SafeZone {
    /// `[m·W, (1−m)·W] × [m·D, (1−m)·D]`, distance summed per axis.
    Rectangular {
        /// Margin fraction `m`.
        margin: f64,
    },
    /// Disc of radius `ratio · min(W, D) / 2` around the center, Euclidean distance.
    Circular {
        /// Radius fraction.
        radius_ratio: f64,
    },
}

impl Default for SafeZone {
    fn default() -> Self {
        SafeZone::Rectangular {
            margin: SAFE_ZONE_MARGIN,
        }
    }
}

/// Concrete bounds of a rectangular safe zone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafeZoneBounds {
    /// `(x_min, x_max)`.
    pub x_range: (f64, f64),
    /// `(y_min, y_max)`.
    pub y_range: (f64, f64),
}

impl SafeZone {
    /// Circular zone with the canonical radius ratio.
    pub fn circular() -> Self {
        SafeZone::Circular {
            radius_ratio: SAFE_ZONE_RADIUS_RATIO,
        }
    }

    /// Axis-aligned bounds of the zone for a container.
    ///
    /// For the circular zone this is the bounding box of the disc.
    pub fn bounds(&self, container: &Container) -> SafeZoneBounds {
        match *self {
            SafeZone::Rectangular { margin } => SafeZoneBounds {
                x_range: (container.width * margin, container.width * (1.0 - margin)),
                y_range: (container.depth * margin, container.depth * (1.0 - margin)),
            },
            SafeZone::Circular { .. } => {
                let (cx, cy) = container.center();
                let r = self.radius(container).unwrap_or(0.0);
                SafeZoneBounds {
                    x_range: (cx - r, cx + r),
                    y_range: (cy - r, cy + r),
                }
            }
        }
    }

    fn radius(&self, container: &Container) -> Option<f64> {
        match *self {
            SafeZone::Circular { radius_ratio } => {
                Some(radius_ratio * container.width.min(container.depth) / 2.0)
            }
            SafeZone::Rectangular { .. } => None,
        }
    }

    /// Distance of `point` outside the zone (0 inside or on the boundary).
    pub fn distance_outside(&self, point: (f64, f64), container: &Container) -> f64 {
        match *self {
            SafeZone::Rectangular { .. } => {
                let bounds = self.bounds(container);
                axis_excess(point.0, bounds.x_range) + axis_excess(point.1, bounds.y_range)
            }
            SafeZone::Circular { .. } => {
                let (cx, cy) = container.center();
                let r = self.radius(container).unwrap_or(0.0);
                let d = ((point.0 - cx).powi(2) + (point.1 - cy).powi(2)).sqrt();
                (d - r).max(0.0)
            }
        }
    }

    /// Returns true if `point` lies inside the zone.
    pub fn contains(&self, point: (f64, f64), container: &Container) -> bool {
        self.distance_outside(point, container) == 0.0
    }

    fn validate(&self) -> Result<()> {
        match *self {
            SafeZone::Rectangular { margin } if !(0.0..=0.5).contains(&margin) => {
                Err(Error::InvalidConfig(format!(
                    "safe zone margin must be within [0, 0.5], got {}",
                    margin
                )))
            }
            SafeZone::Circular { radius_ratio } if !(0.0..=1.0).contains(&radius_ratio) => {
                Err(Error::InvalidConfig(format!(
                    "safe zone radius ratio must be within [0, 1], got {}",
                    radius_ratio
                )))
            }
            _ => Ok(()),
        }
    }
}

fn axis_excess(value: f64, (min, max): (f64, f64)) -> f64 {
    if value < min {
        min - value
    } else if value > max {
        value - max
    } else {
        0.0
    }
}

/// Penalty multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PenaltyWeights {
    /// Per unplaced item.
    pub unplaced: f64,
    /// Per excess kg.
    pub weight_kg: f64,
    /// Per unit of center-of-mass distance outside the safe zone.
    pub com_distance: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            unplaced: PENALTY_UNPLACED,
            weight_kg: PENALTY_WEIGHT_KG,
            com_distance: PENALTY_COM_DISTANCE,
        }
    }
}

/// Penalty breakdown of an evaluated solution.
///
/// Every field is zero / `None` when the corresponding penalty does not apply.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Violations {
    /// Number of unplaced items.
    pub unplaced_items: usize,
    /// Penalty for unplaced items.
    pub unplaced_penalty: f64,
    /// Placed weight above the limit, in kg.
    pub excess_weight_kg: f64,
    /// Penalty for excess weight.
    pub weight_penalty: f64,
    /// Distance of the center of mass outside the safe zone.
    pub com_distance_outside: f64,
    /// Penalty for the center of mass.
    pub com_penalty: f64,
    /// Center of mass, recorded when it is outside the safe zone.
    pub com_position: Option<(f64, f64)>,
    /// Safe zone bounds, recorded when the center of mass is outside them.
    pub safe_zone: Option<SafeZoneBounds>,
}

impl Violations {
    /// Returns true if no penalty applies.
    pub fn is_empty(&self) -> bool {
        self.total_penalty() == 0.0
    }

    /// Sum of all penalty terms.
    pub fn total_penalty(&self) -> f64 {
        self.unplaced_penalty + self.weight_penalty + self.com_penalty
    }

    /// Named numeric entries for reporting; only terms that apply are present.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        let mut map = BTreeMap::new();
        if self.unplaced_items > 0 {
            map.insert("unplaced_items", self.unplaced_items as f64);
            map.insert("unplaced_penalty", self.unplaced_penalty);
        }
        if self.excess_weight_kg > 0.0 {
            map.insert("excess_weight_kg", self.excess_weight_kg);
            map.insert("weight_penalty", self.weight_penalty);
        }
        if self.com_distance_outside > 0.0 {
            map.insert("com_distance_outside", self.com_distance_outside);
            map.insert("com_penalty", self.com_penalty);
        }
        map
    }
}

/// Scores solutions with configurable weights and safe zone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessEvaluator {
    /// Penalty multipliers.
    pub weights: PenaltyWeights,
    /// Balance region.
    pub safe_zone: SafeZone,
}

impl FitnessEvaluator {
    /// Creates an evaluator with the canonical weights and rectangular zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the penalty weights.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the safe zone.
    pub fn with_safe_zone(mut self, safe_zone: SafeZone) -> Self {
        self.safe_zone = safe_zone;
        self
    }

    /// Checks weights and zone parameters.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("unplaced penalty", self.weights.unplaced),
            ("weight penalty", self.weights.weight_kg),
            ("center-of-mass penalty", self.weights.com_distance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative value, got {}",
                    name, value
                )));
            }
        }
        self.safe_zone.validate()
    }

    /// Computes fitness and violations without touching the solution.
    pub fn score(&self, solution: &Solution) -> (f64, Violations) {
        let mut violations = Violations::default();

        let unplaced = solution.unplaced_count();
        if unplaced > 0 {
            violations.unplaced_items = unplaced;
            violations.unplaced_penalty = unplaced as f64 * self.weights.unplaced;
        }
        if unplaced > 0 || !solution.complete {
            return (violations.unplaced_penalty, violations);
        }

        let container = &solution.container;
        let excess = solution.total_placed_weight() - container.max_weight;
        if excess > 0.0 {
            violations.excess_weight_kg = excess;
            violations.weight_penalty = excess * self.weights.weight_kg;
        }

        // Nothing placed (empty instance): no balance term.
        if let Some(com) = solution.center_of_mass() {
            let outside = self.safe_zone.distance_outside(com, container);
            if outside > 0.0 {
                violations.com_distance_outside = outside;
                violations.com_penalty = outside * self.weights.com_distance;
                violations.com_position = Some(com);
                violations.safe_zone = Some(self.safe_zone.bounds(container));
            }
        }

        (violations.total_penalty(), violations)
    }

    /// Scores the solution and writes fitness and violations back onto it.
    pub fn evaluate(&self, solution: &mut Solution) -> f64 {
        let (fitness, violations) = self.score(solution);
        solution.fitness = fitness;
        solution.violations = violations;
        fitness
    }
}

/// Evaluates a solution with the canonical evaluator.
pub fn calculate_fitness(solution: &mut Solution) -> f64 {
    FitnessEvaluator::default().evaluate(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::cargo::CargoItem;

    fn solution_with(items: Vec<CargoItem>, complete: bool, container: Container) -> Solution {
        Solution {
            order: (0..items.len()).collect(),
            items,
            complete,
            fitness: 0.0,
            violations: Violations::default(),
            container,
        }
    }

    fn placed(id: usize, diameter: f64, weight: f64, x: f64, y: f64) -> CargoItem {
        let mut item = CargoItem::new(id, diameter, weight);
        item.place_at(x, y);
        item
    }

    #[test]
    fn test_balanced_solution_scores_zero() {
        let container = Container::new(10.0, 10.0, 100.0);
        let mut solution = solution_with(
            vec![placed(0, 2.0, 10.0, 4.0, 5.0), placed(1, 2.0, 10.0, 6.0, 5.0)],
            true,
            container,
        );
        assert_eq!(calculate_fitness(&mut solution), 0.0);
        assert!(solution.violations.is_empty());
        assert!(solution.violations.to_map().is_empty());
        assert!(solution.is_perfect());
    }

    #[test]
    fn test_unplaced_short_circuits() {
        let container = Container::new(10.0, 10.0, 10.0);
        // Heavy and off-center, but one item is missing: only the unplaced term counts.
        let mut solution = solution_with(
            vec![placed(0, 2.0, 500.0, 1.0, 1.0), CargoItem::new(1, 2.0, 10.0)],
            false,
            container,
        );
        let fitness = calculate_fitness(&mut solution);
        assert_eq!(fitness, 1000.0);
        assert_eq!(solution.violations.unplaced_items, 1);
        assert_eq!(solution.violations.weight_penalty, 0.0);
        assert_eq!(solution.violations.com_position, None);
    }

    #[test]
    fn test_weight_excess() {
        let container = Container::new(10.0, 10.0, 100.0);
        let mut solution = solution_with(
            vec![placed(0, 2.0, 60.0, 4.0, 5.0), placed(1, 2.0, 60.0, 6.0, 5.0)],
            true,
            container,
        );
        let fitness = calculate_fitness(&mut solution);
        assert_relative_eq!(fitness, 200.0, epsilon = 1e-9);
        assert_relative_eq!(solution.violations.excess_weight_kg, 20.0, epsilon = 1e-9);
        assert_eq!(solution.violations.to_map()["weight_penalty"], solution.violations.weight_penalty);
    }

    #[test]
    fn test_corner_mass_com_penalty() {
        let container = Container::new(10.0, 10.0, 100.0);
        let mut solution = solution_with(vec![placed(0, 2.0, 10.0, 1.0, 1.0)], true, container);
        let fitness = calculate_fitness(&mut solution);
        // (2 - 1) on x plus (2 - 1) on y, times 100.
        assert_relative_eq!(fitness, 200.0, epsilon = 1e-9);
        assert_eq!(solution.violations.com_position, Some((1.0, 1.0)));
        let zone = solution.violations.safe_zone.unwrap();
        assert_eq!(zone.x_range, (2.0, 8.0));
        assert_eq!(zone.y_range, (2.0, 8.0));
    }

    #[test]
    fn test_com_on_zone_boundary_is_free() {
        let container = Container::new(10.0, 10.0, 100.0);
        let solution = solution_with(vec![placed(0, 2.0, 10.0, 2.0, 8.0)], true, container);
        assert_eq!(FitnessEvaluator::new().score(&solution).0, 0.0);
    }

    #[test]
    fn test_empty_instance_scores_zero() {
        let container = Container::new(10.0, 10.0, 100.0);
        let mut solution = solution_with(Vec::new(), true, container);
        assert_eq!(calculate_fitness(&mut solution), 0.0);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let container = Container::new(10.0, 10.0, 50.0);
        let mut solution = solution_with(
            vec![placed(0, 2.0, 40.0, 1.0, 9.0), placed(1, 2.0, 30.0, 3.0, 9.0)],
            true,
            container,
        );
        let first = calculate_fitness(&mut solution);
        let first_violations = solution.violations.clone();
        let second = calculate_fitness(&mut solution);
        assert_eq!(first, second);
        assert_eq!(first_violations, solution.violations);
    }

    #[test]
    fn test_circular_safe_zone() {
        let container = Container::new(10.0, 10.0, 100.0);
        let zone = SafeZone::circular();
        // Radius 0.6 * 10 / 2 = 3 around (5, 5).
        assert!(zone.contains((7.0, 5.0), &container));
        assert_relative_eq!(zone.distance_outside((10.0, 5.0), &container), 2.0, epsilon = 1e-12);
        // The rectangle tolerates corners the disc does not.
        assert!(SafeZone::default().contains((7.5, 7.5), &container));
        assert!(!zone.contains((7.5, 7.5), &container));

        let evaluator = FitnessEvaluator::new().with_safe_zone(zone);
        let solution = solution_with(vec![placed(0, 2.0, 10.0, 9.0, 5.0)], true, container);
        assert_relative_eq!(evaluator.score(&solution).0, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_weights() {
        let container = Container::new(10.0, 10.0, 100.0);
        let evaluator = FitnessEvaluator::new().with_weights(PenaltyWeights {
            unplaced: 1.0,
            weight_kg: 1.0,
            com_distance: 1.0,
        });
        let solution = solution_with(vec![placed(0, 2.0, 10.0, 1.0, 1.0)], true, container);
        assert_relative_eq!(evaluator.score(&solution).0, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_validate() {
        assert!(FitnessEvaluator::new().validate().is_ok());
        let bad = FitnessEvaluator::new().with_safe_zone(SafeZone::Rectangular { margin: 0.7 });
        assert!(bad.validate().is_err());
    }
}
