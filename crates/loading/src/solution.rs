//! Placed solution type.

use crate::cargo::CargoItem;
use crate::container::Container;
use crate::fitness::Violations;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An order decoded into placements, with its score.
///
/// Produced fresh by every placement call. `complete == false` means some
/// item in `order` found no position; items after the first failure are
/// left unplaced.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// Placement order (a permutation of item ids).
    pub order: Vec<usize>,
    /// Private copy of the items with their placement state, indexed by id.
    pub items: Vec<CargoItem>,
    /// Whether every item in `order` was placed.
    pub complete: bool,
    /// Penalty score (lower is better, 0 is feasible). 0 until evaluated.
    pub fitness: f64,
    /// Penalty breakdown. Empty until evaluated.
    pub violations: Violations,
    /// Container the items were placed into.
    pub container: Container,
}

impl Solution {
    /// Items that received a position.
    pub fn placed_items(&self) -> impl Iterator<Item = &CargoItem> + '_ {
        self.items.iter().filter(|item| item.placed)
    }

    /// Number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placed_items().count()
    }

    /// Number of unplaced items.
    pub fn unplaced_count(&self) -> usize {
        self.items.len() - self.placed_count()
    }

    /// Ids of unplaced items.
    pub fn unplaced_ids(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter(|item| !item.placed)
            .map(|item| item.id)
            .collect()
    }

    /// Total weight of the placed items.
    pub fn total_placed_weight(&self) -> f64 {
        self.placed_items().map(|item| item.weight).sum()
    }

    /// Weighted centroid of the placed items, or `None` if nothing is placed.
    pub fn center_of_mass(&self) -> Option<(f64, f64)> {
        let (mut total, mut wx, mut wy) = (0.0, 0.0, 0.0);
        for item in self.placed_items() {
            total += item.weight;
            wx += item.x * item.weight;
            wy += item.y * item.weight;
        }
        (total > 0.0).then(|| (wx / total, wy / total))
    }

    /// Fraction of items placed (1.0 for an empty instance).
    pub fn placement_rate(&self) -> f64 {
        if self.items.is_empty() {
            1.0
        } else {
            self.placed_count() as f64 / self.items.len() as f64
        }
    }

    /// Returns true if the solution is complete and has no penalty.
    pub fn is_perfect(&self) -> bool {
        self.complete && self.fitness == 0.0
    }

    /// Per-item `(id, x, y, placed)` rows, in id order.
    pub fn placements(&self) -> Vec<(usize, f64, f64, bool)> {
        self.items
            .iter()
            .map(|item| (item.id, item.x, item.y, item.placed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_item_solution() -> Solution {
        let mut a = CargoItem::new(0, 2.0, 30.0);
        let b = CargoItem::new(1, 2.0, 10.0);
        a.place_at(2.0, 4.0);
        Solution {
            order: vec![0, 1],
            items: vec![a, b],
            complete: false,
            fitness: 0.0,
            violations: Violations::default(),
            container: Container::new(10.0, 10.0, 100.0),
        }
    }

    #[test]
    fn test_counts() {
        let solution = two_item_solution();
        assert_eq!(solution.placed_count(), 1);
        assert_eq!(solution.unplaced_count(), 1);
        assert_eq!(solution.unplaced_ids(), vec![1]);
        assert_eq!(solution.total_placed_weight(), 30.0);
        assert_eq!(solution.placement_rate(), 0.5);
        assert!(!solution.is_perfect());
    }

    #[test]
    fn test_center_of_mass_ignores_unplaced() {
        let mut solution = two_item_solution();
        assert_eq!(solution.center_of_mass(), Some((2.0, 4.0)));

        solution.items[1].place_at(6.0, 8.0);
        let (cx, cy) = solution.center_of_mass().unwrap();
        assert_relative_eq!(cx, 3.0, epsilon = 1e-12);
        assert_relative_eq!(cy, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_center_of_mass_of_nothing() {
        let mut solution = two_item_solution();
        solution.items[0].reset();
        assert_eq!(solution.center_of_mass(), None);
    }
}
