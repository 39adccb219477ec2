//! Bottom-left grid placement.
//!
//! Items are placed one at a time in the given order. For each item the
//! scan walks a uniform grid of offsets from the back-left corner, x fastest
//! then y, and the item's center is put at `offset + radius` on both axes.
//! The first offset whose circle lies inside the container and touches no
//! placed circle wins. If an item finds no position, the solution is marked
//! incomplete and the remaining items are not attempted.

use crate::cargo::CargoItem;
use crate::container::Container;
use crate::fitness::Violations;
use crate::solution::Solution;

/// Grid spacing used by the search drivers.
pub const DEFAULT_GRID_STEP: f64 = 0.1;
/// Grid spacing used by the final refinement pass.
pub const FINE_GRID_STEP: f64 = 0.05;

/// Returns true if a circle of `radius` centered at `(x, y)` fits in the
/// container and does not overlap any placed item.
///
/// Overlap is exact: centers closer than the sum of radii fail, touching
/// circles are accepted. Unplaced entries of `items` are ignored.
pub fn is_valid_position(
    x: f64,
    y: f64,
    radius: f64,
    items: &[CargoItem],
    container: &Container,
) -> bool {
    if !container.contains_circle(x, y, radius) {
        return false;
    }

    items.iter().filter(|item| item.placed).all(|placed| {
        let distance = ((x - placed.x).powi(2) + (y - placed.y).powi(2)).sqrt();
        distance >= radius + placed.radius()
    })
}

/// Scans the grid for the first valid center of a circle of `radius`.
pub fn find_position(
    radius: f64,
    items: &[CargoItem],
    container: &Container,
    grid_step: f64,
) -> Option<(f64, f64)> {
    debug_assert!(grid_step > 0.0);
    let diameter = 2.0 * radius;
    if diameter > container.width || diameter > container.depth || grid_step <= 0.0 {
        return None;
    }

    // Offsets are computed from indices so long rows do not accumulate error.
    let mut iy: u64 = 0;
    loop {
        let y = iy as f64 * grid_step;
        let cy = y + radius;
        if y > container.depth || cy + radius > container.depth {
            return None;
        }

        let mut ix: u64 = 0;
        loop {
            let x = ix as f64 * grid_step;
            let cx = x + radius;
            if x > container.width || cx + radius > container.width {
                break;
            }
            if is_valid_position(cx, cy, radius, items, container) {
                return Some((cx, cy));
            }
            ix += 1;
        }

        iy += 1;
    }
}

/// Decodes `order` into a fresh, unevaluated [`Solution`].
///
/// `items` is copied and never modified; its placement state is ignored.
/// Order entries that do not index an item are skipped.
pub fn place_cargo(
    order: &[usize],
    items: &[CargoItem],
    container: &Container,
    grid_step: f64,
) -> Solution {
    let mut placed_items: Vec<CargoItem> = items.to_vec();
    for item in &mut placed_items {
        item.reset();
    }

    let mut complete = true;
    for &index in order {
        let Some(radius) = placed_items.get(index).map(CargoItem::radius) else {
            continue;
        };

        match find_position(radius, &placed_items, container, grid_step) {
            Some((x, y)) => placed_items[index].place_at(x, y),
            None => {
                complete = false;
                break;
            }
        }
    }

    Solution {
        order: order.to_vec(),
        items: placed_items,
        complete,
        fitness: 0.0,
        violations: Violations::default(),
        container: *container,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn items(specs: &[(f64, f64)]) -> Vec<CargoItem> {
        specs
            .iter()
            .enumerate()
            .map(|(id, &(d, w))| CargoItem::new(id, d, w))
            .collect()
    }

    #[test]
    fn test_first_item_goes_to_back_left_corner() {
        let container = Container::new(10.0, 10.0, 100.0);
        let solution = place_cargo(&[0], &items(&[(2.0, 10.0)]), &container, DEFAULT_GRID_STEP);
        assert!(solution.complete);
        assert_eq!(solution.items[0].position(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_row_fills_left_to_right() {
        let container = Container::new(10.0, 10.0, 100.0);
        let cargo = items(&[(2.0, 10.0), (2.0, 10.0), (2.0, 10.0)]);
        let solution = place_cargo(&[2, 0, 1], &cargo, &container, DEFAULT_GRID_STEP);

        assert!(solution.complete);
        let (x2, y2) = solution.items[2].position().unwrap();
        let (x0, y0) = solution.items[0].position().unwrap();
        let (x1, y1) = solution.items[1].position().unwrap();
        assert_relative_eq!(x2, 1.0, epsilon = 1e-9);
        assert_relative_eq!(y2, 1.0, epsilon = 1e-9);
        // Touching circles are accepted, so the next center is one diameter over.
        assert_relative_eq!(x0, 3.0, epsilon = 1e-9);
        assert_relative_eq!(y0, 1.0, epsilon = 1e-9);
        assert_relative_eq!(x1, 5.0, epsilon = 1e-9);
        assert_relative_eq!(y1, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_oversized_item_fails_fast() {
        let container = Container::new(10.0, 10.0, 100.0);
        let solution = place_cargo(&[0], &items(&[(12.0, 10.0)]), &container, DEFAULT_GRID_STEP);
        assert!(!solution.complete);
        assert_eq!(solution.placed_count(), 0);
    }

    #[test]
    fn test_failure_stops_remaining_items() {
        let container = Container::new(4.0, 4.0, 100.0);
        // Item 0 fills the floor; item 1 cannot fit; item 2 would fit but is never tried.
        let cargo = items(&[(4.0, 10.0), (3.0, 10.0), (0.5, 1.0)]);
        let solution = place_cargo(&[0, 1, 2], &cargo, &container, DEFAULT_GRID_STEP);

        assert!(!solution.complete);
        assert!(solution.items[0].placed);
        assert!(!solution.items[1].placed);
        assert!(!solution.items[2].placed);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let container = Container::new(10.0, 10.0, 100.0);
        let cargo = items(&[(2.0, 10.0), (3.0, 20.0)]);
        let before = cargo.clone();
        let solution = place_cargo(&[1, 0], &cargo, &container, DEFAULT_GRID_STEP);

        assert_eq!(cargo, before);
        for (original, placed) in cargo.iter().zip(&solution.items) {
            assert!(original.same_spec(placed));
        }
    }

    #[test]
    fn test_stale_placement_state_is_ignored() {
        let container = Container::new(10.0, 10.0, 100.0);
        let mut cargo = items(&[(2.0, 10.0)]);
        cargo[0].place_at(5.0, 5.0);
        let solution = place_cargo(&[0], &cargo, &container, DEFAULT_GRID_STEP);
        assert_eq!(solution.items[0].position(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_empty_order() {
        let container = Container::new(10.0, 10.0, 100.0);
        let solution = place_cargo(&[], &[], &container, DEFAULT_GRID_STEP);
        assert!(solution.complete);
        assert!(solution.items.is_empty());
    }

    #[test]
    fn test_is_valid_position() {
        let container = Container::new(10.0, 10.0, 100.0);
        let mut cargo = items(&[(2.0, 10.0), (2.0, 10.0)]);
        cargo[0].place_at(1.0, 1.0);

        assert!(is_valid_position(3.0, 1.0, 1.0, &cargo, &container));
        assert!(!is_valid_position(2.9, 1.0, 1.0, &cargo, &container));
        assert!(!is_valid_position(9.5, 5.0, 1.0, &cargo, &container));
        // Unplaced entries never block.
        assert!(is_valid_position(5.0, 5.0, 1.0, &cargo[1..], &container));
    }

    #[test]
    fn test_finer_grid_packs_tighter() {
        let container = Container::new(3.6, 10.0, 100.0);
        let cargo = items(&[(1.15, 1.0), (1.15, 1.0), (1.15, 1.0)]);
        let coarse = place_cargo(&[0, 1, 2], &cargo, &container, 0.5);
        let fine = place_cargo(&[0, 1, 2], &cargo, &container, FINE_GRID_STEP);

        // On a 0.5 grid the second item lands at offset 1.5, pushing the third off the first row.
        assert!(coarse.items[2].y > fine.items[2].y);
    }
}
