//! Fine-grid refinement of a known order.

use crate::problem::LoadingProblem;
use crate::solution::Solution;

/// Re-places `solution.order` at `fine_step` and re-evaluates it.
///
/// Returns the refined solution unless it scores worse than the input, in
/// which case the input is returned unchanged. Earlier items may settle at
/// different positions on the finer grid, so later items can fare worse.
///
/// This is not the plain "always take the fine-grid layout" rule: a
/// refinement that loses fitness is rejected and logged at `warn` level.
pub fn refine_solution(problem: &LoadingProblem, solution: &Solution, fine_step: f64) -> Solution {
    let refined = problem.evaluate_order_at(&solution.order, fine_step);
    if refined.fitness <= solution.fitness {
        log::debug!(
            "grid refinement at step {}: fitness {:.4} -> {:.4}",
            fine_step,
            solution.fitness,
            refined.fitness
        );
        refined
    } else {
        log::warn!(
            "grid refinement at step {} would worsen fitness ({:.4} -> {:.4}), keeping original",
            fine_step,
            solution.fitness,
            refined.fitness
        );
        solution.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::CargoItem;
    use crate::container::Container;
    use crate::placement::FINE_GRID_STEP;
    use cylpack_core::PermutationProblem;

    #[test]
    fn test_refinement_never_worsens() {
        let container = Container::new(6.0, 6.0, 1000.0);
        let items: Vec<CargoItem> = (0..5).map(|id| CargoItem::new(id, 1.7, 20.0)).collect();
        let problem = LoadingProblem::new(items, container).with_grid_step(0.3);

        for order in [[0, 1, 2, 3, 4], [4, 3, 2, 1, 0], [2, 0, 4, 1, 3]] {
            let coarse = problem.evaluate_order(&order);
            let refined = refine_solution(&problem, &coarse, FINE_GRID_STEP);
            assert!(refined.fitness <= coarse.fitness);
            assert_eq!(refined.order, coarse.order);
        }
    }

    #[test]
    fn test_worse_refinement_is_rejected() {
        let container = Container::new(10.0, 10.0, 100.0);
        let items = vec![CargoItem::new(0, 3.0, 20.0), CargoItem::new(1, 2.0, 10.0)];
        let problem = LoadingProblem::new(items, container);

        // No layout scores below zero, so the fine-grid result must lose.
        let mut unbeatable = problem.evaluate_order(&[0, 1]);
        unbeatable.fitness = -1.0;
        let kept = refine_solution(&problem, &unbeatable, FINE_GRID_STEP);
        assert_eq!(kept.fitness, -1.0);
        assert_eq!(kept.items, unbeatable.items);
    }

    #[test]
    fn test_refinement_keeps_specs() {
        let container = Container::new(10.0, 10.0, 100.0);
        let items = vec![CargoItem::new(0, 3.0, 20.0), CargoItem::new(1, 2.0, 10.0)];
        let problem = LoadingProblem::new(items.clone(), container);
        let refined = refine_solution(&problem, &problem.evaluate_order(&[1, 0]), FINE_GRID_STEP);
        for (original, placed) in items.iter().zip(&refined.items) {
            assert!(original.same_spec(placed));
        }
    }
}
