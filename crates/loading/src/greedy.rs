//! Largest-first greedy baseline.

use crate::cargo::CargoItem;
use crate::problem::LoadingProblem;
use crate::solution::Solution;
use cylpack_core::{PermutationProblem, SolveResult};
use std::time::Instant;

/// Orders item indices by descending diameter, then descending weight.
///
/// Items equal on both keys keep their input order.
pub fn greedy_order(items: &[CargoItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[b]
            .diameter
            .total_cmp(&items[a].diameter)
            .then(items[b].weight.total_cmp(&items[a].weight))
    });
    order
}

/// Places the greedy order once and evaluates it.
pub fn run_greedy(problem: &LoadingProblem) -> SolveResult<Solution> {
    let start = Instant::now();
    let solution = problem.evaluate_order(&greedy_order(problem.items()));

    log::info!(
        "Greedy placed {}/{} items, fitness {:.4}",
        solution.placed_count(),
        problem.num_items(),
        solution.fitness
    );

    SolveResult::new()
        .with_strategy("Greedy")
        .with_iterations(1)
        .with_best_fitness(solution.fitness)
        .with_fitness_history(vec![solution.fitness])
        .with_computation_time(start.elapsed().as_millis() as u64)
        .with_solution(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;

    #[test]
    fn test_greedy_order_sorts_by_diameter_then_weight() {
        let items = vec![
            CargoItem::new(0, 1.0, 50.0),
            CargoItem::new(1, 3.0, 10.0),
            CargoItem::new(2, 3.0, 20.0),
            CargoItem::new(3, 2.0, 5.0),
        ];
        assert_eq!(greedy_order(&items), vec![2, 1, 3, 0]);
    }

    #[test]
    fn test_greedy_order_is_stable_on_ties() {
        let items: Vec<CargoItem> = (0..4).map(|id| CargoItem::new(id, 2.0, 10.0)).collect();
        assert_eq!(greedy_order(&items), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_run_greedy() {
        let items: Vec<CargoItem> = (0..3).map(|id| CargoItem::new(id, 2.0, 10.0)).collect();
        let problem = LoadingProblem::new(items, Container::new(10.0, 10.0, 100.0));
        let result = run_greedy(&problem);

        let solution = result.solution.unwrap();
        assert!(solution.complete);
        assert_eq!(solution.order, vec![0, 1, 2]);
        assert_eq!(result.best_fitness, Some(solution.fitness));
    }
}
