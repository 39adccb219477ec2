//! Permutation encoding shared by all search strategies.
//!
//! Every strategy in cylpack searches over orders: permutations of the item
//! indices `0..n` that a constructive decoder turns into a placed solution.
//! [`PermutationProblem`] is the seam between the generic search frameworks
//! and a concrete decoder + objective; the free functions here are the
//! permutation-preserving operators used by GA, local search and ACO.

use rand::prelude::*;

/// A problem whose candidate solutions are produced by decoding an order.
///
/// Implementors own the decoder (order -> solution) and the objective.
/// Lower fitness is better; `0.0` is the optimum.
pub trait PermutationProblem: Send + Sync {
    /// Decoded and scored solution type.
    type Solution: Clone + Send;

    /// Number of items, i.e. the length of every order.
    fn num_items(&self) -> usize;

    /// Decodes and scores an order.
    fn evaluate_order(&self, order: &[usize]) -> Self::Solution;

    /// Returns the fitness of a decoded solution.
    fn fitness(&self, solution: &Self::Solution) -> f64;

    /// Returns the order a solution was decoded from.
    fn order<'a>(&self, solution: &'a Self::Solution) -> &'a [usize];

    /// Number of items a decoded solution places (0 if unknown).
    fn placed_count(&self, _solution: &Self::Solution) -> usize {
        0
    }
}

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// Returns true if `order` contains every value of `0..order.len()` exactly once.
pub fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &value in order {
        match seen.get_mut(value) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Picks two distinct positions in `0..n`. Requires `n >= 2`.
pub fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(n >= 2);
    let i = rng.gen_range(0..n);
    let mut j = rng.gen_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

/// Order crossover (OX).
///
/// Copies `parent1[p1..=p2]` into the child at the same positions for two
/// distinct random cut points `p1 < p2`, then fills the remaining positions
/// left to right with the values of `parent2` not in that slice, keeping
/// their relative order in `parent2`.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = parent1.len();
    if n < 2 || parent2.len() != n {
        return parent1.to_vec();
    }

    let (a, b) = distinct_pair(n, rng);
    let (p1, p2) = if a < b { (a, b) } else { (b, a) };
    order_crossover_at(parent1, parent2, p1, p2)
}

/// Order crossover with explicit cut points (`p1 <= p2 < len`).
pub fn order_crossover_at(parent1: &[usize], parent2: &[usize], p1: usize, p2: usize) -> Vec<usize> {
    let n = parent1.len();
    let mut in_slice = vec![false; n];
    for &value in &parent1[p1..=p2] {
        if let Some(flag) = in_slice.get_mut(value) {
            *flag = true;
        }
    }

    let mut donors = parent2
        .iter()
        .copied()
        .filter(|&v| !in_slice.get(v).copied().unwrap_or(false));

    (0..n)
        .map(|i| {
            if (p1..=p2).contains(&i) {
                parent1[i]
            } else {
                donors.next().unwrap_or(parent1[i])
            }
        })
        .collect()
}

/// Swaps the values at two distinct random positions. No-op below length 2.
pub fn swap_move<R: Rng>(order: &mut [usize], rng: &mut R) {
    if order.len() < 2 {
        return;
    }
    let (i, j) = distinct_pair(order.len(), rng);
    order.swap(i, j);
}

/// Removes the value at one random position and re-inserts it at another
/// distinct random position. No-op below length 2.
pub fn insertion_move<R: Rng>(order: &mut Vec<usize>, rng: &mut R) {
    if order.len() < 2 {
        return;
    }
    let (i, j) = distinct_pair(order.len(), rng);
    let value = order.remove(i);
    order.insert(j, value);
}
