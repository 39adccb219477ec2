//! Independent audit of placed solutions.
//!
//! Re-checks every hard constraint from the item positions alone, without
//! trusting the placer's bookkeeping.

use crate::fitness::SafeZone;
use crate::solution::Solution;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slack allowed before two circles count as overlapping.
pub const OVERLAP_TOLERANCE: f64 = 1e-3;

/// Constraint violations found in a solution.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerificationReport {
    /// Ids of items leaving the floor, once per offending axis.
    pub boundary_violations: Vec<usize>,
    /// Pairs of overlapping item ids.
    pub overlap_violations: Vec<(usize, usize)>,
    /// Total placed weight exceeds the container limit.
    pub weight_limit_violation: bool,
    /// Center of mass lies outside the central safe zone.
    pub weight_distribution_violation: bool,
}

impl VerificationReport {
    /// Returns true if no constraint is violated.
    pub fn is_valid(&self) -> bool {
        self.boundary_violations.is_empty()
            && self.overlap_violations.is_empty()
            && !self.weight_limit_violation
            && !self.weight_distribution_violation
    }

    /// Returns true if positions are geometrically sound (boundary and overlap).
    pub fn is_geometrically_valid(&self) -> bool {
        self.boundary_violations.is_empty() && self.overlap_violations.is_empty()
    }

    /// Violation count: one per geometric violation, ten per flag.
    pub fn score(&self) -> u32 {
        let mut score = (self.boundary_violations.len() + self.overlap_violations.len()) as u32;
        if self.weight_limit_violation {
            score += 10;
        }
        if self.weight_distribution_violation {
            score += 10;
        }
        score
    }
}

/// Audits the placed items of `solution` against its container.
pub fn verify_solution(solution: &Solution) -> VerificationReport {
    let container = &solution.container;
    let placed: Vec<_> = solution.placed_items().collect();
    let mut report = VerificationReport::default();

    for item in &placed {
        let r = item.radius();
        if item.x - r < 0.0 || item.x + r > container.width {
            report.boundary_violations.push(item.id);
        }
        if item.y - r < 0.0 || item.y + r > container.depth {
            report.boundary_violations.push(item.id);
        }
    }

    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            let min_dist = a.radius() + b.radius();
            if a.center_distance(b) < min_dist - OVERLAP_TOLERANCE {
                report.overlap_violations.push((a.id, b.id));
            }
        }
    }

    report.weight_limit_violation = solution.total_placed_weight() > container.max_weight;
    report.weight_distribution_violation = solution
        .center_of_mass()
        .is_some_and(|com| !SafeZone::default().contains(com, container));

    if !report.is_valid() {
        log::debug!(
            "Verification found {} boundary and {} overlap violations (weight: {}, balance: {})",
            report.boundary_violations.len(),
            report.overlap_violations.len(),
            report.weight_limit_violation,
            report.weight_distribution_violation
        );
    }
    report
}
