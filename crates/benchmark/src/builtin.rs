//! Built-in reference instances.
//!
//! Three basic, four challenging and five impossible instances, so the CLI
//! runs without an instance file.

use crate::dataset::{Instance, InstanceCategory, InstanceSet};
use cylpack_loading::Container;

fn basic(name: &str, container: Container, cylinders: &[(f64, f64)]) -> Instance {
    Instance::new(name, InstanceCategory::Basic, container, cylinders)
}

fn challenging(name: &str, container: Container, cylinders: &[(f64, f64)]) -> Instance {
    Instance::new(name, InstanceCategory::Challenging, container, cylinders)
}

fn impossible(name: &str, container: Container, cylinders: &[(f64, f64)]) -> Instance {
    Instance::new(name, InstanceCategory::Impossible, container, cylinders)
}

/// Instances with a known feasible loading.
pub fn basic_instances() -> Vec<Instance> {
    vec![
        basic(
            "basic_01_three_identical",
            Container::new(10.0, 10.0, 100.0),
            &[(2.0, 10.0), (2.0, 10.0), (2.0, 10.0)],
        ),
        basic(
            "basic_02_two_sizes",
            Container::new(12.0, 10.0, 150.0),
            &[(3.0, 20.0), (3.0, 20.0), (2.0, 15.0), (2.0, 15.0)],
        ),
        basic(
            "basic_03_varied_sizes",
            Container::new(15.0, 12.0, 200.0),
            &[(3.5, 25.0), (3.0, 20.0), (2.5, 18.0), (2.5, 18.0), (2.0, 15.0)],
        ),
    ]
}

/// Tight packing and balance instances.
pub fn challenging_instances() -> Vec<Instance> {
    vec![
        challenging(
            "challenge_01_tight_packing",
            Container::new(15.0, 15.0, 300.0),
            &[
                (4.0, 35.0),
                (3.5, 30.0),
                (3.5, 30.0),
                (3.0, 25.0),
                (3.0, 25.0),
                (2.5, 20.0),
                (2.5, 20.0),
                (2.0, 15.0),
            ],
        ),
        challenging(
            "challenge_02_weight_balance",
            Container::new(18.0, 14.0, 400.0),
            &[
                (3.0, 80.0),
                (3.0, 80.0),
                (2.5, 10.0),
                (2.5, 10.0),
                (2.5, 10.0),
                (2.5, 10.0),
                (3.5, 60.0),
                (3.5, 60.0),
            ],
        ),
        challenging(
            "challenge_03_many_small",
            Container::new(20.0, 15.0, 350.0),
            &[(2.0, 15.0); 12],
        ),
        challenging(
            "challenge_04_mixed_constraints",
            Container::new(20.0, 20.0, 500.0),
            &[
                (5.0, 50.0),
                (4.5, 45.0),
                (4.0, 40.0),
                (3.5, 35.0),
                (3.5, 35.0),
                (3.0, 30.0),
                (3.0, 30.0),
                (2.5, 25.0),
                (2.5, 25.0),
                (2.0, 20.0),
            ],
        ),
    ]
}

/// Instances no loading can satisfy.
pub fn impossible_instances() -> Vec<Instance> {
    vec![
        // 170 kg against a 150 kg limit.
        impossible(
            "impossible_01_weight_limit",
            Container::new(15.0, 15.0, 150.0),
            &[(3.0, 60.0), (3.0, 60.0), (2.5, 50.0)],
        ),
        // Three 6 m circles on a 10 m square floor.
        impossible(
            "impossible_02_geometric_constraint",
            Container::new(10.0, 10.0, 500.0),
            &[(6.0, 30.0), (6.0, 30.0), (6.0, 30.0)],
        ),
        // One heavy item dominates the center of mass.
        impossible(
            "impossible_03_weight_distribution",
            Container::new(20.0, 10.0, 500.0),
            &[(3.0, 200.0), (2.0, 5.0), (2.0, 5.0), (2.0, 5.0)],
        ),
        impossible(
            "impossible_04_combined_constraints",
            Container::new(12.0, 12.0, 200.0),
            &[(5.0, 70.0), (5.0, 70.0), (4.0, 50.0), (4.0, 10.0)],
        ),
        impossible(
            "impossible_05_packing_density",
            Container::new(10.0, 8.0, 300.0),
            &[
                (4.0, 25.0),
                (4.0, 25.0),
                (4.0, 25.0),
                (3.5, 20.0),
                (3.5, 20.0),
                (3.0, 15.0),
            ],
        ),
    ]
}

/// All built-in instances: basic, then challenging, then impossible.
pub fn builtin_instances() -> InstanceSet {
    let mut instances = basic_instances();
    instances.extend(challenging_instances());
    instances.extend(impossible_instances());
    InstanceSet::new(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_counts() {
        let set = builtin_instances();
        assert_eq!(set.by_category(InstanceCategory::Basic).count(), 3);
        assert_eq!(set.by_category(InstanceCategory::Challenging).count(), 4);
        assert_eq!(set.by_category(InstanceCategory::Impossible).count(), 5);
    }

    #[test]
    fn test_builtin_instances_are_valid() {
        for instance in &builtin_instances() {
            assert!(instance.validate().is_ok(), "{} is invalid", instance.name);
        }
    }

    #[test]
    fn test_weight_limit_instance_is_overweight() {
        let set = builtin_instances();
        let instance = set.get("impossible_01_weight_limit").unwrap();
        assert!(instance.total_weight() > instance.container.max_weight);
    }
}
