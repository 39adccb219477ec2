//! Container type.

use cylpack_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rectangular container floor with a weight limit.
///
/// The origin is the back-left corner; x runs along `width`, y along `depth`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub depth: f64,
    /// Maximum total weight in kg.
    pub max_weight: f64,
}

impl Container {
    /// Creates a container.
    pub fn new(width: f64, depth: f64, max_weight: f64) -> Self {
        Self {
            width,
            depth,
            max_weight,
        }
    }

    /// Floor area.
    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    /// Geometric center of the floor.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.depth / 2.0)
    }

    /// Returns true if a circle of `radius` centered at `(x, y)` lies inside the floor.
    pub fn contains_circle(&self, x: f64, y: f64, radius: f64) -> bool {
        x - radius >= 0.0 && x + radius <= self.width && y - radius >= 0.0 && y + radius <= self.depth
    }

    /// Checks that every dimension is finite and positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("depth", self.depth),
            ("max_weight", self.max_weight),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidContainer(format!(
                    "{} is {}, expected a finite positive value",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_circle() {
        let container = Container::new(10.0, 8.0, 100.0);
        assert!(container.contains_circle(1.0, 1.0, 1.0));
        assert!(container.contains_circle(9.0, 7.0, 1.0));
        assert!(!container.contains_circle(0.5, 1.0, 1.0));
        assert!(!container.contains_circle(5.0, 7.5, 1.0));
    }

    #[test]
    fn test_center_and_area() {
        let container = Container::new(10.0, 8.0, 100.0);
        assert_eq!(container.center(), (5.0, 4.0));
        assert_eq!(container.area(), 80.0);
    }

    #[test]
    fn test_validate() {
        assert!(Container::new(10.0, 10.0, 100.0).validate().is_ok());
        assert!(matches!(
            Container::new(0.0, 10.0, 100.0).validate(),
            Err(Error::InvalidContainer(_))
        ));
        assert!(Container::new(10.0, 10.0, f64::INFINITY).validate().is_err());
    }
}
