//! Cargo item type.

use cylpack_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cylindrical cargo item seen from above: a circle with a weight.
///
/// `id`, `diameter` and `weight` are the immutable specification. `x`, `y`
/// and `placed` are placement state, written only by the placement engine
/// on its own copy of the item list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CargoItem {
    /// Item index, `0..N` within its instance.
    pub id: usize,
    /// Circle diameter.
    pub diameter: f64,
    /// Weight in kg.
    pub weight: f64,
    /// Center x (valid only if `placed`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: f64,
    /// Center y (valid only if `placed`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: f64,
    /// Whether the item received a position.
    #[cfg_attr(feature = "serde", serde(default))]
    pub placed: bool,
}

impl CargoItem {
    /// Creates an unplaced item.
    pub fn new(id: usize, diameter: f64, weight: f64) -> Self {
        Self {
            id,
            diameter,
            weight,
            x: 0.0,
            y: 0.0,
            placed: false,
        }
    }

    /// Circle radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Center position if placed.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.placed.then_some((self.x, self.y))
    }

    /// Marks the item as placed with its center at `(x, y)`.
    pub fn place_at(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.placed = true;
    }

    /// Clears placement state.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.placed = false;
    }

    /// Distance between the centers of two items.
    pub fn center_distance(&self, other: &CargoItem) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Returns true if `id`, `diameter` and `weight` match, ignoring placement.
    pub fn same_spec(&self, other: &CargoItem) -> bool {
        self.id == other.id && self.diameter == other.diameter && self.weight == other.weight
    }

    /// Checks that diameter and weight are finite and positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return Err(Error::InvalidItem(format!(
                "item {} has diameter {}, expected a finite positive value",
                self.id, self.diameter
            )));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(Error::InvalidItem(format!(
                "item {} has weight {}, expected a finite positive value",
                self.id, self.weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_item_is_unplaced() {
        let item = CargoItem::new(3, 2.5, 40.0);
        assert_eq!(item.radius(), 1.25);
        assert!(!item.placed);
        assert_eq!(item.position(), None);
    }

    #[test]
    fn test_place_and_reset() {
        let mut item = CargoItem::new(0, 2.0, 10.0);
        item.place_at(1.0, 4.0);
        assert_eq!(item.position(), Some((1.0, 4.0)));
        item.reset();
        assert_eq!(item.position(), None);
        assert!(item.same_spec(&CargoItem::new(0, 2.0, 10.0)));
    }

    #[test]
    fn test_center_distance() {
        let mut a = CargoItem::new(0, 2.0, 10.0);
        let mut b = CargoItem::new(1, 2.0, 10.0);
        a.place_at(1.0, 1.0);
        b.place_at(4.0, 5.0);
        assert_relative_eq!(a.center_distance(&b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(CargoItem::new(0, 2.0, 10.0).validate().is_ok());
        assert!(matches!(
            CargoItem::new(0, 0.0, 10.0).validate(),
            Err(Error::InvalidItem(_))
        ));
        assert!(CargoItem::new(0, 2.0, -1.0).validate().is_err());
        assert!(CargoItem::new(0, f64::NAN, 1.0).validate().is_err());
    }
}
