//! Instance files and instance sets.
//!
//! The JSON layout groups instances by category:
//!
//! ```json
//! {
//!   "basic_instances": [
//!     {
//!       "name": "basic_01_three_identical",
//!       "container": { "width": 10.0, "depth": 10.0, "max_weight": 100.0 },
//!       "cylinders": [ { "id": 1, "diameter": 2.0, "weight": 10.0 } ]
//!     }
//!   ],
//!   "challenging_instances": [],
//!   "impossible_instances": []
//! }
//! ```
//!
//! Every array is optional and unknown keys (such as a stored best attempt)
//! are ignored. Cylinder ids in files are labels only; loading re-indexes
//! them to `0..N` in file order.

use cylpack_loading::{validate_instance, CargoItem, Container};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading instances.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid instance: {0}")]
    Invalid(#[from] cylpack_core::Error),

    #[error("Instance not found: {0}")]
    NotFound(String),
}

/// Instance group, as named in the file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceCategory {
    /// Small instances with a known feasible loading.
    Basic,
    /// Tight packing or balance requirements.
    Challenging,
    /// Provably infeasible (weight, geometry or balance).
    Impossible,
}

impl InstanceCategory {
    /// Lowercase category name.
    pub fn name(&self) -> &'static str {
        match self {
            InstanceCategory::Basic => "basic",
            InstanceCategory::Challenging => "challenging",
            InstanceCategory::Impossible => "impossible",
        }
    }
}

impl fmt::Display for InstanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instance as stored in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawInstance {
    name: String,
    container: Container,
    cylinders: Vec<CargoItem>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct InstanceFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    basic_instances: Vec<RawInstance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    challenging_instances: Vec<RawInstance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    impossible_instances: Vec<RawInstance>,
}

/// A loading instance ready to solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Instance name.
    pub name: String,
    /// Group the instance came from.
    pub category: InstanceCategory,
    /// Container floor and weight limit.
    pub container: Container,
    /// Cargo items, ids `0..N`.
    pub items: Vec<CargoItem>,
}

impl Instance {
    /// Creates an instance from `(diameter, weight)` pairs.
    pub fn new(
        name: impl Into<String>,
        category: InstanceCategory,
        container: Container,
        cylinders: &[(f64, f64)],
    ) -> Self {
        Self {
            name: name.into(),
            category,
            container,
            items: cylinders
                .iter()
                .enumerate()
                .map(|(id, &(diameter, weight))| CargoItem::new(id, diameter, weight))
                .collect(),
        }
    }

    fn from_raw(raw: RawInstance, category: InstanceCategory) -> Self {
        let items = raw
            .cylinders
            .into_iter()
            .enumerate()
            .map(|(id, cylinder)| CargoItem::new(id, cylinder.diameter, cylinder.weight))
            .collect();
        Self {
            name: raw.name,
            category,
            container: raw.container,
            items,
        }
    }

    fn to_raw(&self) -> RawInstance {
        RawInstance {
            name: self.name.clone(),
            container: self.container,
            cylinders: self
                .items
                .iter()
                .map(|item| CargoItem::new(item.id + 1, item.diameter, item.weight))
                .collect(),
        }
    }

    /// Total weight of all items.
    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|item| item.weight).sum()
    }

    /// Checks the container and items.
    pub fn validate(&self) -> Result<(), DatasetError> {
        validate_instance(&self.items, &self.container)?;
        Ok(())
    }
}

/// An ordered collection of instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceSet {
    instances: Vec<Instance>,
}

impl InstanceSet {
    /// Creates a set from instances.
    pub fn new(instances: Vec<Instance>) -> Self {
        Self { instances }
    }

    /// Parses the JSON layout and validates every instance.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let file: InstanceFile = serde_json::from_str(json)?;

        let groups = [
            (file.basic_instances, InstanceCategory::Basic),
            (file.challenging_instances, InstanceCategory::Challenging),
            (file.impossible_instances, InstanceCategory::Impossible),
        ];
        let mut instances = Vec::new();
        for (raws, category) in groups {
            for raw in raws {
                let instance = Instance::from_raw(raw, category);
                instance.validate()?;
                instances.push(instance);
            }
        }

        log::debug!("Parsed {} instances", instances.len());
        Ok(Self { instances })
    }

    /// Reads and parses an instance file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let set = Self::from_json(&json)?;
        log::info!("Loaded {} instances from {}", set.len(), path.display());
        Ok(set)
    }

    /// Serializes the set in the JSON layout (ids written 1-based).
    pub fn to_json(&self) -> Result<String, DatasetError> {
        let mut file = InstanceFile::default();
        for instance in &self.instances {
            let group = match instance.category {
                InstanceCategory::Basic => &mut file.basic_instances,
                InstanceCategory::Challenging => &mut file.challenging_instances,
                InstanceCategory::Impossible => &mut file.impossible_instances,
            };
            group.push(instance.to_raw());
        }
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Writes the set to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Looks up an instance by name.
    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.instances.iter().find(|instance| instance.name == name)
    }

    /// Looks up an instance by name, failing if absent.
    pub fn require(&self, name: &str) -> Result<&Instance, DatasetError> {
        self.get(name)
            .ok_or_else(|| DatasetError::NotFound(name.to_string()))
    }

    /// Instances of one category.
    pub fn by_category(&self, category: InstanceCategory) -> impl Iterator<Item = &Instance> + '_ {
        self.instances
            .iter()
            .filter(move |instance| instance.category == category)
    }

    /// All instances, in order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Iterates over the instances.
    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<'a> IntoIterator for &'a InstanceSet {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
