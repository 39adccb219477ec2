//! Error types for cylpack.
//!
//! Geometric infeasibility (an item that cannot be placed) is not an error:
//! it is reported through the solution's completeness flag and penalised by
//! the fitness function. Errors are reserved for inputs that make a run
//! meaningless and are raised before any search starts.

use thiserror::Error;

/// Errors raised while validating instances or configurations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A tunable is out of range or inconsistent with another tunable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cargo item has a non-positive or non-finite dimension or weight.
    #[error("invalid cargo item: {0}")]
    InvalidItem(String),

    /// The container has a non-positive or non-finite dimension or limit.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// The instance as a whole is unusable (empty, bad ids, bad order).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout cylpack.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns `Err(Error::InvalidConfig)` unless `value` lies in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
