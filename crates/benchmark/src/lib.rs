//! Benchmark Suite for cylpack
//!
//! This crate provides:
//! - JSON instance files (basic, challenging and impossible groups)
//! - Built-in reference instances
//! - Benchmark runner over all loading strategies
//! - Result recording (JSON, CSV) and summary tables

mod builtin;
mod dataset;
mod result;
mod runner;

pub use builtin::{basic_instances, builtin_instances, challenging_instances, impossible_instances};
pub use dataset::{DatasetError, Instance, InstanceCategory, InstanceSet};
pub use result::{BenchmarkMetadata, BenchmarkResult, PlacementInfo, RunResult, StrategySummary};
pub use runner::{BenchmarkConfig, BenchmarkRunner};
