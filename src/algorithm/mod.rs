//! Comparison algorithms
//!
//! - `statistics`: median, percentile rank and gauge range construction
//! - `comparison`: the engine that builds chart-ready artifacts for a region pair

pub mod comparison;
pub mod statistics;

pub use comparison::ComparisonEngine;
pub use statistics::{GaugeBounds, median, percentile_rank};
