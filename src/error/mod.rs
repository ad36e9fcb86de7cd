//! Error handling for the comparison pipeline.
//!
//! Unknown entities (regions, indicators, sources) fail hard with a typed
//! error. Missing values for a known region are never errors: they are
//! dropped from aggregates by the engine.

use std::path::{Path, PathBuf};

use arrow_schema::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors raised while loading tables or building comparisons
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A source table is missing, unreadable or lacks its key columns
    #[error("Data unavailable ({}): {reason}", .path.display())]
    DataUnavailable {
        /// The source that could not be used
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// A requested region is absent from the table, or has no observation
    /// where one is required
    #[error("Region not found: {region}{}", .detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    RegionNotFound {
        /// The identifier that was requested
        region: String,
        /// Extra context, such as the indicator and year that were searched
        detail: Option<String>,
    },

    /// An indicator name is not present in the registry
    #[error("Indicator not configured: {0}")]
    IndicatorNotConfigured(String),
}

impl CompareError {
    /// Create a `DataUnavailable` error for a source path
    pub fn data_unavailable(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a `RegionNotFound` error without extra context
    pub fn region_not_found(region: impl Into<String>) -> Self {
        Self::RegionNotFound {
            region: region.into(),
            detail: None,
        }
    }

    /// Create a `RegionNotFound` error for a missing observation
    pub fn missing_observation(region: impl Into<String>, indicator: &str, year: i64) -> Self {
        Self::RegionNotFound {
            region: region.into(),
            detail: Some(format!("no {indicator} observation in {year}")),
        }
    }

    /// Whether the caller can recover by choosing a different region or
    /// indicator. `DataUnavailable` is fatal for the process.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::DataUnavailable { .. })
    }

    /// Wrap an Arrow error raised while reading `path`
    pub fn from_arrow(path: impl AsRef<Path>, error: &ArrowError) -> Self {
        Self::data_unavailable(path, format!("Arrow error: {error}"))
    }

    /// Wrap a Parquet error raised while reading `path`
    pub fn from_parquet(path: impl AsRef<Path>, error: &ParquetError) -> Self {
        Self::data_unavailable(path, format!("Parquet error: {error}"))
    }
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
