//! Indicator metadata
//!
//! Every indicator is a flat [`IndicatorSpec`] record. Differences between
//! indicators (units, direction of "better") are carried as data so the
//! engine never special-cases an indicator by name.

pub mod registry;

pub use registry::{IndicatorRegistry, default_registry};

use serde::{Deserialize, Serialize};

/// Whether a higher raw value is better or worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Higher is better
    Normal,
    /// Lower is better (e.g. low-skill share, inactivity due to ill health)
    Inverted,
}

impl Polarity {
    /// Orient a 0-100 percentile so that a larger score is always better
    #[must_use]
    pub fn orient(self, percentile: f64) -> f64 {
        match self {
            Self::Normal => percentile,
            Self::Inverted => 100.0 - percentile,
        }
    }
}

/// How stored values are denominated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Currency amounts, displayed as stored
    Currency,
    /// Fractional proportions, displayed as percentages
    Percentage,
}

impl Unit {
    /// Factor applied to stored values for display
    #[must_use]
    pub const fn display_scale(self) -> f64 {
        match self {
            Self::Currency => 1.0,
            Self::Percentage => 100.0,
        }
    }
}

/// Immutable metadata for one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Column name in the observation tables
    pub name: String,
    /// Human readable description
    pub label: String,
    /// Unit of the stored values
    pub unit: Unit,
    /// Most recent year with data, used by the gauges
    pub latest_year: i64,
    /// Year the profile ranking anchors to
    pub baseline_year: i64,
    /// Source citation (HTML anchor)
    pub source: String,
    /// Direction of "better"
    pub polarity: Polarity,
}

impl IndicatorSpec {
    /// Create a spec with normal polarity and percentage units
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        latest_year: i64,
        baseline_year: i64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            unit: Unit::Percentage,
            latest_year,
            baseline_year,
            source: source.into(),
            polarity: Polarity::Normal,
        }
    }

    /// Set the unit
    #[must_use]
    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the polarity
    #[must_use]
    pub const fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }
}
