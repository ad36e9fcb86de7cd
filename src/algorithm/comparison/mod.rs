//! Comparison engine
//!
//! Turns the flat observation tables into the artifacts the dashboard
//! charts consume: gauge readings, time series, percentile profiles and
//! paired year series. The engine only borrows immutable tables, so one
//! instance can serve any number of threads.

mod gauge;
mod profile;
mod report;
mod series;

use arrow::array::Float64Array;
use itertools::Itertools;

use crate::error::{CompareError, Result};
use crate::indicator::{IndicatorRegistry, IndicatorSpec};
use crate::table::{NationalTable, Region, RegionalTable};

/// Name used for the regional table in error messages
const REGIONAL_SOURCE: &str = "regional table";

/// Pure comparison operations over loaded tables
#[derive(Debug, Clone, Copy)]
pub struct ComparisonEngine<'a> {
    regional: &'a RegionalTable,
    national: Option<&'a NationalTable>,
    registry: &'a IndicatorRegistry,
}

impl<'a> ComparisonEngine<'a> {
    /// Create an engine over the given tables
    ///
    /// Fails with `DataUnavailable` when a configured indicator has no
    /// column in the regional table.
    pub fn new(
        regional: &'a RegionalTable,
        national: Option<&'a NationalTable>,
        registry: &'a IndicatorRegistry,
    ) -> Result<Self> {
        let missing = registry
            .names()
            .filter(|name| !regional.observations().has_indicator(name))
            .collect_vec();
        if !missing.is_empty() {
            return Err(CompareError::data_unavailable(
                REGIONAL_SOURCE,
                format!("Missing indicator columns: {}", missing.join(", ")),
            ));
        }

        if national.is_none() {
            log::debug!("No national table given, time series will carry no reference trace");
        }

        Ok(Self {
            regional,
            national,
            registry,
        })
    }

    /// The regional table
    #[must_use]
    pub const fn regional(&self) -> &'a RegionalTable {
        self.regional
    }

    /// The indicator registry
    #[must_use]
    pub const fn registry(&self) -> &'a IndicatorRegistry {
        self.registry
    }

    fn spec(&self, indicator: &str) -> Result<&'a IndicatorSpec> {
        self.registry.get(indicator)
    }

    fn region(&self, identifier: &str) -> Result<&'a Region> {
        self.regional.resolve(identifier)
    }

    fn values(&self, spec: &IndicatorSpec) -> Result<&'a Float64Array> {
        self.regional.observations().values(&spec.name).ok_or_else(|| {
            CompareError::data_unavailable(
                REGIONAL_SOURCE,
                format!("Missing indicator column: {}", spec.name),
            )
        })
    }
}
