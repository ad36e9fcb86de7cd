use arrow::compute::max;

use super::{ComparisonEngine, REGIONAL_SOURCE};
use crate::algorithm::statistics::{GaugeBounds, median};
use crate::error::{CompareError, Result};
use crate::models::GaugeReading;

impl ComparisonEngine<'_> {
    /// Read one region's value at the indicator's latest year and place it
    /// against the cross-region median
    ///
    /// Fails with `RegionNotFound` when the region is unknown or has no
    /// value in that year.
    pub fn gauge_value(&self, indicator: &str, region: &str) -> Result<GaugeReading> {
        let spec = self.spec(indicator)?;
        let region = self.region(region)?;
        let values = self.values(spec)?;
        let table = self.regional.observations();
        let year = spec.latest_year;

        let value = table
            .observations(values)
            .filter(|obs| obs.code == region.code && obs.year == year)
            .find_map(|obs| obs.value)
            .ok_or_else(|| CompareError::missing_observation(&region.name, &spec.name, year))?;

        let slice = table
            .year_slice(values, year)
            .map_err(|e| CompareError::from_arrow(REGIONAL_SOURCE, &e))?;
        let median = median(slice.iter().flatten())
            .ok_or_else(|| CompareError::missing_observation(&region.name, &spec.name, year))?;
        let column_max = max(&slice).unwrap_or(value);

        let bounds = GaugeBounds::around(median, value);
        log::debug!(
            "Gauge {} / {year}: {} = {value}, median {median}, range [{}, {}]",
            spec.name,
            region.code,
            bounds.lower,
            bounds.upper
        );

        Ok(GaugeReading {
            region: region.clone(),
            indicator: spec.name.clone(),
            year,
            value,
            median,
            display_min: bounds.lower,
            display_max: bounds.upper,
            column_max,
        })
    }
}
