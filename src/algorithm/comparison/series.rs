use arrow::array::Float64Array;
use itertools::Itertools;

use super::ComparisonEngine;
use crate::error::Result;
use crate::indicator::IndicatorSpec;
use crate::models::{PairedSeries, RegionSeries, SeriesPoint, TimeSeries};
use crate::table::{ObservationTable, Region};

/// Non-null points of one region, ascending by year, values multiplied by `scale`
fn region_series(
    table: &ObservationTable,
    values: &Float64Array,
    region: &Region,
    scale: f64,
) -> RegionSeries {
    let points = table
        .observations(values)
        .filter(|obs| obs.code == region.code)
        .filter_map(|obs| {
            obs.value.map(|value| SeriesPoint {
                year: obs.year,
                value: value * scale,
            })
        })
        .sorted_by_key(|point| point.year)
        .collect();

    RegionSeries {
        region: region.clone(),
        points,
    }
}

impl ComparisonEngine<'_> {
    /// Raw year series of an indicator for each region, plus the national
    /// reference trace when the national table carries the indicator
    ///
    /// Nulls are dropped per series, so one region's gap never removes
    /// another region's point.
    pub fn time_series(&self, regions: &[&str], indicator: &str) -> Result<TimeSeries> {
        let spec = self.spec(indicator)?;
        let values = self.values(spec)?;
        let table = self.regional.observations();

        let regions = regions
            .iter()
            .map(|id| Ok(region_series(table, values, self.region(id)?, 1.0)))
            .collect::<Result<Vec<_>>>()?;

        let national = self.national.and_then(|national| {
            let table = national.observations();
            let values = table.values(&spec.name)?;
            let region = national.region()?;
            Some(region_series(table, values, &region, 1.0))
        });

        Ok(TimeSeries {
            indicator: spec.name.clone(),
            regions,
            national,
        })
    }

    /// Display-scaled year series of an indicator for each region
    ///
    /// Currency indicators keep their stored values; proportions are scaled
    /// to percentages.
    pub fn paired_series(&self, indicator: &str, regions: &[&str]) -> Result<PairedSeries> {
        let spec = self.spec(indicator)?;
        let regions = regions
            .iter()
            .map(|id| self.region(id))
            .collect::<Result<Vec<_>>>()?;
        self.paired_for(spec, &regions)
    }

    /// Paired series for every configured indicator except `headline`, in
    /// registry order
    pub fn carousel(&self, headline: &str, regions: &[&str]) -> Result<Vec<PairedSeries>> {
        let regions = regions
            .iter()
            .map(|id| self.region(id))
            .collect::<Result<Vec<_>>>()?;
        self.registry
            .iter()
            .filter(|spec| spec.name != headline)
            .map(|spec| self.paired_for(spec, &regions))
            .collect()
    }

    fn paired_for(&self, spec: &IndicatorSpec, regions: &[&Region]) -> Result<PairedSeries> {
        let values = self.values(spec)?;
        let table = self.regional.observations();
        let scale = spec.unit.display_scale();

        Ok(PairedSeries {
            indicator: spec.name.clone(),
            label: spec.label.clone(),
            unit: spec.unit,
            regions: regions
                .iter()
                .map(|region| region_series(table, values, region, scale))
                .collect(),
        })
    }
}
