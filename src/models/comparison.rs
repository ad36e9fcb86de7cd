//! Output types of the comparison engine

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use super::{ToRecordBatch, rows_to_record_batch};
use crate::indicator::Unit;
use crate::table::Region;

/// Single-year reading for one region, with its display range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeReading {
    /// Region the reading belongs to
    pub region: Region,
    /// Indicator name
    pub indicator: String,
    /// Year of the reading (the indicator's latest year)
    pub year: i64,
    /// The region's observed value
    pub value: f64,
    /// Cross-region median for the same year
    pub median: f64,
    /// Start of the display axis
    pub display_min: f64,
    /// End of the display axis; never below `value`
    pub display_max: f64,
    /// Largest value any region reported that year
    pub column_max: f64,
}

impl GaugeReading {
    /// Colour bands as `(lower, upper)` pairs: below, around and above the median
    #[must_use]
    pub fn bands(&self) -> [(f64, f64); 3] {
        [
            (self.display_min, self.median * 0.95),
            (self.median * 0.95, self.median * 1.05),
            (self.median * 1.05, self.column_max * 1.2),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GaugeRow {
    region_code: String,
    region_name: String,
    indicator: String,
    year: i64,
    value: f64,
    median: f64,
    display_min: f64,
    display_max: f64,
}

impl ToRecordBatch for [GaugeReading] {
    fn to_record_batch(&self) -> Result<RecordBatch, serde_arrow::Error> {
        let rows: Vec<GaugeRow> = self
            .iter()
            .map(|g| GaugeRow {
                region_code: g.region.code.clone(),
                region_name: g.region.name.clone(),
                indicator: g.indicator.clone(),
                year: g.year,
                value: g.value,
                median: g.median,
                display_min: g.display_min,
                display_max: g.display_max,
            })
            .collect();
        rows_to_record_batch(&rows)
    }
}

/// One `(year, value)` point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Observation year
    pub year: i64,
    /// Observed (possibly display-scaled) value
    pub value: f64,
}

/// Year-ordered points of one region, nulls dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSeries {
    /// Region the points belong to
    pub region: Region,
    /// Points in ascending year order
    pub points: Vec<SeriesPoint>,
}

impl RegionSeries {
    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the region has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Years of the points
    #[must_use]
    pub fn years(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.year).collect()
    }

    /// Values of the points
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Region traces of one indicator plus an optional national reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Indicator name
    pub indicator: String,
    /// One trace per requested region, in request order
    pub regions: Vec<RegionSeries>,
    /// National reference trace, when the national table carries the indicator
    pub national: Option<RegionSeries>,
}

/// A flattened time-series point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    /// Region code
    pub region_code: String,
    /// Region name
    pub region_name: String,
    /// Observation year
    pub year: i64,
    /// Observed value
    pub value: f64,
    /// Whether the point belongs to the national reference trace
    pub reference: bool,
}

impl TimeSeries {
    /// Flatten into `(region, year, value)` rows, regions first, national last
    #[must_use]
    pub fn points(&self) -> Vec<TimeSeriesRow> {
        let regional = self.regions.iter().map(|series| (series, false));
        let national = self.national.iter().map(|series| (series, true));
        regional
            .chain(national)
            .flat_map(|(series, reference)| {
                series.points.iter().map(move |p| TimeSeriesRow {
                    region_code: series.region.code.clone(),
                    region_name: series.region.name.clone(),
                    year: p.year,
                    value: p.value,
                    reference,
                })
            })
            .collect()
    }
}

impl ToRecordBatch for TimeSeries {
    fn to_record_batch(&self) -> Result<RecordBatch, serde_arrow::Error> {
        rows_to_record_batch(&self.points())
    }
}

/// Direction-normalized percentile scores of one region
///
/// `indicators`, `years` and `scores` are parallel and follow registry
/// order. The sequence is open: the first element is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileVector {
    /// Region the profile describes
    pub region: Region,
    /// Indicator names that had a value for the region
    pub indicators: Vec<String>,
    /// Year each indicator was ranked at
    pub years: Vec<i64>,
    /// Scores in 0-100, higher is better
    pub scores: Vec<f64>,
}

impl ProfileVector {
    /// Number of ranked indicators
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no indicator could be ranked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of one indicator, if it was ranked
    #[must_use]
    pub fn score(&self, indicator: &str) -> Option<f64> {
        self.indicators
            .iter()
            .position(|name| name == indicator)
            .and_then(|pos| self.scores.get(pos).copied())
    }

    /// Names and scores with the first element appended, for closed polygons
    #[must_use]
    pub fn closed(&self) -> (Vec<String>, Vec<f64>) {
        let mut indicators = self.indicators.clone();
        let mut scores = self.scores.clone();
        if let (Some(name), Some(&score)) = (self.indicators.first(), self.scores.first()) {
            indicators.push(name.clone());
            scores.push(score);
        }
        (indicators, scores)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfileRow {
    region_code: String,
    region_name: String,
    indicator: String,
    year: i64,
    score: f64,
}

impl ToRecordBatch for ProfileVector {
    fn to_record_batch(&self) -> Result<RecordBatch, serde_arrow::Error> {
        let rows: Vec<ProfileRow> = self
            .indicators
            .iter()
            .zip(&self.years)
            .zip(&self.scores)
            .map(|((indicator, &year), &score)| ProfileRow {
                region_code: self.region.code.clone(),
                region_name: self.region.name.clone(),
                indicator: indicator.clone(),
                year,
                score,
            })
            .collect();
        rows_to_record_batch(&rows)
    }
}

/// Per-region year series of one indicator, scaled for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedSeries {
    /// Indicator name
    pub indicator: String,
    /// Indicator description
    pub label: String,
    /// Unit of the values after scaling
    pub unit: Unit,
    /// One series per requested region, in request order
    pub regions: Vec<RegionSeries>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PairedRow {
    indicator: String,
    region_code: String,
    region_name: String,
    year: i64,
    value: f64,
}

impl ToRecordBatch for PairedSeries {
    fn to_record_batch(&self) -> Result<RecordBatch, serde_arrow::Error> {
        let rows: Vec<PairedRow> = self
            .regions
            .iter()
            .flat_map(|series| {
                series.points.iter().map(|p| PairedRow {
                    indicator: self.indicator.clone(),
                    region_code: series.region.code.clone(),
                    region_name: series.region.name.clone(),
                    year: p.year,
                    value: p.value,
                })
            })
            .collect();
        rows_to_record_batch(&rows)
    }
}

/// Everything one dashboard view needs for a region pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// The compared regions, first then second
    pub regions: [Region; 2],
    /// Indicator shown on the gauges and the time series
    pub headline: String,
    /// Headline gauges, one per region
    pub gauges: Vec<GaugeReading>,
    /// Headline time series
    pub time_series: TimeSeries,
    /// Profiles, one per region
    pub profiles: Vec<ProfileVector>,
    /// Paired series for every other indicator
    pub carousel: Vec<PairedSeries>,
}
