//! In-memory observation tables
//!
//! Both sources share one layout: `code`, `name` and `year` key columns
//! followed by one nullable Float64 column per indicator. Tables are
//! immutable once built and cheap to clone (Arrow buffers are shared).

use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::filter;
use arrow::compute::kernels::cmp::eq;
use arrow::record_batch::RecordBatch;
use arrow_schema::ArrowError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};
use crate::utils::arrow::{
    CODE_COLUMN, KEY_COLUMNS, NAME_COLUMN, YEAR_COLUMN, downcast_array, normalize_batch,
};

fn key_column<A: Array + Clone + 'static>(
    batch: &RecordBatch,
    name: &str,
) -> std::result::Result<A, ArrowError> {
    let idx = batch.schema().index_of(name)?;
    Ok(downcast_array::<A>(batch.column(idx), name)?.clone())
}

/// A region as identified in the tables
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Statistical region code, e.g. `TLC31`
    pub code: String,
    /// Display name
    pub name: String,
}

/// One row of an observation table, restricted to a single indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    /// Region code
    pub code: &'a str,
    /// Region name
    pub name: &'a str,
    /// Observation year
    pub year: i64,
    /// Indicator value; `None` when not observed
    pub value: Option<f64>,
}

/// Normalized observation rows with typed key columns
#[derive(Debug, Clone)]
pub struct ObservationTable {
    batch: RecordBatch,
    codes: StringArray,
    names: StringArray,
    years: Int64Array,
}

impl ObservationTable {
    /// Wrap a record batch, normalizing its column types first
    pub fn try_new(batch: &RecordBatch) -> std::result::Result<Self, ArrowError> {
        let batch = normalize_batch(batch)?;
        let codes = key_column::<StringArray>(&batch, CODE_COLUMN)?;
        let names = key_column::<StringArray>(&batch, NAME_COLUMN)?;
        let years = key_column::<Int64Array>(&batch, YEAR_COLUMN)?;
        Ok(Self {
            batch,
            codes,
            names,
            years,
        })
    }

    /// The normalized record batch
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Names of the indicator (non-key) columns, in table order
    #[must_use]
    pub fn indicator_columns(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .filter(|name| !KEY_COLUMNS.contains(&name.as_str()))
            .collect()
    }

    /// Whether the table has a column for the indicator
    #[must_use]
    pub fn has_indicator(&self, indicator: &str) -> bool {
        !KEY_COLUMNS.contains(&indicator) && self.batch.column_by_name(indicator).is_some()
    }

    /// The value column of an indicator
    #[must_use]
    pub fn values(&self, indicator: &str) -> Option<&Float64Array> {
        if KEY_COLUMNS.contains(&indicator) {
            return None;
        }
        self.batch
            .column_by_name(indicator)
            .and_then(|column| column.as_any().downcast_ref::<Float64Array>())
    }

    /// Iterate rows for one indicator, skipping rows without a code or year
    pub fn observations<'a>(
        &'a self,
        values: &'a Float64Array,
    ) -> impl Iterator<Item = Observation<'a>> + 'a {
        (0..self.num_rows()).filter_map(move |row| {
            if self.codes.is_null(row) || self.years.is_null(row) {
                return None;
            }
            Some(Observation {
                code: self.codes.value(row),
                name: self.name_at(row),
                year: self.years.value(row),
                value: (!values.is_null(row)).then(|| values.value(row)),
            })
        })
    }

    fn region_at(&self, row: usize) -> Option<Region> {
        if self.codes.is_null(row) {
            return None;
        }
        Some(Region {
            code: self.codes.value(row).to_string(),
            name: self.name_at(row).to_string(),
        })
    }

    fn name_at(&self, row: usize) -> &str {
        if self.names.is_null(row) {
            ""
        } else {
            self.names.value(row)
        }
    }

    /// Boolean mask selecting the rows of one year
    pub fn year_mask(&self, year: i64) -> std::result::Result<BooleanArray, ArrowError> {
        eq(&self.years, &Int64Array::new_scalar(year))
    }

    /// All values of an indicator in one year, across regions
    pub fn year_slice(
        &self,
        values: &Float64Array,
        year: i64,
    ) -> std::result::Result<Float64Array, ArrowError> {
        let mask = self.year_mask(year)?;
        let filtered = filter(values, &mask)?;
        Ok(downcast_array::<Float64Array>(&filtered, "year slice")?.clone())
    }
}

/// Observations for every sub-region
#[derive(Debug, Clone)]
pub struct RegionalTable {
    table: ObservationTable,
    regions: Vec<Region>,
}

impl RegionalTable {
    /// Build from a record batch holding all regions
    pub fn try_new(batch: &RecordBatch) -> std::result::Result<Self, ArrowError> {
        let table = ObservationTable::try_new(batch)?;

        let regions = (0..table.num_rows())
            .filter_map(|row| table.region_at(row))
            .unique_by(|region| region.code.clone())
            .sorted_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)))
            .collect();

        Ok(Self { table, regions })
    }

    /// The underlying observations
    #[must_use]
    pub const fn observations(&self) -> &ObservationTable {
        &self.table
    }

    /// Distinct regions ordered by name
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Resolve an identifier to a region
    ///
    /// The identifier matches a region code case-insensitively, or else a
    /// region name exactly.
    pub fn resolve(&self, identifier: &str) -> Result<&Region> {
        let wanted = identifier.trim();
        self.regions
            .iter()
            .find(|region| region.code.eq_ignore_ascii_case(wanted))
            .or_else(|| self.regions.iter().find(|region| region.name == wanted))
            .ok_or_else(|| CompareError::region_not_found(identifier))
    }
}

/// National reference observations
#[derive(Debug, Clone)]
pub struct NationalTable {
    table: ObservationTable,
}

impl NationalTable {
    /// Build from a record batch of national rows
    pub fn try_new(batch: &RecordBatch) -> std::result::Result<Self, ArrowError> {
        Ok(Self {
            table: ObservationTable::try_new(batch)?,
        })
    }

    /// The underlying observations
    #[must_use]
    pub const fn observations(&self) -> &ObservationTable {
        &self.table
    }

    /// The national reference region, taken from the first row
    #[must_use]
    pub fn region(&self) -> Option<Region> {
        (0..self.table.num_rows()).find_map(|row| self.table.region_at(row))
    }
}
