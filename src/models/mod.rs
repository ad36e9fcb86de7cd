//! Comparison artifacts handed to renderers
//!
//! Every artifact is a plain serde struct. Renderers that prefer columnar
//! input can flatten any artifact into an Arrow [`RecordBatch`].

pub mod comparison;

pub use comparison::{
    ComparisonReport, GaugeReading, PairedSeries, ProfileVector, RegionSeries, SeriesPoint,
    TimeSeries,
};

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

/// Types that can be exported as a record batch
pub trait ToRecordBatch {
    /// Flatten into rows and convert to a record batch
    fn to_record_batch(&self) -> Result<RecordBatch, serde_arrow::Error>;
}

/// Convert flat rows into a record batch, tracing the schema from the type
pub(crate) fn rows_to_record_batch<T>(rows: &[T]) -> Result<RecordBatch, serde_arrow::Error>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())?;
    serde_arrow::to_record_batch(&fields, &rows)
}
