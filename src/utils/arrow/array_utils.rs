//! Utilities for working with Arrow arrays.
//!
//! Loaded sources carry whatever types the CSV inference or the Parquet
//! writer chose. These helpers cast every column onto the layout the engine
//! expects: Utf8 keys, Int64 years and Float64 indicator values.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::kernels::cast::{CastOptions, cast_with_options};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow_schema::ArrowError;
use log::debug;

/// Region code column
pub const CODE_COLUMN: &str = "code";
/// Region display name column
pub const NAME_COLUMN: &str = "name";
/// Observation year column
pub const YEAR_COLUMN: &str = "year";

/// Key columns every observation table must carry
pub const KEY_COLUMNS: [&str; 3] = [CODE_COLUMN, NAME_COLUMN, YEAR_COLUMN];

/// Get a column from a record batch, cast to the expected type
///
/// Values that cannot be converted become null rather than failing the
/// whole column.
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller needs
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef, ArrowError> {
    let idx = batch.schema().index_of(column_name)?;
    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(Arc::clone(column));
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    let options = CastOptions {
        safe: true,
        ..Default::default()
    };
    cast_with_options(column, expected_type, &options)
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
) -> Result<&'a A, ArrowError> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        ArrowError::CastError(format!(
            "Column '{column_name}' has type {:?}, which does not match the expected array type",
            array.data_type()
        ))
    })
}

/// Cast a batch onto the observation layout
///
/// `code` and `name` become Utf8, `year` becomes Int64 and every other
/// column becomes Float64 with NaN replaced by null. Fails when a key column
/// is missing.
pub fn normalize_batch(batch: &RecordBatch) -> Result<RecordBatch, ArrowError> {
    let schema = batch.schema();
    for key in KEY_COLUMNS {
        if schema.index_of(key).is_err() {
            return Err(ArrowError::SchemaError(format!(
                "Required column '{key}' not found"
            )));
        }
    }

    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let name = field.name().as_str();
        let (target, nullable) = match name {
            CODE_COLUMN | NAME_COLUMN => (DataType::Utf8, true),
            YEAR_COLUMN => (DataType::Int64, true),
            _ => (DataType::Float64, true),
        };

        let mut column = get_column(batch, name, &target)?;
        if target == DataType::Float64 {
            column = null_out_nan(&column, name)?;
        }

        fields.push(Field::new(name, target, nullable));
        columns.push(column);
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

/// Replace NaN entries of a Float64 column with nulls
fn null_out_nan(column: &ArrayRef, column_name: &str) -> Result<ArrayRef, ArrowError> {
    let values = downcast_array::<Float64Array>(column, column_name)?;
    if !values.iter().flatten().any(f64::is_nan) {
        return Ok(Arc::clone(column));
    }
    let cleaned: Float64Array = values
        .iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect();
    Ok(Arc::new(cleaned))
}
