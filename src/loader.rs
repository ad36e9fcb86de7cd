//! Observation table loading
//!
//! Sources are flat CSV files (header row, inferred schema) or Parquet
//! files, chosen by extension. Any failure to produce a usable table is a
//! `DataUnavailable` error: there is no fallback source.

use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::CompareConfig;
use crate::error::util::safe_open_file;
use crate::error::{CompareError, Result};
use crate::table::{NationalTable, RegionalTable};
use crate::utils::logging::{log_read_complete, log_read_start, log_regions_loaded, log_warning};

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl SourceFormat {
    /// Detect the format from a file extension, defaulting to CSV
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") || ext.eq_ignore_ascii_case("pq") => {
                Self::Parquet
            }
            _ => Self::Csv,
        }
    }

    /// Display name of the format
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Parquet => "Parquet",
        }
    }
}

/// Read a source file into a single record batch
pub fn read_table(path: &Path, batch_size: usize) -> Result<RecordBatch> {
    let start = Instant::now();
    let format = SourceFormat::from_path(path);
    log_read_start(format.name(), path);

    let batch = match format {
        SourceFormat::Csv => read_csv(path, batch_size)?,
        SourceFormat::Parquet => read_parquet(path, batch_size)?,
    };

    log_read_complete(path, batch.num_rows(), batch.num_columns(), start.elapsed());
    Ok(batch)
}

fn read_csv(path: &Path, batch_size: usize) -> Result<RecordBatch> {
    let format = Format::default().with_header(true);
    let (schema, records) = format
        .infer_schema(safe_open_file(path, "inferring CSV schema")?, None)
        .map_err(|e| CompareError::from_arrow(path, &e))?;
    log::debug!(
        "Inferred {} columns from {} records in {}",
        schema.fields().len(),
        records,
        path.display()
    );

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_batch_size(batch_size)
        .build(safe_open_file(path, "reading CSV rows")?)
        .map_err(|e| CompareError::from_arrow(path, &e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CompareError::from_arrow(path, &e))?;

    concat_batches(&schema, &batches).map_err(|e| CompareError::from_arrow(path, &e))
}

fn read_parquet(path: &Path, batch_size: usize) -> Result<RecordBatch> {
    let file = safe_open_file(path, "reading parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| CompareError::from_parquet(path, &e))?;
    let schema = Arc::clone(builder.schema());

    let reader = builder
        .with_batch_size(batch_size)
        .build()
        .map_err(|e| CompareError::from_parquet(path, &e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CompareError::from_arrow(path, &e))?;

    concat_batches(&schema, &batches).map_err(|e| CompareError::from_arrow(path, &e))
}

/// Load the regional observations table
pub fn load_regional(path: &Path, batch_size: usize) -> Result<RegionalTable> {
    let batch = read_table(path, batch_size)?;
    let table = RegionalTable::try_new(&batch).map_err(|e| CompareError::from_arrow(path, &e))?;
    log_regions_loaded(path, table.regions().len(), table.observations().num_rows());
    Ok(table)
}

/// Load the national reference table
pub fn load_national(path: &Path, batch_size: usize) -> Result<NationalTable> {
    let batch = read_table(path, batch_size)?;
    let table = NationalTable::try_new(&batch).map_err(|e| CompareError::from_arrow(path, &e))?;
    if table.observations().num_rows() == 0 {
        log_warning("National reference table has no rows", Some(path));
    }
    Ok(table)
}

/// Both observation tables, immutable after loading
#[derive(Debug, Clone)]
pub struct LoadedTables {
    /// Observations for every region
    pub regional: RegionalTable,
    /// National reference observations
    pub national: NationalTable,
}

/// Load both tables named by the configuration
pub fn load(config: &CompareConfig) -> Result<LoadedTables> {
    Ok(LoadedTables {
        regional: load_regional(&config.regional_path, config.batch_size)?,
        national: load_national(&config.national_path, config.batch_size)?,
    })
}

/// Load both tables concurrently on the blocking thread pool
pub async fn load_async(config: &CompareConfig) -> Result<LoadedTables> {
    let (regional_path, regional_batch) = (config.regional_path.clone(), config.batch_size);
    let (national_path, national_batch) = (config.national_path.clone(), config.batch_size);

    let regional = tokio::task::spawn_blocking(move || load_regional(&regional_path, regional_batch));
    let national = tokio::task::spawn_blocking(move || load_national(&national_path, national_batch));

    let (regional, national) = tokio::try_join!(regional, national).map_err(|e| {
        CompareError::data_unavailable(&config.regional_path, format!("Loader task failed: {e}"))
    })?;

    Ok(LoadedTables {
        regional: regional?,
        national: national?,
    })
}

/// Loader that reads its sources once per process
///
/// The sources are static, so the first successful load is kept for the
/// lifetime of the loader. A failed load is not cached.
#[derive(Debug)]
pub struct DataLoader {
    config: CompareConfig,
    tables: OnceLock<Arc<LoadedTables>>,
}

impl DataLoader {
    /// Create a loader for the configured sources
    #[must_use]
    pub const fn new(config: CompareConfig) -> Self {
        Self {
            config,
            tables: OnceLock::new(),
        }
    }

    /// The loader configuration
    #[must_use]
    pub const fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Load the tables, or return the ones loaded earlier
    pub fn load(&self) -> Result<Arc<LoadedTables>> {
        if let Some(tables) = self.tables.get() {
            log::debug!("Using memoized observation tables");
            return Ok(Arc::clone(tables));
        }

        let loaded = Arc::new(load(&self.config)?);
        // Another thread may have finished first; keep whichever landed.
        Ok(Arc::clone(self.tables.get_or_init(|| loaded)))
    }

    /// Whether the tables have been loaded already
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.tables.get().is_some()
    }
}
