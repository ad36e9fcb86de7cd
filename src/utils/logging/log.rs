//! Log lines for reading observation sources
//!
//! Every source read produces one start line and one summary line at
//! `info!`, so a run's log shows what was read and how large it was.

use std::path::Path;
use std::time::Duration;

/// Log the start of a source read
///
/// # Arguments
/// * `format` - Source format name, e.g. `CSV` or `Parquet`
/// * `path` - Path of the source being read
pub fn log_read_start(format: &str, path: &Path) {
    log::info!("Reading {format} observations from {}", path.display());
}

/// Log the shape of a source once it is read
pub fn log_read_complete(path: &Path, rows: usize, columns: usize, elapsed: Duration) {
    log::info!("{}", read_summary(path, rows, columns, elapsed));
}

/// Log the regions found in a loaded regional table
pub fn log_regions_loaded(path: &Path, regions: usize, rows: usize) {
    log::info!("{}", regions_summary(path, regions, rows));
}

/// Log a warning, optionally tied to a source path
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{message}: {}", path.display());
    } else {
        log::warn!("{message}");
    }
}

fn read_summary(path: &Path, rows: usize, columns: usize, elapsed: Duration) -> String {
    // Key columns are not indicators
    let indicators = columns.saturating_sub(3);
    format!(
        "Read {rows} rows with {indicators} indicator columns from {} in {elapsed:?}",
        path.display()
    )
}

fn regions_summary(path: &Path, regions: usize, rows: usize) -> String {
    if regions == 0 {
        return format!("No regions found in {}", path.display());
    }
    format!(
        "Loaded {regions} regions ({:.1} rows per region) from {}",
        rows as f64 / regions as f64,
        path.display()
    )
}
