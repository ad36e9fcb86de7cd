//! A Rust library for comparing ITL3 regions across socioeconomic
//! indicators, built on Arrow tables.
//!
//! The pipeline runs one way: [`loader`] reads the observation tables,
//! [`ComparisonEngine`] turns them into chart-ready artifacts, and renderers
//! take over from the plain structs in [`models`].

pub mod algorithm;
pub mod config;
pub mod error;
pub mod indicator;
pub mod loader;
pub mod models;
pub mod selection;
pub mod table;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::ComparisonEngine;
pub use config::CompareConfig;
pub use error::{CompareError, Result};
pub use indicator::{IndicatorRegistry, IndicatorSpec, Polarity, Unit, default_registry};
pub use loader::{DataLoader, LoadedTables, load, load_async};
pub use models::{
    ComparisonReport, GaugeReading, PairedSeries, ProfileVector, RegionSeries, SeriesPoint,
    TimeSeries, ToRecordBatch,
};
pub use selection::RegionPair;
pub use table::{NationalTable, Region, RegionalTable};

// Arrow types
pub use arrow::record_batch::RecordBatch;
