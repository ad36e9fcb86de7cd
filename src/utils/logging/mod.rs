//! Logging utilities
//!
//! `log` lines emitted while reading observation sources.

pub mod log;

pub use self::log::{log_read_complete, log_read_start, log_regions_loaded, log_warning};
