//! Shared utilities for loading and logging

pub mod arrow;
pub mod logging;

pub use self::arrow::{KEY_COLUMNS, normalize_batch};
pub use logging::{log_read_complete, log_read_start, log_regions_loaded, log_warning};
