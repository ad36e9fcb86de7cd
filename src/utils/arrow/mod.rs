//! Arrow data handling utilities
//!
//! Helpers for bringing loaded record batches onto the fixed column layout
//! the comparison engine reads.

pub mod array_utils;

pub use array_utils::{
    CODE_COLUMN, KEY_COLUMNS, NAME_COLUMN, YEAR_COLUMN, downcast_array, get_column,
    normalize_batch,
};
