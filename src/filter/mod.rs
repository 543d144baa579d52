//! Filtering of event record batches

pub mod core;
pub mod year;

pub use self::core::{BatchFilter, filter_record_batch};
pub use year::YearFilter;
