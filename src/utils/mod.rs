//! Shared utilities: typed Arrow access, file IO and logging helpers

pub mod arrow;
pub mod io;
pub mod logging;

pub use io::{load_parquet_files_parallel, read_csv_as_strings, read_parquet, write_parquet};
