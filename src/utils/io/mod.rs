//! IO utilities for Parquet datasets and CSV exports

pub mod csv;
pub mod parquet;

pub use csv::read_csv_as_strings;
pub use parquet::{find_parquet_files, load_parquet_files_parallel, read_parquet, write_parquet};
