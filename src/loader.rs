//! Loading and storing event datasets as Parquet

use std::path::Path;

use crate::config::TrendsConfig;
use crate::error::Result;
use crate::models::EventDataset;
use crate::schema::event_schema;
use crate::utils::io::{load_parquet_files_parallel, read_parquet, write_parquet};
use crate::utils::logging::{create_spinner, finish_progress_bar};

/// Read an event dataset from a Parquet file or a directory of Parquet shards
///
/// Only the event columns are read; shards are concatenated in file-name
/// order and the result is validated as a whole, so an event id repeated
/// across shards is an error.
pub fn read_dataset(path: &Path, config: &TrendsConfig) -> Result<EventDataset> {
    let spinner = create_spinner(Some("Loading event dataset"), config.show_progress);
    let projection = event_schema();
    let batches = if path.is_dir() {
        load_parquet_files_parallel(
            path,
            Some(projection.as_ref()),
            config.batch_size,
            config.parallel_load,
        )
    } else {
        read_parquet(path, Some(projection.as_ref()), config.batch_size)
    };
    finish_progress_bar(&spinner, None);

    let dataset = EventDataset::from_batches(&batches?)?;
    log::info!("Loaded {} events from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Write an event dataset to a single Parquet file
pub fn write_dataset(dataset: &EventDataset, path: &Path) -> Result<()> {
    let batch = dataset.batch();
    write_parquet(path, &batch.schema(), std::slice::from_ref(batch))
}
