//! Parquet file operations
//!
//! Finding Parquet shards, reading them into Arrow record batches (optionally
//! projected onto a schema's top-level columns) and writing batches back out.

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::ArrowWriter;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rayon::prelude::*;

use crate::error::util::{safe_create_file, safe_open_file, validate_directory};
use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Build a projection onto the top-level columns of `schema`
///
/// Columns missing from the file are skipped with a warning. Returns `None`
/// when nothing matches, in which case all columns are read.
#[must_use]
pub fn create_projection(
    schema: &Schema,
    file_schema: &Schema,
    parquet_schema: &parquet::schema::types::SchemaDescriptor,
) -> Option<ProjectionMask> {
    let roots = schema
        .fields()
        .iter()
        .filter_map(|f| {
            let field_name = f.name();
            file_schema.index_of(field_name).map_or_else(
                |_| {
                    log::debug!("Field {field_name} not found in parquet file, skipping");
                    None
                },
                Some,
            )
        })
        .collect_vec();

    if roots.is_empty() {
        log_warning("No matching fields found in schema projection, reading all columns", None);
        None
    } else {
        Some(ProjectionMask::roots(parquet_schema, roots))
    }
}

/// Read a parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `schema` - Optional Arrow Schema for projecting specific columns
/// * `batch_size` - Rows per decoded batch
pub fn read_parquet(
    path: &Path,
    schema: Option<&Schema>,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = safe_open_file(path, "parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);

    let projection = schema.and_then(|schema| {
        create_projection(schema, builder.schema(), builder.parquet_schema())
    });
    let reader = match projection {
        Some(mask) => builder.with_projection(mask).build()?,
        None => builder.build()?,
    };

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok(batches)
}

/// Find all Parquet files in a directory, sorted by path
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for parquet files in", dir);
    validate_directory(dir, "dataset directory")?;

    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::file_with_source(dir, "failed to read directory", e))?;

    let mut parquet_files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| Error::file_with_source(dir, "failed to read directory entry", e))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "parquet") {
            parquet_files.push(path);
        }
    }
    parquet_files.sort();

    if parquet_files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, parquet_files.len(), None);
    }

    Ok(parquet_files)
}

/// Load all parquet files from a directory
///
/// Files are read in parallel when `parallel` is set. Batches are returned in
/// file-name order either way so the combined dataset is deterministic.
pub fn load_parquet_files_parallel(
    dir: &Path,
    schema: Option<&Schema>,
    batch_size: usize,
    parallel: bool,
) -> Result<Vec<RecordBatch>> {
    let parquet_files = find_parquet_files(dir)?;
    if parquet_files.is_empty() {
        return Ok(Vec::new());
    }

    let per_file: Vec<Vec<RecordBatch>> = if parallel {
        parquet_files
            .par_iter()
            .map(|path| read_parquet(path, schema, batch_size))
            .collect::<Result<Vec<_>>>()?
    } else {
        parquet_files
            .iter()
            .map(|path| read_parquet(path, schema, batch_size))
            .collect::<Result<Vec<_>>>()?
    };

    let combined = per_file.into_iter().flatten().collect_vec();
    log::info!(
        "Successfully loaded {} batches from {} Parquet files",
        combined.len(),
        parquet_files.len()
    );
    Ok(combined)
}

/// Write record batches sharing one schema to a single Parquet file
pub fn write_parquet(path: &Path, schema: &Schema, batches: &[RecordBatch]) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing parquet file", path);

    let file = safe_create_file(path, "parquet output")?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, std::sync::Arc::new(schema.clone()), Some(props))?;
    for batch in batches {
        writer.write(batch)?;
    }
    writer.close()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("wrote", path, rows, Some(start.elapsed()));
    Ok(())
}
