//! CSV input
//!
//! Raw exports are read with every column typed as nullable Utf8, so that
//! identifiers such as `0042` or dates keep their text form.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read a CSV file with a header row into record batches of Utf8 columns
///
/// Column names come from the header. Empty cells may surface as nulls.
pub fn read_csv_as_strings(
    path: &Path,
    delimiter: u8,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading csv file", path);

    let mut file = safe_open_file(path, "csv input")?;
    let format = Format::default().with_header(true).with_delimiter(delimiter);
    let (header, _) = format.infer_schema(&mut file, Some(0))?;
    file.rewind()
        .map_err(|e| Error::file_with_source(path, "failed to rewind csv input", e))?;

    let schema = Arc::new(Schema::new(
        header
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(schema)
        .with_header(true)
        .with_delimiter(delimiter)
        .with_batch_size(batch_size)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok(batches)
}
