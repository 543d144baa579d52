//! Raw performance rows as exported from the event source

use std::path::Path;

use arrow::record_batch::RecordBatch;
use serde::Deserialize;

use crate::error::Result;
use crate::utils::arrow::get_column;
use crate::utils::io::read_csv_as_strings;

/// Column holding the event URI in raw exports
pub const RAW_EVENT: &str = "event";
/// Column holding the event date in raw exports
pub const RAW_DATE: &str = "date";

/// One row of a raw export: one work performed at one event
///
/// Every field is optional because exports leave cells empty freely; the
/// preprocessor decides which gaps are fatal to a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawPerformance {
    pub event: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "genreLabel")]
    pub genre: Option<String>,
    pub composer: Option<String>,
    #[serde(rename = "composerLabel")]
    pub composer_label: Option<String>,
    #[serde(rename = "workperformed")]
    pub work: Option<String>,
    #[serde(rename = "title")]
    pub work_title: Option<String>,
}

impl RawPerformance {
    #[must_use]
    pub fn new(event: &str, date: &str) -> Self {
        Self {
            event: Some(event.to_string()),
            date: Some(date.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: &str) -> Self {
        self.genre = Some(genre.to_string());
        self
    }

    #[must_use]
    pub fn with_work(mut self, composer: &str, work: &str) -> Self {
        self.composer = Some(composer.to_string());
        self.work = Some(work.to_string());
        self
    }
}

/// Decode raw rows from Utf8 record batches
///
/// Columns other than the known ones are ignored; `event` and `date` must exist.
pub fn raw_performances_from_batches(batches: &[RecordBatch]) -> Result<Vec<RawPerformance>> {
    let mut rows = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in batches {
        get_column(batch, RAW_EVENT)?;
        get_column(batch, RAW_DATE)?;
        let decoded: Vec<RawPerformance> = serde_arrow::from_record_batch(batch)?;
        rows.extend(decoded);
    }
    Ok(rows)
}

/// Read a raw export CSV
pub fn read_raw_performances(
    path: &Path,
    delimiter: u8,
    batch_size: usize,
) -> Result<Vec<RawPerformance>> {
    let batches = read_csv_as_strings(path, delimiter, batch_size)?;
    raw_performances_from_batches(&batches)
}
