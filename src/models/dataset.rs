//! The immutable event dataset consumed by the frequency engine

use arrow::array::Array;
use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::models::event::Event;
use crate::schema::{self, EVENT_ID, GENRE, WORKS, YEAR};
use crate::utils::arrow::{int32_column, list_column, string_column};

/// A validated collection of events, one row per event
///
/// Construction conforms the batch to the event layout and checks the
/// dataset invariants: every event id is present and unique and every event
/// has a year. After that the dataset is never mutated.
#[derive(Debug, Clone)]
pub struct EventDataset {
    batch: RecordBatch,
}

impl EventDataset {
    /// Validate a record batch as an event dataset
    pub fn try_new(batch: RecordBatch) -> Result<Self> {
        let batch = schema::conform_batch(&batch)?;
        validate_events(&batch)?;
        debug!("Validated event dataset with {} events", batch.num_rows());
        Ok(Self { batch })
    }

    /// Concatenate batches (for example the shards of a dataset directory) into one dataset
    pub fn from_batches(batches: &[RecordBatch]) -> Result<Self> {
        match batches {
            [] => Ok(Self::empty()),
            [single] => Self::try_new(single.clone()),
            _ => {
                let conformed = batches
                    .iter()
                    .map(schema::conform_batch)
                    .collect::<Result<Vec<_>>>()?;
                let batch = concat_batches(&conformed[0].schema(), &conformed)?;
                validate_events(&batch)?;
                Ok(Self { batch })
            }
        }
    }

    /// Build a dataset from row records
    pub fn from_events(events: &[Event]) -> Result<Self> {
        let batch = serde_arrow::to_record_batch(&schema::event_fields(), &events)?;
        Self::try_new(batch)
    }

    /// A dataset without events
    #[must_use]
    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(schema::event_schema()),
        }
    }

    /// The underlying record batch
    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Convert back to row records
    pub fn events(&self) -> Result<Vec<Event>> {
        Ok(serde_arrow::from_record_batch(&self.batch)?)
    }

    /// Distinct years present in the dataset, ascending
    pub fn years(&self) -> Result<Vec<i32>> {
        let years = int32_column(&self.batch, YEAR)?;
        Ok(years.values().iter().copied().sorted_unstable().dedup().collect())
    }
}

fn validate_events(batch: &RecordBatch) -> Result<()> {
    let years = int32_column(batch, YEAR)?;
    if years.null_count() > 0 {
        return Err(Error::NullValue {
            column: YEAR.to_string(),
            count: years.null_count(),
        });
    }

    let ids = string_column(batch, EVENT_ID)?;
    if ids.null_count() > 0 {
        return Err(Error::NullValue {
            column: EVENT_ID.to_string(),
            count: ids.null_count(),
        });
    }

    let mut seen = FxHashSet::default();
    seen.reserve(ids.len());
    for id in ids.iter().flatten() {
        if !seen.insert(id) {
            return Err(Error::DuplicateEvent {
                event_id: id.to_string(),
            });
        }
    }

    string_column(batch, GENRE)?;
    list_column(batch, WORKS)?;
    Ok(())
}
