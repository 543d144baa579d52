//! Per-event match masks
//!
//! Turns a resolved query into a boolean mask over a batch of events. For
//! event-level categories the mask compares one column; for work-level
//! categories every work entry is tested first and an event matches when at
//! least one of its entries does, so several matching entries still count
//! the event once.

use arrow::array::{Array, BooleanArray, ListArray, StringArray};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::attribute::{MatchStrategy, MatchValue, ResolvedQuery};
use crate::error::Result;
use crate::schema::WORKS;
use crate::utils::arrow::{downcast_array, list_column, list_struct_values, string_column};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// A Utf8 column of the event row
    EventColumn { case_insensitive: bool },
    /// A Utf8 field of each work entry
    WorkScalar,
    /// A `List<Utf8>` field of each work entry
    WorkSet,
}

/// Evaluates a resolved query against event batches
#[derive(Debug, Clone)]
pub struct EventMatcher<'q> {
    field: &'static str,
    target: Target,
    tokens: FxHashSet<&'q str>,
}

impl<'q> EventMatcher<'q> {
    #[must_use]
    pub fn new(query: &'q ResolvedQuery) -> Self {
        let target = match query.strategy() {
            MatchStrategy::EventLevel { case_insensitive } => {
                Target::EventColumn { case_insensitive }
            }
            MatchStrategy::WorkLevel { set_valued: false } => Target::WorkScalar,
            MatchStrategy::WorkLevel { set_valued: true } => Target::WorkSet,
        };

        let tokens = match query.value() {
            MatchValue::Exact(value) => std::iter::once(value.as_str()).collect(),
            MatchValue::AnyOf(values) => values.iter().map(String::as_str).collect(),
        };

        Self {
            field: query.field(),
            target,
            tokens,
        }
    }

    /// The field this matcher reads
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Whether the batch carries the matched field at all
    ///
    /// A work-level field missing from the nested entry type means the value
    /// is absent everywhere. Event-level columns are required, so a missing
    /// one is an error.
    pub fn field_present(&self, batch: &RecordBatch) -> Result<bool> {
        match self.target {
            Target::EventColumn { .. } => string_column(batch, self.field).map(|_| true),
            Target::WorkScalar | Target::WorkSet => {
                let works = list_column(batch, WORKS)?;
                let entries = list_struct_values(works, WORKS)?;
                Ok(entries.column_by_name(self.field).is_some())
            }
        }
    }

    /// Compute one boolean per event: does the event match the query
    pub fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        match self.target {
            Target::EventColumn { case_insensitive } => {
                let column = string_column(batch, self.field)?;
                Ok(column
                    .iter()
                    .map(|value| Some(value.is_some_and(|v| self.accepts(v, case_insensitive))))
                    .collect())
            }
            Target::WorkScalar | Target::WorkSet => self.work_mask(batch),
        }
    }

    fn accepts(&self, value: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            self.tokens.contains(value.to_lowercase().as_str())
        } else {
            self.tokens.contains(value)
        }
    }

    fn work_mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let works = list_column(batch, WORKS)?;
        let entries = list_struct_values(works, WORKS)?;

        let Some(values) = entries.column_by_name(self.field) else {
            return Ok(BooleanArray::from(vec![false; batch.num_rows()]));
        };

        let entry_matches: Vec<bool> = match self.target {
            Target::WorkSet => {
                let sets = downcast_array::<ListArray>(values.as_ref(), self.field, "List<Utf8>")?;
                let labels = downcast_array::<StringArray>(
                    sets.values().as_ref(),
                    self.field,
                    "List<Utf8>",
                )?;
                let offsets = sets.value_offsets();
                (0..sets.len())
                    .map(|j| {
                        entries.is_valid(j)
                            && sets.is_valid(j)
                            && (offsets[j] as usize..offsets[j + 1] as usize).any(|k| {
                                labels.is_valid(k) && self.tokens.contains(labels.value(k))
                            })
                    })
                    .collect()
            }
            _ => {
                let ids = downcast_array::<StringArray>(values.as_ref(), self.field, "Utf8")?;
                (0..ids.len())
                    .map(|j| {
                        entries.is_valid(j) && ids.is_valid(j) && self.tokens.contains(ids.value(j))
                    })
                    .collect()
            }
        };

        let offsets = works.value_offsets();
        Ok((0..works.len())
            .map(|i| {
                let any = works.is_valid(i)
                    && entry_matches[offsets[i] as usize..offsets[i + 1] as usize]
                        .iter()
                        .any(|matched| *matched);
                Some(any)
            })
            .collect())
    }
}
