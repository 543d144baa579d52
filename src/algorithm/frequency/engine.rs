//! Year-bucketed frequency computation
//!
//! For every requested year the engine filters a transient subset of the
//! dataset, evaluates the match mask on it and counts matching events. The
//! dataset itself is never modified, so repeated calls give identical results.

use std::time::Instant;

use log::{debug, info, warn};

use crate::algorithm::frequency::matching::EventMatcher;
use crate::attribute::{ResolvedQuery, Selection, normalized_query};
use crate::error::Result;
use crate::filter::{BatchFilter, YearFilter};
use crate::models::EventDataset;

/// Matching and total event counts for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTally {
    pub year: i32,
    /// Events of the year matching the query
    pub matches: usize,
    /// All events of the year
    pub events: usize,
}

impl YearTally {
    /// The raw count, or the share of the year's events when normalized
    ///
    /// A year without events has frequency 0 in both modes.
    #[must_use]
    pub fn frequency(&self, normalize: bool) -> f64 {
        if !normalize {
            self.matches as f64
        } else if self.events == 0 {
            0.0
        } else {
            self.matches as f64 / self.events as f64
        }
    }
}

/// Computes per-year frequencies over a borrowed dataset
#[derive(Debug, Clone, Copy)]
pub struct FrequencyEngine<'a> {
    dataset: &'a EventDataset,
}

impl<'a> FrequencyEngine<'a> {
    #[must_use]
    pub fn new(dataset: &'a EventDataset) -> Self {
        Self { dataset }
    }

    /// Per-year frequencies, aligned with `years`
    pub fn compute(
        &self,
        years: &[i32],
        query: &ResolvedQuery,
        normalize: bool,
    ) -> Result<Vec<f64>> {
        Ok(self
            .tally(years, query)?
            .iter()
            .map(|tally| tally.frequency(normalize))
            .collect())
    }

    /// Per-year match and event counts, aligned with `years`
    ///
    /// Years are processed one after another on the calling thread.
    pub fn tally(&self, years: &[i32], query: &ResolvedQuery) -> Result<Vec<YearTally>> {
        if years.is_empty() {
            return Ok(Vec::new());
        }

        let start_time = Instant::now();
        let matcher = EventMatcher::new(query);
        let batch = self.dataset.batch();

        let field_present = matcher.field_present(batch)?;
        if !field_present {
            warn!(
                "Field '{}' is absent from the work entries; {} occurs in no event",
                matcher.field(),
                query.display_value()
            );
        }

        let tallies = years
            .iter()
            .map(|&year| -> Result<YearTally> {
                let subset = YearFilter::new(year).filter(batch)?;
                let events = subset.num_rows();
                let matches = if field_present && events > 0 {
                    matcher.mask(&subset)?.true_count()
                } else {
                    0
                };
                debug!("{year}: {matches} of {events} events match");
                Ok(YearTally {
                    year,
                    matches,
                    events,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Computed {} frequencies for {}: {} over {} years in {:?}",
            query.category(),
            query.field(),
            query.display_value(),
            years.len(),
            start_time.elapsed()
        );

        Ok(tallies)
    }
}

/// Count, per year, the events matching `value` in `category`
///
/// `value` is the normalized match value: a genre, one or more
/// nationalities, or a bare work/composer identifier as produced by
/// [`crate::attribute::resolve`]. Returns one value per entry of `years`, in
/// the same order. With `normalize` each count is divided by the number of
/// events in that year.
///
/// # Errors
/// Fails when the category is unknown, the selection has the wrong shape, or
/// the dataset does not have the event layout. A value that never occurs is
/// not an error; it yields zeros.
pub fn compute_frequencies(
    dataset: &EventDataset,
    years: &[i32],
    category: &str,
    value: impl Into<Selection>,
    normalize: bool,
) -> Result<Vec<f64>> {
    let query = normalized_query(category, value)?;
    compute_resolved(dataset, years, &query, normalize)
}

/// Like [`compute_frequencies`] for an already resolved query
pub fn compute_resolved(
    dataset: &EventDataset,
    years: &[i32],
    query: &ResolvedQuery,
    normalize: bool,
) -> Result<Vec<f64>> {
    FrequencyEngine::new(dataset).compute(years, query, normalize)
}
