//! Building the event dataset from raw exports
//!
//! A raw export has one row per (event, work) pair. Rows are grouped per
//! event in first-occurrence order, the year is derived from the date, the
//! genre is lower-cased, composer and work URIs are reduced to identifiers
//! and each work entry carries its composer's nationalities.

pub mod lookup;
pub mod raw;

use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

pub use lookup::NationalityLookup;
pub use raw::{RawPerformance, raw_performances_from_batches, read_raw_performances};

use crate::config::TrendsConfig;
use crate::error::Result;
use crate::models::{Event, EventDataset, WorkPerformance};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Reduce a URI to the identifier after its last `/`
///
/// Values without a `/` are returned trimmed but otherwise unchanged.
#[must_use]
pub fn identifier_from_uri(uri: &str) -> &str {
    let uri = uri.trim();
    uri.rsplit_once('/').map_or(uri, |(_, id)| id)
}

/// The year given by the leading four characters of a date
#[must_use]
pub fn year_from_date(date: &str) -> Option<i32> {
    date.trim().get(..4)?.parse().ok()
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Groups raw rows into events
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    lookup: NationalityLookup,
    show_progress: bool,
}

impl Preprocessor {
    #[must_use]
    pub fn new(lookup: NationalityLookup) -> Self {
        Self {
            lookup,
            show_progress: false,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Build the event dataset
    ///
    /// Rows without an event id are skipped. Events whose year cannot be
    /// derived from the date of their first row are dropped with a warning.
    pub fn build(&self, rows: &[RawPerformance]) -> Result<EventDataset> {
        let start = Instant::now();
        let pb = create_main_progress_bar(
            rows.len() as u64,
            Some("Grouping performances"),
            self.show_progress,
        );

        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut undated: FxHashSet<&str> = FxHashSet::default();
        let mut events: Vec<Event> = Vec::new();
        let mut anonymous_rows = 0usize;

        for row in rows {
            pb.inc(1);

            let Some(event_id) = present(row.event.as_ref()) else {
                anonymous_rows += 1;
                continue;
            };
            if undated.contains(event_id) {
                continue;
            }

            let slot = if let Some(&slot) = index.get(event_id) {
                slot
            } else {
                let Some(year) = present(row.date.as_ref()).and_then(year_from_date) else {
                    undated.insert(event_id);
                    continue;
                };
                let mut event = Event::new(event_id, year);
                event.date = present(row.date.as_ref()).map(str::to_string);
                if let Some(genre) = present(row.genre.as_ref()) {
                    event = event.with_genre(genre);
                }
                events.push(event);
                index.insert(event_id, events.len() - 1);
                events.len() - 1
            };

            if let Some(work) = self.work_entry(row) {
                events[slot].works.push(work);
            }
        }

        finish_progress_bar(&pb, Some("Grouped performances"));

        if anonymous_rows > 0 {
            warn!("Skipped {anonymous_rows} rows without an event id");
        }
        if !undated.is_empty() {
            warn!(
                "Dropped {} events whose date does not start with a year",
                undated.len()
            );
        }

        let dataset = EventDataset::from_events(&events)?;
        info!(
            "Built {} events from {} rows in {:?}",
            dataset.len(),
            rows.len(),
            start.elapsed()
        );
        Ok(dataset)
    }

    fn work_entry(&self, row: &RawPerformance) -> Option<WorkPerformance> {
        let composer_id = present(row.composer.as_ref())
            .map(identifier_from_uri)
            .filter(|id| !id.is_empty());
        let work_id = present(row.work.as_ref())
            .map(identifier_from_uri)
            .filter(|id| !id.is_empty());
        if composer_id.is_none() && work_id.is_none() {
            return None;
        }

        Some(WorkPerformance {
            composer_id: composer_id.map(str::to_string),
            composer_label: present(row.composer_label.as_ref()).map(str::to_string),
            work_id: work_id.map(str::to_string),
            work_title: present(row.work_title.as_ref()).map(str::to_string),
            nationality_set: composer_id
                .map(|id| self.lookup.get(id).to_vec())
                .unwrap_or_default(),
        })
    }
}

/// Read the raw export and the optional nationality table and build the dataset
pub fn run(
    events_csv: &Path,
    nationalities_csv: Option<&Path>,
    config: &TrendsConfig,
) -> Result<EventDataset> {
    let lookup = match nationalities_csv {
        Some(path) => NationalityLookup::read(
            path,
            &config.nationality_table,
            config.csv_delimiter,
            config.batch_size,
        )?,
        None => {
            warn!("No nationality table given; nationality sets will be empty");
            NationalityLookup::default()
        }
    };

    let rows = read_raw_performances(events_csv, config.csv_delimiter, config.batch_size)?;
    Preprocessor::new(lookup)
        .with_progress(config.show_progress)
        .build(&rows)
}
