//! Event and work-performance records
//!
//! Row-oriented view of the event dataset. `EventDataset::from_events` and
//! `EventDataset::events` convert between these records and the columnar
//! representation through `serde_arrow`.

use serde::{Deserialize, Serialize};

/// One piece performed at an event
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkPerformance {
    pub composer_id: Option<String>,
    #[serde(default)]
    pub composer_label: Option<String>,
    pub work_id: Option<String>,
    #[serde(default)]
    pub work_title: Option<String>,
    /// Nationalities held by the composer of the piece
    #[serde(default)]
    pub nationality_set: Vec<String>,
}

impl WorkPerformance {
    #[must_use]
    pub fn new(composer_id: impl Into<String>, work_id: impl Into<String>) -> Self {
        Self {
            composer_id: Some(composer_id.into()),
            work_id: Some(work_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nationalities<I, S>(mut self, nationalities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nationality_set = nationalities.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_labels(
        mut self,
        composer_label: Option<String>,
        work_title: Option<String>,
    ) -> Self {
        self.composer_label = composer_label;
        self.work_title = work_title;
        self
    }
}

/// A single performance event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    #[serde(default)]
    pub date: Option<String>,
    pub year: i32,
    /// Genre label, stored lower-cased
    pub genre: Option<String>,
    #[serde(default)]
    pub works: Vec<WorkPerformance>,
}

impl Event {
    #[must_use]
    pub fn new(event_id: impl Into<String>, year: i32) -> Self {
        Self {
            event_id: event_id.into(),
            date: None,
            year,
            genre: None,
            works: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the genre; the label is lower-cased as stored genres always are
    #[must_use]
    pub fn with_genre(mut self, genre: impl AsRef<str>) -> Self {
        self.genre = Some(genre.as_ref().to_lowercase());
        self
    }

    #[must_use]
    pub fn with_work(mut self, work: WorkPerformance) -> Self {
        self.works.push(work);
        self
    }
}
