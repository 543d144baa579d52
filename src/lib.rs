//! Yearly frequency analysis of historical performance events.
//!
//! Events are stored as one Arrow record batch with a row per event and the
//! performed works nested in a list-of-struct column. Given a category
//! (Genre, Nationality, Work or Composer) and a selected value, the
//! frequency engine counts per year the events in which the value occurs,
//! optionally normalized by the number of events in that year.

pub mod algorithm;
pub mod attribute;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod preprocess;
pub mod schema;
pub mod utils;

// Core types
pub use config::TrendsConfig;
pub use error::{Error, Result};
pub use models::{Event, EventDataset, WorkPerformance};
pub use schema::{SchemaCompatibilityReport, SchemaIssue};

// Resolution and computation
pub use algorithm::frequency::{
    FrequencyEngine, FrequencySeries, YearFrequency, YearSelection, YearTally,
    compute_frequencies, compute_resolved,
};
pub use attribute::{Category, MatchValue, ResolvedQuery, Selection, resolve};
pub use catalog::Catalog;

// Dataset IO
pub use loader::{read_dataset, write_dataset};
pub use preprocess::{NationalityLookup, Preprocessor, RawPerformance};

// Arrow types
pub use arrow::record_batch::RecordBatch;
