//! Per-year performance frequencies
//!
//! The engine counts, for each requested year, the events in which a
//! selected attribute value occurs, optionally normalized by that year's
//! event count.

pub mod engine;
pub mod matching;
pub mod series;

pub use engine::{FrequencyEngine, YearTally, compute_frequencies, compute_resolved};
pub use matching::EventMatcher;
pub use series::{FrequencySeries, MAX_YEAR_SPAN, YearFrequency, YearSelection};
