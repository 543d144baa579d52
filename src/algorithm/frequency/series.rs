//! Labelled frequency series for charts and JSON output

use serde::Serialize;

use crate::algorithm::frequency::engine::FrequencyEngine;
use crate::attribute::{Category, ResolvedQuery};
use crate::error::{Error, Result};
use crate::models::EventDataset;

/// Longest year range a selection may expand to
pub const MAX_YEAR_SPAN: u32 = 10_000;

/// Which years a series covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearSelection {
    /// Every distinct year present in the dataset, ascending
    #[default]
    All,
    /// Every year from `start` to `end`, both inclusive, whether or not it has events
    Range { start: i32, end: i32 },
}

impl YearSelection {
    /// Build a selection from optional bounds; both must be given for a range
    #[must_use]
    pub fn from_bounds(start: Option<i32>, end: Option<i32>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self::Range { start, end },
            _ => Self::All,
        }
    }

    /// Expand to the list of years, ascending
    ///
    /// A range longer than [`MAX_YEAR_SPAN`] years is rejected.
    pub fn years(&self, dataset: &EventDataset) -> Result<Vec<i32>> {
        match *self {
            Self::All => dataset.years(),
            Self::Range { start, end } => {
                if i64::from(end) - i64::from(start) >= i64::from(MAX_YEAR_SPAN) {
                    return Err(Error::YearRangeTooLong {
                        start,
                        end,
                        max: MAX_YEAR_SPAN,
                    });
                }
                Ok((start..=end).collect())
            }
        }
    }
}

/// One point of a frequency series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearFrequency {
    pub year: i32,
    pub frequency: f64,
}

/// Per-year frequencies of one selected value, with chart labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencySeries {
    pub title: String,
    pub y_label: String,
    pub category: Category,
    /// The value results are aggregated under
    pub label: String,
    pub normalized: bool,
    pub points: Vec<YearFrequency>,
}

impl FrequencySeries {
    pub fn compute(
        dataset: &EventDataset,
        selection: YearSelection,
        query: &ResolvedQuery,
        normalize: bool,
    ) -> Result<Self> {
        let years = selection.years(dataset)?;
        let frequencies = FrequencyEngine::new(dataset).compute(&years, query, normalize)?;

        let subject = format!(
            "Performances of {}: {}",
            query.category(),
            query.display_value()
        );
        let y_label = if normalize {
            format!("Share of {}", subject.to_lowercase())
        } else {
            subject.clone()
        };

        Ok(Self {
            title: format!("{subject} by Year"),
            y_label,
            category: query.category(),
            label: query.label().to_string(),
            normalized: normalize,
            points: years
                .into_iter()
                .zip(frequencies)
                .map(|(year, frequency)| YearFrequency { year, frequency })
                .collect(),
        })
    }

    /// Largest frequency in the series, 0 when empty
    #[must_use]
    pub fn max_frequency(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.frequency)
            .fold(0.0, f64::max)
    }
}
