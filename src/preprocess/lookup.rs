//! Composer nationality lookup

use std::path::Path;

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use log::info;
use rustc_hash::FxHashMap;

use crate::config::NationalityTableConfig;
use crate::error::Result;
use crate::preprocess::identifier_from_uri;
use crate::utils::arrow::string_column;
use crate::utils::io::read_csv_as_strings;

/// Nationalities per composer identifier
///
/// The table holds one row per (composer, nationality) pair; a composer with
/// several nationalities appears on several rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NationalityLookup {
    by_composer: FxHashMap<String, Vec<String>>,
}

impl NationalityLookup {
    /// Record one nationality for a composer; duplicates and empty labels are ignored
    pub fn insert(&mut self, composer: &str, nationality: &str) {
        let composer = identifier_from_uri(composer);
        let nationality = nationality.trim();
        if composer.is_empty() || nationality.is_empty() {
            return;
        }
        let set = self.by_composer.entry(composer.to_string()).or_default();
        if !set.iter().any(|known| known == nationality) {
            set.push(nationality.to_string());
        }
    }

    /// Nationalities of a composer, empty when unknown
    #[must_use]
    pub fn get(&self, composer_id: &str) -> &[String] {
        self.by_composer.get(composer_id).map_or(&[], Vec::as_slice)
    }

    /// Number of composers with at least one nationality
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_composer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_composer.is_empty()
    }

    pub fn from_batches(batches: &[RecordBatch], table: &NationalityTableConfig) -> Result<Self> {
        let mut lookup = Self::default();
        for batch in batches {
            let composers = string_column(batch, &table.composer_column)?;
            let nationalities = string_column(batch, &table.nationality_column)?;
            for i in 0..batch.num_rows() {
                if composers.is_valid(i) && nationalities.is_valid(i) {
                    lookup.insert(composers.value(i), nationalities.value(i));
                }
            }
        }
        Ok(lookup)
    }

    /// Read the lookup table from a CSV file
    pub fn read(
        path: &Path,
        table: &NationalityTableConfig,
        delimiter: u8,
        batch_size: usize,
    ) -> Result<Self> {
        let batches = read_csv_as_strings(path, delimiter, batch_size)?;
        let lookup = Self::from_batches(&batches, table)?;
        info!("Loaded nationalities for {} composers", lookup.len());
        Ok(lookup)
    }
}

impl<C: AsRef<str>, N: AsRef<str>> FromIterator<(C, N)> for NationalityLookup {
    fn from_iter<I: IntoIterator<Item = (C, N)>>(pairs: I) -> Self {
        let mut lookup = Self::default();
        for (composer, nationality) in pairs {
            lookup.insert(composer.as_ref(), nationality.as_ref());
        }
        lookup
    }
}
