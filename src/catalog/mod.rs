//! Selectable values per category
//!
//! Lists what a user can pick for each category, in the display form the
//! attribute resolver accepts: plain labels for genres and nationalities,
//! `"<label> (#<id>)"` for composers and `"<title> by <composer> (#<id>)"`
//! for works.

use std::collections::BTreeMap;
use std::ops::Range;

use arrow::array::{Array, ListArray, StringArray, StructArray};
use itertools::Itertools;
use log::debug;

use crate::attribute::Category;
use crate::error::Result;
use crate::models::EventDataset;
use crate::schema::{
    COMPOSER_ID, COMPOSER_LABEL, GENRE, NATIONALITY_SET, WORK_ID, WORK_TITLE, WORKS,
};
use crate::utils::arrow::{
    downcast_array, list_column, list_struct_values, present_strings, string_column,
};

/// An identified value with an optional human-readable label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelledId {
    pub id: String,
    pub label: Option<String>,
    /// Who the value is by, such as the composer of a work
    pub by: Option<String>,
}

impl LabelledId {
    /// The selectable form, falling back to the id when there is no label
    #[must_use]
    pub fn display(&self) -> String {
        let label = self.label.as_deref().unwrap_or(&self.id);
        match &self.by {
            Some(by) => display_value(&format!("{label} by {by}"), &self.id),
            None => display_value(label, &self.id),
        }
    }
}

/// Format a label and identifier as `"<label> (#<id>)"`
#[must_use]
pub fn display_value(label: &str, id: &str) -> String {
    format!("{label} (#{id})")
}

/// Distinct selectable values of a dataset, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub genres: Vec<String>,
    pub nationalities: Vec<String>,
    pub composers: Vec<LabelledId>,
    pub works: Vec<LabelledId>,
}

impl Catalog {
    pub fn from_dataset(dataset: &EventDataset) -> Result<Self> {
        let batch = dataset.batch();

        let genres = present_strings(string_column(batch, GENRE)?)
            .map(str::to_string)
            .sorted_unstable()
            .dedup()
            .collect();

        let works = list_column(batch, WORKS)?;
        let entries = list_struct_values(works, WORKS)?;
        let range = entry_range(works);

        let catalog = Self {
            genres,
            nationalities: nationalities(entries, range.clone())?,
            composers: labelled_ids(entries, range.clone(), COMPOSER_ID, COMPOSER_LABEL, None)?,
            works: labelled_ids(entries, range, WORK_ID, WORK_TITLE, Some(COMPOSER_LABEL))?,
        };

        debug!(
            "Catalog: {} genres, {} nationalities, {} composers, {} works",
            catalog.genres.len(),
            catalog.nationalities.len(),
            catalog.composers.len(),
            catalog.works.len()
        );
        Ok(catalog)
    }

    /// Selectable values of one category, in display form
    #[must_use]
    pub fn values(&self, category: Category) -> Vec<String> {
        match category {
            Category::Genre => self.genres.clone(),
            Category::Nationality => self.nationalities.clone(),
            Category::Composer => self.composers.iter().map(LabelledId::display).collect(),
            Category::Work => self.works.iter().map(LabelledId::display).collect(),
        }
    }
}

/// The slice of the flattened entries referenced by the list
fn entry_range(works: &ListArray) -> Range<usize> {
    let offsets = works.value_offsets();
    offsets[0] as usize..offsets[offsets.len() - 1] as usize
}

fn optional_strings<'a>(
    entries: &'a StructArray,
    field: &str,
) -> Result<Option<&'a StringArray>> {
    entries
        .column_by_name(field)
        .map(|column| downcast_array::<StringArray>(column.as_ref(), field, "Utf8"))
        .transpose()
}

fn nationalities(entries: &StructArray, range: Range<usize>) -> Result<Vec<String>> {
    let Some(column) = entries.column_by_name(NATIONALITY_SET) else {
        return Ok(Vec::new());
    };
    let sets = downcast_array::<ListArray>(column.as_ref(), NATIONALITY_SET, "List<Utf8>")?;
    let labels =
        downcast_array::<StringArray>(sets.values().as_ref(), NATIONALITY_SET, "List<Utf8>")?;
    let offsets = sets.value_offsets();

    Ok(range
        .filter(|&j| entries.is_valid(j) && sets.is_valid(j))
        .flat_map(|j| offsets[j] as usize..offsets[j + 1] as usize)
        .filter(|&k| labels.is_valid(k) && !labels.value(k).is_empty())
        .map(|k| labels.value(k).to_string())
        .sorted_unstable()
        .dedup()
        .collect())
}

/// A non-empty string at `j`, if the column exists
fn non_empty_at(column: Option<&StringArray>, j: usize) -> Option<&str> {
    column
        .filter(|column| column.is_valid(j))
        .map(|column| column.value(j))
        .filter(|value| !value.is_empty())
}

fn labelled_ids(
    entries: &StructArray,
    range: Range<usize>,
    id_field: &str,
    label_field: &str,
    by_field: Option<&str>,
) -> Result<Vec<LabelledId>> {
    let Some(ids) = optional_strings(entries, id_field)? else {
        return Ok(Vec::new());
    };
    let labels = optional_strings(entries, label_field)?;
    let by = match by_field {
        Some(field) => optional_strings(entries, field)?,
        None => None,
    };

    // First non-empty label seen for an id wins, likewise for the attribution
    let mut by_id: BTreeMap<&str, (Option<&str>, Option<&str>)> = BTreeMap::new();
    for j in range.filter(|&j| entries.is_valid(j) && ids.is_valid(j)) {
        let id = ids.value(j);
        if id.is_empty() {
            continue;
        }
        let (label, attribution) = by_id.entry(id).or_insert((None, None));
        if label.is_none() {
            *label = non_empty_at(labels, j);
        }
        if attribution.is_none() {
            *attribution = non_empty_at(by, j);
        }
    }

    Ok(by_id
        .into_iter()
        .map(|(id, (label, by))| LabelledId {
            id: id.to_string(),
            label: label.map(str::to_string),
            by: by.map(str::to_string),
        })
        .collect())
}
