//! Normalization of selected values into match tokens

use crate::attribute::category::{Category, MatchStrategy};
use crate::error::{Error, Result};

/// A raw selection as collected from a user: one value, or several for multi-select
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    One(String),
    Many(Vec<String>),
}

impl Selection {
    fn into_values(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for Selection {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for Selection {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Selection {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// The normalized token(s) to search for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchValue {
    /// A single token compared for equality
    Exact(String),
    /// Alternatives; any one of them matching is a match
    AnyOf(Vec<String>),
}

/// A category paired with its normalized match value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    category: Category,
    value: MatchValue,
}

impl ResolvedQuery {
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// The canonical field the value is matched against
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.category.field()
    }

    #[must_use]
    pub fn strategy(&self) -> MatchStrategy {
        self.category.strategy()
    }

    #[must_use]
    pub fn value(&self) -> &MatchValue {
        &self.value
    }

    /// The label results are aggregated under: the value itself, or the first alternative
    #[must_use]
    pub fn label(&self) -> &str {
        match &self.value {
            MatchValue::Exact(value) => value,
            MatchValue::AnyOf(values) => values.first().map_or("", String::as_str),
        }
    }

    /// All selected values joined for display
    #[must_use]
    pub fn display_value(&self) -> String {
        match &self.value {
            MatchValue::Exact(value) => value.clone(),
            MatchValue::AnyOf(values) => values.join(", "),
        }
    }
}

/// Resolve a category name and a raw selection
///
/// # Errors
/// * `UnknownCategory` for a name other than Genre, Nationality, Work, Composer
/// * `MalformedIdentifier` for a Work/Composer value without `(#<id>)`
/// * `EmptySelection` / `InvalidSelection` for a selection of the wrong shape
pub fn resolve(category: &str, raw_value: impl Into<Selection>) -> Result<ResolvedQuery> {
    resolve_category(category.parse()?, raw_value)
}

/// Resolve a raw selection for an already parsed category
pub fn resolve_category(
    category: Category,
    raw_value: impl Into<Selection>,
) -> Result<ResolvedQuery> {
    build_query(category, raw_value.into().into_values(), true)
}

/// Build a query from already normalized match tokens
///
/// Work and Composer values are taken as bare identifiers (`"42"`, not
/// `"Mozart (#42)"`); genres are still lower-cased. Unknown categories and
/// selections of the wrong shape fail as in [`resolve`].
pub fn normalized_query(category: &str, value: impl Into<Selection>) -> Result<ResolvedQuery> {
    build_query(category.parse()?, value.into().into_values(), false)
}

fn build_query(
    category: Category,
    values: Vec<String>,
    from_display: bool,
) -> Result<ResolvedQuery> {
    let value = match category.strategy() {
        MatchStrategy::WorkLevel { set_valued: true } => {
            if values.is_empty() {
                return Err(Error::EmptySelection {
                    category: category.to_string(),
                });
            }
            MatchValue::AnyOf(values)
        }
        MatchStrategy::EventLevel { case_insensitive } => {
            let value = single_value(category, values)?;
            MatchValue::Exact(if case_insensitive {
                value.to_lowercase()
            } else {
                value
            })
        }
        MatchStrategy::WorkLevel { set_valued: false } => {
            let value = single_value(category, values)?;
            if from_display && category.uses_identifier() {
                MatchValue::Exact(extract_identifier(&value)?.to_string())
            } else {
                MatchValue::Exact(value)
            }
        }
    };

    Ok(ResolvedQuery { category, value })
}

fn single_value(category: Category, values: Vec<String>) -> Result<String> {
    let count = values.len();
    let mut values = values.into_iter();
    match (values.next(), values.next()) {
        (Some(value), None) => Ok(value),
        (None, _) => Err(Error::EmptySelection {
            category: category.to_string(),
        }),
        (Some(_), Some(_)) => Err(Error::InvalidSelection {
            category: category.to_string(),
            count,
        }),
    }
}

/// Extract the identifier embedded in a display value such as `"Mozart (#42)"`
///
/// The identifier is the text between the first `#` and the next `)`.
pub fn extract_identifier(display: &str) -> Result<&str> {
    let malformed = || Error::MalformedIdentifier {
        value: display.to_string(),
    };

    let start = display.find('#').ok_or_else(malformed)? + 1;
    let len = display[start..].find(')').ok_or_else(malformed)?;
    let id = &display[start..start + len];
    if id.is_empty() {
        return Err(malformed());
    }
    Ok(id)
}
