//! Attribute categories and how each one is matched
//!
//! Whether a category is resolved on the event row or by scanning the nested
//! works is declared here once instead of being inferred from the shape of
//! the data at query time.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::schema::{COMPOSER_ID, GENRE, NATIONALITY_SET, WORK_ID};

/// A user-facing attribute category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Genre,
    Nationality,
    Work,
    Composer,
}

/// How a category's value is located and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Compare a column of the event row
    EventLevel {
        /// Lower-case both sides before comparing
        case_insensitive: bool,
    },
    /// Scan the event's work entries; the event matches when any entry does
    WorkLevel {
        /// The nested field holds a set of labels and the query is a set of
        /// alternatives; an entry matches when the two intersect
        set_valued: bool,
    },
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Genre, Self::Nationality, Self::Work, Self::Composer];

    /// The name used in selections and chart titles
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Nationality => "Nationality",
            Self::Work => "Work",
            Self::Composer => "Composer",
        }
    }

    /// The canonical dataset field holding this category
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Genre => GENRE,
            Self::Nationality => NATIONALITY_SET,
            Self::Work => WORK_ID,
            Self::Composer => COMPOSER_ID,
        }
    }

    #[must_use]
    pub const fn strategy(self) -> MatchStrategy {
        match self {
            Self::Genre => MatchStrategy::EventLevel {
                case_insensitive: true,
            },
            Self::Nationality => MatchStrategy::WorkLevel { set_valued: true },
            Self::Work | Self::Composer => MatchStrategy::WorkLevel { set_valued: false },
        }
    }

    /// Whether selections for this category carry an embedded `(#<id>)`
    #[must_use]
    pub const fn uses_identifier(self) -> bool {
        matches!(self, Self::Work | Self::Composer)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
