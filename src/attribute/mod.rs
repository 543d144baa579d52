//! Attribute categories and resolution of selected values

pub mod category;
pub mod resolver;

pub use category::{Category, MatchStrategy};
pub use resolver::{
    MatchValue, ResolvedQuery, Selection, extract_identifier, normalized_query, resolve,
    resolve_category,
};
