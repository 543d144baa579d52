//! Arrow layout of the event dataset and schema compatibility checks.
//!
//! One row per event. Works performed at the event live in a nested
//! `List<Struct>` column, so event-level attributes are plain columns and
//! work-level attributes are fields of the nested struct.

use std::sync::{Arc, LazyLock};

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{DataType, Field, FieldRef, Fields, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::info;

use crate::error::{Error, Result};

pub const EVENT_ID: &str = "event_id";
pub const DATE: &str = "date";
pub const YEAR: &str = "year";
pub const GENRE: &str = "genre";
pub const WORKS: &str = "works";

pub const COMPOSER_ID: &str = "composer_id";
pub const COMPOSER_LABEL: &str = "composer_label";
pub const WORK_ID: &str = "work_id";
pub const WORK_TITLE: &str = "work_title";
pub const NATIONALITY_SET: &str = "nationality_set";

/// Name of the child field of list columns
const LIST_ITEM: &str = "item";

static EVENT_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        Field::new(EVENT_ID, DataType::Utf8, false),
        Field::new(DATE, DataType::Utf8, true),
        Field::new(YEAR, DataType::Int32, false),
        Field::new(GENRE, DataType::Utf8, true),
        Field::new(WORKS, works_data_type(), false),
    ]))
});

/// Fields of one work-performance entry
#[must_use]
pub fn work_fields() -> Fields {
    Fields::from(vec![
        Field::new(COMPOSER_ID, DataType::Utf8, true),
        Field::new(COMPOSER_LABEL, DataType::Utf8, true),
        Field::new(WORK_ID, DataType::Utf8, true),
        Field::new(WORK_TITLE, DataType::Utf8, true),
        Field::new(
            NATIONALITY_SET,
            DataType::List(Arc::new(Field::new(LIST_ITEM, DataType::Utf8, true))),
            false,
        ),
    ])
}

/// Data type of the nested `works` column
#[must_use]
pub fn works_data_type() -> DataType {
    DataType::List(Arc::new(Field::new(
        LIST_ITEM,
        DataType::Struct(work_fields()),
        true,
    )))
}

/// The canonical event dataset schema
#[must_use]
pub fn event_schema() -> SchemaRef {
    Arc::clone(&EVENT_SCHEMA)
}

/// The canonical schema as serde_arrow field definitions
#[must_use]
pub fn event_fields() -> Vec<FieldRef> {
    EVENT_SCHEMA.fields().iter().cloned().collect()
}

/// A struct that represents the compatibility of a batch with the event schema
#[derive(Debug, Default)]
pub struct SchemaCompatibilityReport {
    /// Whether the batch can be used as an event dataset
    pub compatible: bool,
    /// List of incompatibility issues, if any
    pub issues: Vec<SchemaIssue>,
}

/// A schema compatibility issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// The column the issue concerns
    pub column: String,
    /// Description of the incompatibility
    pub description: String,
}

impl SchemaCompatibilityReport {
    /// Join all issues into one message
    #[must_use]
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(|issue| format!("{}: {}", issue.column, issue.description))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Checks a schema against the event layout
///
/// Scalar columns only need to be castable to their canonical type. The
/// works column must be a list of structs; which nested fields it carries is
/// not checked here because a missing work-level field only means the value
/// is absent.
#[must_use]
pub fn check_event_schema(schema: &Schema) -> SchemaCompatibilityReport {
    let mut issues = Vec::new();

    for expected in EVENT_SCHEMA.fields() {
        let name = expected.name();
        let Ok(actual) = schema.field_with_name(name) else {
            if name != DATE {
                issues.push(SchemaIssue {
                    column: name.clone(),
                    description: "required column is missing".to_string(),
                });
            }
            continue;
        };

        if name == WORKS {
            if !is_list_of_struct(actual.data_type()) {
                issues.push(SchemaIssue {
                    column: name.clone(),
                    description: format!(
                        "expected a list of structs, found {}",
                        actual.data_type()
                    ),
                });
            }
        } else if actual.data_type() != expected.data_type()
            && !can_cast_types(actual.data_type(), expected.data_type())
        {
            issues.push(SchemaIssue {
                column: name.clone(),
                description: format!(
                    "cannot convert {} to {}",
                    actual.data_type(),
                    expected.data_type()
                ),
            });
        }
    }

    SchemaCompatibilityReport {
        compatible: issues.is_empty(),
        issues,
    }
}

fn is_list_of_struct(data_type: &DataType) -> bool {
    matches!(data_type, DataType::List(item) if matches!(item.data_type(), DataType::Struct(_)))
}

/// Adapt a batch to the event layout
///
/// Scalar columns with a compatible but different type (for example
/// `LargeUtf8` event ids or `Int64` years) are cast to the canonical type
/// and genres are lower-cased; the works column is kept as is. Extra columns
/// are dropped.
pub fn conform_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let report = check_event_schema(&batch.schema());
    if !report.compatible {
        return Err(Error::Schema(report.summary()));
    }

    let mut fields = Vec::with_capacity(EVENT_SCHEMA.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(EVENT_SCHEMA.fields().len());

    for expected in EVENT_SCHEMA.fields() {
        let name = expected.name();
        let Ok(idx) = batch.schema().index_of(name) else {
            // Only the optional date column can be missing after the check above
            fields.push(Arc::clone(expected));
            columns.push(arrow::array::new_null_array(
                expected.data_type(),
                batch.num_rows(),
            ));
            continue;
        };

        let column = batch.column(idx);
        if name == WORKS || column.data_type() == expected.data_type() {
            let schema = batch.schema();
            let field = schema.field(idx);
            fields.push(Arc::new(
                Field::new(name, field.data_type().clone(), field.is_nullable()),
            ));
            columns.push(Arc::clone(column));
        } else {
            info!(
                "Converting column '{name}' from {:?} to {:?}",
                column.data_type(),
                expected.data_type()
            );
            fields.push(Arc::new(Field::new(
                name,
                expected.data_type().clone(),
                expected.is_nullable() || column.null_count() > 0,
            )));
            columns.push(cast(column, expected.data_type())?);
        }
    }

    if let Some(idx) = fields.iter().position(|field| field.name() == GENRE) {
        columns[idx] = lowercase_strings(&columns[idx]);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Lower-case a `Utf8` column, returning it unchanged when nothing needs it
fn lowercase_strings(column: &ArrayRef) -> ArrayRef {
    let Some(strings) = column.as_any().downcast_ref::<StringArray>() else {
        return Arc::clone(column);
    };
    if !strings
        .iter()
        .flatten()
        .any(|value| value.chars().any(char::is_uppercase))
    {
        return Arc::clone(column);
    }
    Arc::new(
        strings
            .iter()
            .map(|value| value.map(str::to_lowercase))
            .collect::<StringArray>(),
    )
}
