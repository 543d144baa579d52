//! Utilities for working with Arrow arrays.
//!
//! Typed column access with errors that name the column and the type that
//! was expected.

use arrow::array::{Array, ArrayRef, Int32Array, ListArray, StringArray, StructArray};
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

/// Get a column from a record batch by name
///
/// # Errors
/// Returns `ColumnNotFound` if the batch has no such column
pub fn get_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(column_name)
        .ok_or_else(|| Error::column_not_found(column_name))
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
///
/// # Arguments
///
/// * `array` - The array to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a dyn Array,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| Error::invalid_type(column_name, expected_type_name))
}

/// Get a Utf8 column
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
    downcast_array::<StringArray>(get_column(batch, column_name)?.as_ref(), column_name, "Utf8")
}

/// Get an Int32 column
pub fn int32_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Int32Array> {
    downcast_array::<Int32Array>(get_column(batch, column_name)?.as_ref(), column_name, "Int32")
}

/// Get a list column
pub fn list_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ListArray> {
    downcast_array::<ListArray>(get_column(batch, column_name)?.as_ref(), column_name, "List")
}

/// The flattened struct entries behind a list-of-struct column
pub fn list_struct_values<'a>(list: &'a ListArray, column_name: &str) -> Result<&'a StructArray> {
    downcast_array::<StructArray>(list.values().as_ref(), column_name, "List<Struct>")
}

/// Iterate over the non-null, non-empty values of a string array
pub fn present_strings(array: &StringArray) -> impl Iterator<Item = &str> {
    array.iter().flatten().filter(|value| !value.is_empty())
}
