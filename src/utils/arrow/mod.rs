//! Arrow data handling utilities

pub mod array_utils;

pub use array_utils::{
    downcast_array, get_column, int32_column, list_column, list_struct_values,
    present_strings, string_column,
};
