//! Utility functions for error handling
//!
//! File system helpers that attach the path and the reason for access to
//! every failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(Error::file(path, format!("File not found, needed for {purpose}")));
    }

    if !path.is_file() {
        return Err(Error::file(path, format!("Expected a file for {purpose}")));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for {purpose}"),
        };
        Error::file_with_source(path, context, e)
    })
}

/// Safely create (or truncate) a file, creating missing parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::file_with_source(parent, format!("Failed to create directory for {purpose}"), e)
        })?;
    }

    fs::File::create(path).map_err(|e| {
        Error::file_with_source(path, format!("Failed to create file for {purpose}"), e)
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::file(path, format!("Directory not found, needed for {purpose}")));
    }

    if !path.is_dir() {
        return Err(Error::file(path, format!("Expected a directory for {purpose}")));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check directory permissions".to_string()
                }
                _ => format!("Failed to access directory for {purpose}"),
            };
            Err(Error::file_with_source(path, context, e))
        }
    }
}
