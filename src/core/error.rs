//! Error types for data file loading.

use thiserror::Error;

/// Errors that can occur when loading RON data files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File or directory could not be found.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    Read { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// The file parsed but its contents make no sense.
    #[error("Invalid data in '{path}': {details}")]
    Invalid { path: String, details: String },
}
