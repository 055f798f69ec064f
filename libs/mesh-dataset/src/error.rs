//! # Dataset Errors
//!
//! Error types for loading and constructing mesh datasets.

use crate::dataset::Association;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or constructing a dataset.
///
/// A `LoadError` is fatal to the load call only; the caller keeps whatever
/// dataset it had before.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset document could not be parsed.
    #[error("Malformed dataset: {message}")]
    Malformed { message: String },

    /// The dataset loaded but contains no points.
    #[error("Dataset contains no points")]
    Empty,

    /// The dataset violates a structural invariant.
    #[error("Invalid dataset: {message}")]
    Invalid { message: String },
}

impl LoadError {
    /// Creates a malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates an invariant-violation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

/// Result type alias for dataset construction and loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// A requested scalar array does not exist on the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No {association} array named '{name}'")]
pub struct ArrayNotFound {
    /// Association that was searched.
    pub association: Association,
    /// Requested array name.
    pub name: String,
}
