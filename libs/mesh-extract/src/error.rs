//! # Extraction Errors
//!
//! Fatal errors of an extraction request, and the recoverable warnings that
//! travel alongside a successful result.

use config::constants::ConfigError;
use mesh_dataset::{ArrayNotFound, LoadError};
use thiserror::Error;

/// Errors that abort an extraction request.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A request parameter is out of range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// The request could not be parsed.
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// The session has no dataset to extract from.
    #[error("No dataset loaded")]
    NoDataset,

    /// Loading the dataset failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// The extraction settings are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ExtractError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Result type alias for extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// A condition the pipeline recovered from.
///
/// Warnings never invalidate the geometry they accompany.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractWarning {
    /// Every slice plane missed the dataset; the unsliced surface was used.
    #[error("Slicing with {planes} plane(s) produced no polygons; showing the unsliced dataset")]
    EmptySlice { planes: usize },

    /// The geometry exceeds the render budget. It is returned untruncated.
    #[error(
        "Geometry exceeds the render budget: {vertex_count} vertices (max {max_vertices}), \
         {triangle_count} triangles (max {max_triangles})"
    )]
    Oversize {
        vertex_count: usize,
        triangle_count: usize,
        max_vertices: usize,
        max_triangles: usize,
    },

    /// The selected field is missing; colored by elevation instead.
    #[error("{0}; coloring by elevation")]
    ArrayNotFound(ArrayNotFound),
}
