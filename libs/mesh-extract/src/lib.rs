//! # Mesh Extract
//!
//! Slicing and render-geometry extraction for mesh datasets.
//! Turns a [`mesh_dataset::Dataset`] plus a request into flat buffers a
//! browser renderer can upload directly.
//!
//! ## Architecture
//!
//! ```text
//! ExtractParams ─┐
//!                ├→ slice → decimate / surface → color → pack → PackedGeometry
//! Dataset ───────┘                                                  │
//!                                         Session (version + cache) ┘
//! ```
//!
//! ## Algorithms
//!
//! - **Slicing**: signed distances, edge interpolation, angular ordering
//! - **Surfaces**: boundary faces of volume cells, outer quads of grids
//! - **Point clouds**: Bowyer–Watson Delaunay tetrahedralization
//! - **Decimation**: strided hexahedra for large structured grids
//! - **Color**: 256-entry hue lookup table, blue to red
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use mesh_dataset::sources::structured_volume;
//! use mesh_extract::{extract, Axis, ExtractParams, FieldSelection};
//!
//! let volume = structured_volume([8, 8, 8], DVec3::ZERO, DVec3::ONE).unwrap();
//! let params = ExtractParams::default()
//!     .with_field(FieldSelection::point("Distance"))
//!     .with_slice(Axis::Z, 0.0);
//! let extraction = extract(&volume, &params).unwrap();
//! assert!(extraction.warnings.is_empty());
//! assert_eq!(extraction.geometry.indices.len() % 3, 0);
//! ```

pub mod cache;
pub mod color;
pub mod decimate;
pub mod error;
pub mod pack;
pub mod params;
pub mod pipeline;
pub mod session;
pub mod slice;

pub use cache::{CacheStats, ExtractionCache, Fingerprint};
pub use color::LookupTable;
pub use error::{ExtractError, ExtractResult, ExtractWarning};
pub use pack::PackedGeometry;
pub use params::{Axis, ExtractParams, FieldSelection};
pub use pipeline::{extract, extract_with, slice_or_fallback, Extraction};
pub use session::Session;
pub use slice::SlicePlane;
