//! # Mesh Dataset
//!
//! In-memory mesh datasets for the extraction pipeline.
//!
//! ## Architecture
//!
//! ```text
//! file (JSON) → reader → Dataset { points, Topology, point/cell arrays }
//! ```
//!
//! ## Topologies
//!
//! - **Structured**: implicit regular grid, no stored coordinates
//! - **Unstructured**: explicit triangles, polygons, tetrahedra, hexahedra
//! - **Point cloud**: points without connectivity
//!
//! ## Usage
//!
//! ```rust
//! use mesh_dataset::sources;
//!
//! let dataset = sources::default_sphere().unwrap();
//! assert!(dataset.point_count() > 0);
//! assert_eq!(dataset.array_names().len(), 1);
//! ```

pub mod cell;
pub mod dataset;
pub mod error;
pub mod reader;
pub mod sources;
pub mod structured;

pub use cell::{Cell, CellKind, CellRef};
pub use dataset::{Association, Bounds, Dataset, DatasetKind, Topology};
pub use error::{ArrayNotFound, LoadError, LoadResult};
pub use reader::{load, load_with, DatasetReader, JsonReader};
pub use structured::StructuredGrid;
