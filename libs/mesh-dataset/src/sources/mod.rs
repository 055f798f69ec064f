//! # Procedural Sources
//!
//! Datasets generated in memory: the default sphere shown before any file is
//! loaded and synthetic structured volumes.

pub mod sphere;
pub mod volume;

pub use sphere::{default_sphere, resolution_sphere, sphere};
pub use volume::structured_volume;
