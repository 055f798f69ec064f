//! # Dataset Readers
//!
//! Loading datasets from disk. [`load`] reads the bundled JSON document
//! format; other formats plug in through [`DatasetReader`] and [`load_with`].
//!
//! ## JSON document
//!
//! ```json
//! {
//!   "points": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
//!   "cells": [{ "kind": "triangle", "indices": [0, 1, 2] }],
//!   "point_data": { "Temperature": [20.0, 50.0, 90.0] },
//!   "cell_data": { "Pressure": [1.0] }
//! }
//! ```
//!
//! A `structured` object (`dims`, `origin`, `spacing`) replaces `points` and
//! `cells` for regular grids. A document with points but neither `cells` nor
//! `structured` is a point cloud.

use crate::cell::Cell;
use crate::dataset::{Dataset, Topology};
use crate::error::{LoadError, LoadResult};
use crate::structured::StructuredGrid;
use glam::DVec3;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Source of datasets.
pub trait DatasetReader {
    /// Reads and validates the dataset at `path`.
    fn read(&self, path: &Path) -> LoadResult<Dataset>;
}

/// Reader for the JSON document format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl JsonReader {
    /// Parses a JSON document held in memory.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_dataset::{DatasetKind, JsonReader};
    ///
    /// let dataset = JsonReader::parse(r#"{ "points": [[0, 0, 0], [1, 1, 1]] }"#).unwrap();
    /// assert_eq!(dataset.kind(), DatasetKind::PointCloud);
    /// ```
    pub fn parse(text: &str) -> LoadResult<Dataset> {
        let document: DatasetDocument = serde_json::from_str(text)?;
        document.into_dataset()
    }
}

impl DatasetReader for JsonReader {
    fn read(&self, path: &Path) -> LoadResult<Dataset> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(&text)?;
        log::debug!(
            "Loaded {} ({} points, {} cells)",
            path.display(),
            dataset.point_count(),
            dataset.cell_count()
        );
        Ok(dataset)
    }
}

/// Loads a dataset with the JSON reader.
///
/// # Errors
///
/// Returns [`LoadError`] when the file is missing or unreadable, the
/// document is malformed, an invariant is violated, or no points remain.
pub fn load(path: impl AsRef<Path>) -> LoadResult<Dataset> {
    load_with(&JsonReader, path)
}

/// Loads a dataset with an arbitrary reader.
pub fn load_with<R: DatasetReader + ?Sized>(
    reader: &R,
    path: impl AsRef<Path>,
) -> LoadResult<Dataset> {
    reader.read(path.as_ref())
}

// =============================================================================
// DOCUMENT
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetDocument {
    #[serde(default)]
    points: Vec<DVec3>,
    #[serde(default)]
    cells: Option<Vec<Cell>>,
    #[serde(default)]
    structured: Option<StructuredDocument>,
    #[serde(default)]
    point_data: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    cell_data: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StructuredDocument {
    dims: [usize; 3],
    #[serde(default)]
    origin: Option<DVec3>,
    #[serde(default)]
    spacing: Option<DVec3>,
}

impl DatasetDocument {
    fn into_dataset(self) -> LoadResult<Dataset> {
        let dataset = match (self.structured, self.cells) {
            (Some(_), Some(_)) => {
                return Err(LoadError::malformed(
                    "a document cannot hold both 'structured' and 'cells'",
                ))
            }
            (Some(grid), None) => {
                let grid = StructuredGrid::new(
                    grid.dims,
                    grid.origin.unwrap_or(DVec3::ZERO),
                    grid.spacing.unwrap_or(DVec3::ONE),
                )?;
                Dataset::new(self.points, Topology::Structured(grid))?
            }
            (None, Some(cells)) => Dataset::new(self.points, Topology::Unstructured(cells))?,
            (None, None) => Dataset::new(self.points, Topology::PointCloud)?,
        };

        if dataset.point_count() == 0 {
            return Err(LoadError::Empty);
        }

        let dataset = self
            .point_data
            .into_iter()
            .try_fold(dataset, |ds, (name, values)| {
                ds.with_point_array(name, values)
            })?;
        self.cell_data
            .into_iter()
            .try_fold(dataset, |ds, (name, values)| {
                ds.with_cell_array(name, values)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Association, DatasetKind};
    use std::io::Write;

    const TETRA_DOC: &str = r#"{
        "points": [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]],
        "cells": [{ "kind": "tetrahedron", "indices": [0, 1, 2, 3] }],
        "point_data": { "Temperature": [20.0, 40.0, 60.0, 90.0] },
        "cell_data": { "Pressure": [3.5] }
    }"#;

    #[test]
    fn test_parse_unstructured() {
        let dataset = JsonReader::parse(TETRA_DOC).unwrap();
        assert_eq!(dataset.kind(), DatasetKind::Volumetric);
        assert_eq!(dataset.point_count(), 4);
        assert_eq!(dataset.cell_count(), 1);
        let temperature = dataset
            .active_scalar(Association::Point, "Temperature")
            .unwrap();
        assert_eq!(temperature[3], 90.0);
    }

    #[test]
    fn test_parse_structured() {
        let doc = r#"{
            "structured": { "dims": [3, 4, 5], "origin": [1, 1, 1], "spacing": [0.5, 0.5, 0.5] },
            "point_data": { "Density": [] }
        }"#;
        // Density has the wrong length on purpose.
        assert!(matches!(JsonReader::parse(doc), Err(LoadError::Invalid { .. })));

        let doc = r#"{ "structured": { "dims": [3, 4, 5] } }"#;
        let dataset = JsonReader::parse(doc).unwrap();
        assert_eq!(dataset.kind(), DatasetKind::Structured);
        assert_eq!(dataset.point_count(), 60);
        assert_eq!(dataset.cell_count(), 2 * 3 * 4);
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert!(matches!(JsonReader::parse(r#"{ "points": [] }"#), Err(LoadError::Empty)));
        assert!(matches!(
            JsonReader::parse("{ not json"),
            Err(LoadError::Malformed { .. })
        ));
        assert!(matches!(
            JsonReader::parse(r#"{ "points": [[0,0,0]], "vertices": [] }"#),
            Err(LoadError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_index() {
        let doc = r#"{
            "points": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
            "cells": [{ "kind": "triangle", "indices": [0, 1, 7] }]
        }"#;
        assert!(matches!(JsonReader::parse(doc), Err(LoadError::Invalid { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let path =
            std::env::temp_dir().join(format!("mesh-dataset-load-{}.json", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(TETRA_DOC.as_bytes()).unwrap();
        }
        let dataset = load(&path).unwrap();
        assert_eq!(dataset.cell_count(), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("not/here.json"));
    }

    #[test]
    fn test_load_with_custom_reader() {
        struct Fixed;
        impl DatasetReader for Fixed {
            fn read(&self, _path: &Path) -> LoadResult<Dataset> {
                JsonReader::parse(r#"{ "points": [[0, 0, 0]] }"#)
            }
        }
        let dataset = load_with(&Fixed, "ignored").unwrap();
        assert_eq!(dataset.point_count(), 1);
    }
}
