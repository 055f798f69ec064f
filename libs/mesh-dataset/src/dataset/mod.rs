//! # Mesh Dataset
//!
//! In-memory mesh: points, a closed [`Topology`] and named scalar arrays.
//!
//! A [`Dataset`] is immutable once built. Slicing and decimation never
//! mutate their input; they build a new dataset from its parts.
//!
//! ## Example
//!
//! ```rust
//! use mesh_dataset::{Association, Cell, Dataset, DatasetKind, Topology};
//! use glam::DVec3;
//!
//! let points = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
//! let dataset = Dataset::new(points, Topology::Unstructured(vec![Cell::triangle(0, 1, 2)]))
//!     .unwrap()
//!     .with_point_array("Height", vec![0.0, 1.0, 2.0])
//!     .unwrap();
//!
//! assert_eq!(dataset.kind(), DatasetKind::Polygonal);
//! assert_eq!(dataset.active_scalar(Association::Point, "Height").unwrap().len(), 3);
//! ```

mod bounds;


pub use bounds::Bounds;

use crate::cell::{Cell, CellKind, CellRef};
use crate::error::{ArrayNotFound, LoadError, LoadResult};
use crate::structured::StructuredGrid;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// ASSOCIATION
// =============================================================================

/// Whether a scalar array holds one value per point or one per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    /// One value per point.
    Point,
    /// One value per cell.
    Cell,
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Association::Point => write!(f, "point"),
            Association::Cell => write!(f, "cell"),
        }
    }
}

// =============================================================================
// TOPOLOGY
// =============================================================================

/// Connectivity of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Topology {
    /// Implicit regular grid. Points and hexahedra are computed on demand.
    Structured(StructuredGrid),
    /// Explicit cell list over the dataset points.
    Unstructured(Vec<Cell>),
    /// Bare points without connectivity.
    PointCloud,
}

/// Coarse classification used to pick a surface extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Structured grid.
    Structured,
    /// Unstructured, surface cells only.
    Polygonal,
    /// Unstructured, at least one volume cell.
    Volumetric,
    /// No connectivity.
    PointCloud,
}

// =============================================================================
// DATASET
// =============================================================================

/// An immutable mesh dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Explicit points; empty for structured topologies.
    points: Vec<DVec3>,
    topology: Topology,
    point_data: BTreeMap<String, Vec<f64>>,
    cell_data: BTreeMap<String, Vec<f64>>,
    bounds: Bounds,
}

impl Dataset {
    /// Builds a dataset, checking that every cell references existing points
    /// and matches its kind's point count.
    ///
    /// Structured topologies compute their points, so `points` must be empty.
    pub fn new(points: Vec<DVec3>, topology: Topology) -> LoadResult<Self> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LoadError::invalid(format!(
                "point {} has a non-finite coordinate",
                index
            )));
        }
        if points.len() > u32::MAX as usize {
            return Err(LoadError::invalid("point count exceeds the index range"));
        }

        let bounds = match &topology {
            Topology::Structured(grid) => {
                if !points.is_empty() {
                    return Err(LoadError::invalid(
                        "structured datasets compute their points; explicit points given",
                    ));
                }
                let (min, max) = grid.corners();
                Bounds::new(min, max)
            }
            Topology::Unstructured(cells) => {
                validate_cells(cells, points.len())?;
                Bounds::from_points(points.iter().copied()).unwrap_or_default()
            }
            Topology::PointCloud => Bounds::from_points(points.iter().copied()).unwrap_or_default(),
        };

        Ok(Self {
            points,
            topology,
            point_data: BTreeMap::new(),
            cell_data: BTreeMap::new(),
            bounds,
        })
    }

    /// Builds a structured dataset.
    pub fn structured(grid: StructuredGrid) -> Self {
        let (min, max) = grid.corners();
        Self {
            points: Vec::new(),
            topology: Topology::Structured(grid),
            point_data: BTreeMap::new(),
            cell_data: BTreeMap::new(),
            bounds: Bounds::new(min, max),
        }
    }

    /// Adds a point array, replacing any array with the same name.
    pub fn with_point_array(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> LoadResult<Self> {
        let name = name.into();
        if values.len() != self.point_count() {
            return Err(LoadError::invalid(format!(
                "point array '{}' has {} values, expected {}",
                name,
                values.len(),
                self.point_count()
            )));
        }
        self.point_data.insert(name, values);
        Ok(self)
    }

    /// Adds a cell array, replacing any array with the same name.
    pub fn with_cell_array(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> LoadResult<Self> {
        let name = name.into();
        if values.len() != self.cell_count() {
            return Err(LoadError::invalid(format!(
                "cell array '{}' has {} values, expected {}",
                name,
                values.len(),
                self.cell_count()
            )));
        }
        self.cell_data.insert(name, values);
        Ok(self)
    }

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    /// Connectivity.
    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Classification used by surface extraction.
    pub fn kind(&self) -> DatasetKind {
        match &self.topology {
            Topology::Structured(_) => DatasetKind::Structured,
            Topology::PointCloud => DatasetKind::PointCloud,
            Topology::Unstructured(cells) => {
                if cells.iter().any(|c| c.kind.is_volume()) {
                    DatasetKind::Volumetric
                } else {
                    DatasetKind::Polygonal
                }
            }
        }
    }

    /// Number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        match &self.topology {
            Topology::Structured(grid) => grid.point_count(),
            _ => self.points.len(),
        }
    }

    /// Number of cells. Point clouds have none.
    #[inline]
    pub fn cell_count(&self) -> usize {
        match &self.topology {
            Topology::Structured(grid) => grid.cell_count(),
            Topology::Unstructured(cells) => cells.len(),
            Topology::PointCloud => 0,
        }
    }

    /// Position of point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= point_count()` for explicit topologies.
    #[inline]
    pub fn point(&self, index: usize) -> DVec3 {
        match &self.topology {
            Topology::Structured(grid) => grid.point(index),
            _ => self.points[index],
        }
    }

    /// Explicit point storage. Empty for structured datasets; use
    /// [`Dataset::point`] to address points uniformly.
    #[inline]
    pub fn explicit_points(&self) -> &[DVec3] {
        &self.points
    }

    /// Cell `index`, borrowed or computed from the grid.
    pub fn cell(&self, index: usize) -> Option<CellRef<'_>> {
        if index >= self.cell_count() {
            return None;
        }
        match &self.topology {
            Topology::Structured(grid) => Some(grid.cell(index)),
            Topology::Unstructured(cells) => cells.get(index).map(Cell::view),
            Topology::PointCloud => None,
        }
    }

    /// Iterates over every cell in index order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef<'_>> + '_ {
        (0..self.cell_count()).filter_map(move |index| self.cell(index))
    }

    /// Bounding box of all points.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    // =========================================================================
    // SCALAR ARRAYS
    // =========================================================================

    /// Names of every scalar array, point arrays first, each group sorted.
    pub fn array_names(&self) -> Vec<(Association, String)> {
        self.point_data
            .keys()
            .map(|name| (Association::Point, name.clone()))
            .chain(
                self.cell_data
                    .keys()
                    .map(|name| (Association::Cell, name.clone())),
            )
            .collect()
    }

    /// Values of the named array.
    pub fn active_scalar(
        &self,
        association: Association,
        name: &str,
    ) -> Result<&[f64], ArrayNotFound> {
        let arrays = match association {
            Association::Point => &self.point_data,
            Association::Cell => &self.cell_data,
        };
        arrays
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ArrayNotFound {
                association,
                name: name.to_string(),
            })
    }

    /// Every point array by name.
    #[inline]
    pub fn point_data(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.point_data
    }

    /// Every cell array by name.
    #[inline]
    pub fn cell_data(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.cell_data
    }
}

fn validate_cells(cells: &[Cell], point_count: usize) -> LoadResult<()> {
    for (index, cell) in cells.iter().enumerate() {
        if cell.kind == CellKind::StructuredVolume {
            return Err(LoadError::invalid(format!(
                "cell {} is an implicit structured cell in an explicit cell list",
                index
            )));
        }
        if !cell.kind.accepts_point_count(cell.indices.len()) {
            return Err(LoadError::invalid(format!(
                "cell {} of kind {:?} has {} points",
                index,
                cell.kind,
                cell.indices.len()
            )));
        }
        if let Some(&bad) = cell.indices.iter().find(|&&p| p as usize >= point_count) {
            return Err(LoadError::invalid(format!(
                "cell {} references point {} but the dataset has {} points",
                index, bad, point_count
            )));
        }
    }
    Ok(())
}
