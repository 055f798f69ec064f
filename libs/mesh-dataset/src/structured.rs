//! # Structured Grid
//!
//! Implicit regular grid: points and hexahedral cells are computed from the
//! grid dimensions, origin and spacing instead of being stored.

use crate::cell::CellRef;
use crate::error::{LoadError, LoadResult};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A regular grid of `nx * ny * nz` points.
///
/// Point `(i, j, k)` has index `i + nx * (j + ny * k)` and position
/// `origin + (i, j, k) * spacing`.
///
/// # Example
///
/// ```rust
/// use mesh_dataset::StructuredGrid;
/// use glam::DVec3;
///
/// let grid = StructuredGrid::new([3, 3, 3], DVec3::ZERO, DVec3::ONE).unwrap();
/// assert_eq!(grid.point_count(), 27);
/// assert_eq!(grid.cell_count(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructuredGrid {
    dims: [usize; 3],
    origin: DVec3,
    spacing: DVec3,
}

impl StructuredGrid {
    /// Creates a grid, rejecting zero dimensions and non-positive spacing.
    pub fn new(dims: [usize; 3], origin: DVec3, spacing: DVec3) -> LoadResult<Self> {
        if dims.iter().any(|&n| n == 0) {
            return Err(LoadError::invalid(format!(
                "structured dimensions must be positive: {:?}",
                dims
            )));
        }
        if !(spacing.x > 0.0 && spacing.y > 0.0 && spacing.z > 0.0) || !origin.is_finite() {
            return Err(LoadError::invalid(format!(
                "structured spacing must be positive and finite: {}",
                spacing
            )));
        }
        if dims
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .map_or(true, |count| count > u32::MAX as usize)
        {
            return Err(LoadError::invalid(format!(
                "structured grid {:?} exceeds the addressable point count",
                dims
            )));
        }
        Ok(Self {
            dims,
            origin,
            spacing,
        })
    }

    /// Point dimensions `[nx, ny, nz]`.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Position of point `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Distance between neighbouring points along each axis.
    #[inline]
    pub fn spacing(&self) -> DVec3 {
        self.spacing
    }

    /// Number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Cell dimensions (one less than the point dimensions, never negative).
    #[inline]
    pub fn cell_dims(&self) -> [usize; 3] {
        [
            self.dims[0].saturating_sub(1),
            self.dims[1].saturating_sub(1),
            self.dims[2].saturating_sub(1),
        ]
    }

    /// Number of implicit hexahedra.
    #[inline]
    pub fn cell_count(&self) -> usize {
        let [cx, cy, cz] = self.cell_dims();
        cx * cy * cz
    }

    /// Linear index of point `(i, j, k)`.
    #[inline]
    pub fn point_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.dims[0] * (j + self.dims[1] * k)
    }

    /// Position of point `(i, j, k)`.
    #[inline]
    pub fn position(&self, i: usize, j: usize, k: usize) -> DVec3 {
        self.origin + DVec3::new(i as f64, j as f64, k as f64) * self.spacing
    }

    /// Position of the point with linear index `index`.
    #[inline]
    pub fn point(&self, index: usize) -> DVec3 {
        let nx = self.dims[0];
        let ny = self.dims[1];
        let i = index % nx;
        let j = (index / nx) % ny;
        let k = index / (nx * ny);
        self.position(i, j, k)
    }

    /// Point indices of the hexahedron whose minimum corner is `(i, j, k)`.
    pub fn hexahedron_at(&self, i: usize, j: usize, k: usize) -> [u32; 8] {
        let p = |di: usize, dj: usize, dk: usize| self.point_index(i + di, j + dj, k + dk) as u32;
        [
            p(0, 0, 0),
            p(1, 0, 0),
            p(1, 1, 0),
            p(0, 1, 0),
            p(0, 0, 1),
            p(1, 0, 1),
            p(1, 1, 1),
            p(0, 1, 1),
        ]
    }

    /// Implicit cell with linear index `index`.
    pub fn cell(&self, index: usize) -> CellRef<'static> {
        let [cx, cy, _] = self.cell_dims();
        let i = index % cx;
        let j = (index / cx) % cy;
        let k = index / (cx * cy);
        CellRef::implicit(self.hexahedron_at(i, j, k))
    }

    /// Minimum and maximum corners.
    pub fn corners(&self) -> (DVec3, DVec3) {
        let far = self.position(self.dims[0] - 1, self.dims[1] - 1, self.dims[2] - 1);
        (self.origin, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_roundtrip_index() {
        let grid = StructuredGrid::new([4, 3, 2], DVec3::new(1.0, 2.0, 3.0), DVec3::splat(0.5))
            .unwrap();
        let index = grid.point_index(3, 2, 1);
        assert_eq!(index, 3 + 4 * (2 + 3));
        assert_eq!(grid.point(index), DVec3::new(2.5, 3.0, 3.5));
    }

    #[test]
    fn test_cell_count() {
        let grid = StructuredGrid::new([100, 100, 100], DVec3::ZERO, DVec3::ONE).unwrap();
        assert_eq!(grid.point_count(), 1_000_000);
        assert_eq!(grid.cell_count(), 99 * 99 * 99);
    }

    #[test]
    fn test_flat_grid_has_no_cells() {
        let grid = StructuredGrid::new([5, 5, 1], DVec3::ZERO, DVec3::ONE).unwrap();
        assert_eq!(grid.cell_count(), 0);
    }

    #[test]
    fn test_hexahedron_corner_order() {
        let grid = StructuredGrid::new([2, 2, 2], DVec3::ZERO, DVec3::ONE).unwrap();
        let cell = grid.cell(0);
        let corners: Vec<DVec3> = cell
            .point_ids()
            .iter()
            .map(|&p| grid.point(p as usize))
            .collect();
        assert_eq!(corners[0], DVec3::ZERO);
        assert_eq!(corners[1], DVec3::X);
        assert_eq!(corners[2], DVec3::new(1.0, 1.0, 0.0));
        assert_eq!(corners[3], DVec3::Y);
        assert_eq!(corners[6], DVec3::ONE);
    }

    #[test]
    fn test_invalid_grids_rejected() {
        assert!(StructuredGrid::new([0, 2, 2], DVec3::ZERO, DVec3::ONE).is_err());
        assert!(StructuredGrid::new([2, 2, 2], DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_corners() {
        let grid = StructuredGrid::new([3, 5, 2], DVec3::splat(-1.0), DVec3::ONE).unwrap();
        let (min, max) = grid.corners();
        assert_eq!(min, DVec3::splat(-1.0));
        assert_eq!(max, DVec3::new(1.0, 3.0, 0.0));
    }
}
