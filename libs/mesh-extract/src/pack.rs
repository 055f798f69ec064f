//! # Geometry Packer
//!
//! Flattens a polygonal dataset and its per-point colors into the buffers
//! handed to the renderer.
//!
//! Polygons are fan-triangulated as `(v0, vi, vi+1)`. Non-convex polygons
//! keep the fan and may render with overlapping triangles.

use glam::DVec3;
use mesh_dataset::Dataset;
use serde::{Deserialize, Serialize};

/// Render-ready buffers.
///
/// # Invariants
///
/// - `positions.len() == colors.len() == 3 * vertex_count`
/// - `indices.len() == 3 * triangle_count`
/// - every index is `< vertex_count`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackedGeometry {
    /// `x, y, z` per vertex.
    pub positions: Vec<f32>,
    /// Three vertex indices per triangle.
    pub indices: Vec<u32>,
    /// `r, g, b` in `[0, 1]` per vertex.
    pub colors: Vec<f32>,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub opacity: f32,
    pub wireframe: bool,
}

impl PackedGeometry {
    /// Checks every invariant.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertex_count;
        self.positions.len() == 3 * vertex_count
            && self.colors.len() == self.positions.len()
            && self.indices.len() == 3 * self.triangle_count
            && self.indices.iter().all(|&i| (i as usize) < vertex_count)
            && self.colors.iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Serializes the renderer record.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Minimum and maximum vertex position, or `None` without vertices.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let points = self
            .positions
            .chunks_exact(3)
            .map(|p| DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64));
        mesh_dataset::Bounds::from_points(points).map(|b| (b.min, b.max))
    }
}

/// Packs the surface cells of `surface` with one color per point.
///
/// Volume cells are skipped; run surface extraction first. A dataset with
/// points but no polygons packs to an empty index buffer.
///
/// # Panics
///
/// Panics if `colors.len() != surface.point_count()`.
///
/// # Example
///
/// ```rust
/// use mesh_dataset::{Cell, Dataset, Topology};
/// use mesh_extract::pack::pack;
/// use glam::DVec3;
///
/// let quad = Dataset::new(
///     vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
///     Topology::Unstructured(vec![Cell::polygon(vec![0, 1, 2, 3])]),
/// )
/// .unwrap();
/// let packed = pack(&quad, &[[1.0, 0.5, 0.0]; 4], 1.0, false);
/// assert_eq!(packed.indices, vec![0, 1, 2, 0, 2, 3]);
/// ```
pub fn pack(
    surface: &Dataset,
    colors: &[[f32; 3]],
    opacity: f32,
    wireframe: bool,
) -> PackedGeometry {
    assert_eq!(
        colors.len(),
        surface.point_count(),
        "one color per point is required"
    );

    let vertex_count = surface.point_count();
    let mut positions = Vec::with_capacity(vertex_count * 3);
    for i in 0..vertex_count {
        let p = surface.point(i);
        positions.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
    }

    let mut indices = Vec::new();
    for cell in surface.cells().filter(|c| c.kind.is_surface()) {
        let ids = cell.point_ids();
        for i in 1..ids.len().saturating_sub(1) {
            indices.extend_from_slice(&[ids[0], ids[i], ids[i + 1]]);
        }
    }
    debug_assert!(indices.iter().all(|&i| (i as usize) < vertex_count));

    PackedGeometry {
        positions,
        triangle_count: indices.len() / 3,
        indices,
        colors: colors.iter().flatten().copied().collect(),
        vertex_count,
        opacity,
        wireframe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_dataset::{Cell, Topology};

    #[test]
    fn test_fan_triangulation() {
        let pentagon = Dataset::new(
            (0..5)
                .map(|i| {
                    let a = i as f64 * std::f64::consts::TAU / 5.0;
                    DVec3::new(a.cos(), a.sin(), 0.0)
                })
                .collect(),
            Topology::Unstructured(vec![Cell::polygon(vec![0, 1, 2, 3, 4])]),
        )
        .unwrap();
        let packed = pack(&pentagon, &[[0.0, 0.0, 1.0]; 5], 0.5, true);
        assert_eq!(packed.triangle_count, 3);
        assert_eq!(packed.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
        assert_eq!(packed.opacity, 0.5);
        assert!(packed.wireframe);
        assert!(packed.validate());
    }

    #[test]
    fn test_points_without_polygons() {
        let cloud = Dataset::new(vec![DVec3::ZERO, DVec3::X], Topology::PointCloud).unwrap();
        let packed = pack(&cloud, &[[1.0, 0.5, 0.0]; 2], 1.0, false);
        assert_eq!(packed.vertex_count, 2);
        assert!(packed.indices.is_empty());
        assert_eq!(packed.triangle_count, 0);
        assert!(packed.validate());
    }

    #[test]
    fn test_volume_cells_skipped() {
        let tet = Dataset::new(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
            Topology::Unstructured(vec![Cell::tetrahedron([0, 1, 2, 3])]),
        )
        .unwrap();
        let packed = pack(&tet, &[[0.0; 3]; 4], 1.0, false);
        assert_eq!(packed.triangle_count, 0);
    }

    #[test]
    fn test_validate_catches_bad_index() {
        let mut packed = PackedGeometry {
            positions: vec![0.0; 9],
            indices: vec![0, 1, 2],
            colors: vec![0.5; 9],
            vertex_count: 3,
            triangle_count: 1,
            opacity: 1.0,
            wireframe: false,
        };
        assert!(packed.validate());
        packed.indices[2] = 3;
        assert!(!packed.validate());
    }

    #[test]
    fn test_json_field_names() {
        let packed = PackedGeometry {
            opacity: 1.0,
            ..PackedGeometry::default()
        };
        let json: serde_json::Value = serde_json::from_str(&packed.to_json().unwrap()).unwrap();
        for key in [
            "positions",
            "indices",
            "colors",
            "vertex_count",
            "triangle_count",
            "opacity",
            "wireframe",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
