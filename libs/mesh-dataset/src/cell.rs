//! # Cells
//!
//! Cell kinds, explicit cells and the edge/face tables used by slicing and
//! surface extraction. Point orderings follow the VTK conventions.

use serde::{Deserialize, Serialize};

// =============================================================================
// TOPOLOGY TABLES
// =============================================================================

const TETRA_EDGES: [(usize, usize); 6] = [(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)];

const HEXA_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

const TETRA_FACES: [&[usize]; 4] = [&[0, 1, 3], &[1, 2, 3], &[2, 0, 3], &[0, 2, 1]];

const HEXA_FACES: [&[usize]; 6] = [
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];

// =============================================================================
// CELL KIND
// =============================================================================

/// Kind tag of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Three-point surface cell.
    Triangle,
    /// Four-point volume cell.
    Tetrahedron,
    /// Eight-point volume cell; bottom face `0..4`, top face `4..8`.
    Hexahedron,
    /// Planar surface cell with three or more points.
    Polygon,
    /// Implicit hexahedron of a structured grid. Never stored explicitly;
    /// point order matches [`CellKind::Hexahedron`].
    StructuredVolume,
}

impl CellKind {
    /// Returns true for surface cells that the packer can consume directly.
    #[inline]
    pub fn is_surface(self) -> bool {
        matches!(self, CellKind::Triangle | CellKind::Polygon)
    }

    /// Returns true for volume cells.
    #[inline]
    pub fn is_volume(self) -> bool {
        !self.is_surface()
    }

    /// Checks a point count against the kind.
    pub fn accepts_point_count(self, count: usize) -> bool {
        match self {
            CellKind::Triangle => count == 3,
            CellKind::Tetrahedron => count == 4,
            CellKind::Hexahedron | CellKind::StructuredVolume => count == 8,
            CellKind::Polygon => count >= 3,
        }
    }

    /// Calls `f` with each edge as a pair of local point positions.
    ///
    /// Surface cells report their boundary loop.
    pub fn for_each_edge(self, point_count: usize, mut f: impl FnMut(usize, usize)) {
        match self {
            CellKind::Tetrahedron => TETRA_EDGES.iter().for_each(|&(a, b)| f(a, b)),
            CellKind::Hexahedron | CellKind::StructuredVolume => {
                HEXA_EDGES.iter().for_each(|&(a, b)| f(a, b))
            }
            CellKind::Triangle | CellKind::Polygon => {
                for a in 0..point_count {
                    f(a, (a + 1) % point_count);
                }
            }
        }
    }

    /// Faces of a volume cell as local point positions, wound outward for a
    /// positively oriented cell. Surface cells have no faces.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            CellKind::Tetrahedron => &TETRA_FACES,
            CellKind::Hexahedron | CellKind::StructuredVolume => &HEXA_FACES,
            CellKind::Triangle | CellKind::Polygon => &[],
        }
    }
}

// =============================================================================
// CELLS
// =============================================================================

/// An explicit cell: kind tag plus ordered point indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Kind tag.
    pub kind: CellKind,
    /// Point indices in kind-specific order.
    pub indices: Vec<u32>,
}

impl Cell {
    /// Creates a cell.
    pub fn new(kind: CellKind, indices: Vec<u32>) -> Self {
        Self { kind, indices }
    }

    /// Creates a triangle.
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self::new(CellKind::Triangle, vec![a, b, c])
    }

    /// Creates a tetrahedron.
    pub fn tetrahedron(indices: [u32; 4]) -> Self {
        Self::new(CellKind::Tetrahedron, indices.to_vec())
    }

    /// Creates a hexahedron.
    pub fn hexahedron(indices: [u32; 8]) -> Self {
        Self::new(CellKind::Hexahedron, indices.to_vec())
    }

    /// Creates a polygon.
    pub fn polygon(indices: Vec<u32>) -> Self {
        Self::new(CellKind::Polygon, indices)
    }

    /// Borrows this cell as a [`CellRef`].
    #[inline]
    pub fn view(&self) -> CellRef<'_> {
        CellRef {
            kind: self.kind,
            points: CellPoints::Borrowed(&self.indices),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CellPoints<'a> {
    Borrowed(&'a [u32]),
    Implicit([u32; 8]),
}

/// A cell view that is either borrowed from an explicit cell list or
/// computed from a structured grid.
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    /// Kind tag.
    pub kind: CellKind,
    points: CellPoints<'a>,
}

impl<'a> CellRef<'a> {
    /// Creates a view of an implicit structured-grid hexahedron.
    pub(crate) fn implicit(points: [u32; 8]) -> Self {
        Self {
            kind: CellKind::StructuredVolume,
            points: CellPoints::Implicit(points),
        }
    }

    /// Point indices of the cell.
    #[inline]
    pub fn point_ids(&self) -> &[u32] {
        match &self.points {
            CellPoints::Borrowed(ids) => ids,
            CellPoints::Implicit(ids) => ids,
        }
    }

    /// Number of points of the cell.
    #[inline]
    pub fn len(&self) -> usize {
        self.point_ids().len()
    }

    /// Returns true if the cell has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_ids().is_empty()
    }
}
