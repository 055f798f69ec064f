//! # Delaunay Tetrahedralization
//!
//! Bowyer–Watson insertion with exact `orient3d` / `insphere` predicates
//! from the `robust` crate.
//!
//! ## Algorithm
//!
//! 1. Merge points closer than `tolerance * diagonal`
//! 2. Start from a super-tetrahedron enclosing the bounding box
//! 3. Insert points in Morton order. Each insertion walks across faces to
//!    the tetrahedron containing the point, grows the cavity of tetrahedra
//!    whose circumsphere contains it through face neighbours, then connects
//!    the point to the cavity boundary
//! 4. Drop tetrahedra that touch a super vertex

use config::constants::DELAUNAY_SUPER_SCALE;
use glam::DVec3;
use mesh_dataset::{Cell, Dataset, LoadResult, Topology};
use robust::{insphere, orient3d, Coord3D};
use std::collections::{HashMap, HashSet};

#[inline]
fn coord(p: DVec3) -> Coord3D<f64> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

#[inline]
fn orientation(points: &[DVec3], t: &[usize; 4]) -> f64 {
    orient3d(
        coord(points[t[0]]),
        coord(points[t[1]]),
        coord(points[t[2]]),
        coord(points[t[3]]),
    )
}

/// Returns true if `p` lies strictly inside the circumsphere of `t`.
#[inline]
fn in_circumsphere(points: &[DVec3], t: &[usize; 4], p: DVec3) -> bool {
    let sphere = insphere(
        coord(points[t[0]]),
        coord(points[t[1]]),
        coord(points[t[2]]),
        coord(points[t[3]]),
        coord(p),
    );
    sphere * orientation(points, t) > 0.0
}

/// Indices of representative points after merging points closer than
/// `radius`. The first point of each cluster wins.
pub fn merge_close_points(points: &[DVec3], radius: f64) -> Vec<usize> {
    if !(radius > 0.0) {
        return (0..points.len()).collect();
    }
    let key = |p: DVec3| {
        let q = (p / radius).floor();
        (q.x as i64, q.y as i64, q.z as i64)
    };
    let mut buckets: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
    let mut kept = Vec::new();

    for (index, &p) in points.iter().enumerate() {
        let (x, y, z) = key(p);
        let mut duplicate = false;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(bucket) = buckets.get(&(x + dx, y + dy, z + dz)) {
                        if bucket.iter().any(|&k| points[k].distance(p) < radius) {
                            duplicate = true;
                            break 'search;
                        }
                    }
                }
            }
        }
        if !duplicate {
            buckets.entry((x, y, z)).or_default().push(index);
            kept.push(index);
        }
    }
    kept
}

/// Returns true if at least four of the points are not coplanar.
fn spans_volume(points: &[DVec3]) -> bool {
    let Some(&a) = points.first() else {
        return false;
    };
    let Some(&b) = points.iter().find(|&&p| p != a) else {
        return false;
    };
    let Some(&c) = points
        .iter()
        .find(|&&p| (b - a).cross(p - a).length_squared() > 0.0)
    else {
        return false;
    };
    points
        .iter()
        .any(|&p| orient3d(coord(a), coord(b), coord(c), coord(p)) != 0.0)
}

/// Sort key interleaving 10 bits of each quantized coordinate.
fn morton_key(p: DVec3, min: DVec3, size: DVec3) -> u32 {
    let cell = |value: f64, low: f64, extent: f64| -> u32 {
        if extent > 0.0 {
            (((value - low) / extent) * 1023.0).clamp(0.0, 1023.0) as u32
        } else {
            0
        }
    };
    let spread = |mut v: u32| {
        v = (v | (v << 16)) & 0x0300_00ff;
        v = (v | (v << 8)) & 0x0300_f00f;
        v = (v | (v << 4)) & 0x030c_30c3;
        (v | (v << 2)) & 0x0924_9249
    };
    spread(cell(p.x, min.x, size.x))
        | (spread(cell(p.y, min.y, size.y)) << 1)
        | (spread(cell(p.z, min.z, size.z)) << 2)
}

const NO_NEIGHBOR: usize = usize::MAX;

/// A tetrahedron and its neighbours; `neighbors[i]` shares the face
/// opposite `vertices[i]`.
#[derive(Debug, Clone, Copy)]
struct Tet {
    vertices: [usize; 4],
    neighbors: [usize; 4],
    alive: bool,
}

/// Tetrahedra linked across shared faces. Every live tetrahedron has a
/// negative `orient3d`.
struct Triangulation<'a> {
    points: &'a [DVec3],
    tets: Vec<Tet>,
    last: usize,
}

impl<'a> Triangulation<'a> {
    fn new(points: &'a [DVec3], root: [usize; 4]) -> Self {
        Self {
            points,
            tets: vec![Tet {
                vertices: oriented(points, root),
                neighbors: [NO_NEIGHBOR; 4],
                alive: true,
            }],
            last: 0,
        }
    }

    fn in_conflict(&self, tet: usize, p: DVec3) -> bool {
        in_circumsphere(self.points, &self.tets[tet].vertices, p)
    }

    /// Face of `tet` that `p` lies strictly beyond, if any.
    fn exit_face(&self, tet: usize, p: DVec3) -> Option<usize> {
        let vertices = self.tets[tet].vertices;
        (0..4).find(|&i| {
            let mut corners = vertices.map(|v| coord(self.points[v]));
            corners[i] = coord(p);
            orient3d(corners[0], corners[1], corners[2], corners[3]) > 0.0
        })
    }

    /// A live tetrahedron whose circumsphere contains `p`.
    ///
    /// Walks from the last created tetrahedron towards `p` and scans every
    /// live tetrahedron if the walk ends outside the triangulation.
    fn locate(&self, p: DVec3) -> Option<usize> {
        let mut current = self.last;
        for _ in 0..self.tets.len() {
            match self.exit_face(current, p) {
                None => {
                    if self.in_conflict(current, p) {
                        return Some(current);
                    }
                    break;
                }
                Some(face) => {
                    let next = self.tets[current].neighbors[face];
                    if next == NO_NEIGHBOR {
                        break;
                    }
                    current = next;
                }
            }
        }
        (0..self.tets.len()).find(|&t| self.tets[t].alive && self.in_conflict(t, p))
    }

    /// Inserts point `index`. Points already present are skipped.
    fn insert(&mut self, index: usize) {
        let p = self.points[index];
        let Some(seed) = self.locate(p) else {
            return;
        };

        let mut cavity = vec![seed];
        let mut members = HashSet::from([seed]);
        let mut next = 0;
        while next < cavity.len() {
            let tet = cavity[next];
            next += 1;
            for neighbor in self.tets[tet].neighbors {
                if neighbor != NO_NEIGHBOR
                    && !members.contains(&neighbor)
                    && self.in_conflict(neighbor, p)
                {
                    members.insert(neighbor);
                    cavity.push(neighbor);
                }
            }
        }

        // One new tetrahedron per cavity boundary face; `p` takes the place
        // of the cavity vertex opposite that face, which keeps the orientation.
        let mut created = Vec::new();
        for &tet in &cavity {
            let old = self.tets[tet];
            for face in 0..4 {
                let outside = old.neighbors[face];
                if outside != NO_NEIGHBOR && members.contains(&outside) {
                    continue;
                }
                let mut vertices = old.vertices;
                vertices[face] = index;
                let mut neighbors = [NO_NEIGHBOR; 4];
                neighbors[face] = outside;

                let id = self.tets.len();
                self.tets.push(Tet {
                    vertices,
                    neighbors,
                    alive: true,
                });
                if outside != NO_NEIGHBOR {
                    let across = &mut self.tets[outside].neighbors;
                    if let Some(slot) = across.iter().position(|&n| n == tet) {
                        across[slot] = id;
                    }
                }
                created.push(id);
            }
        }

        // New tetrahedra meet across faces through `p`, keyed by the edge
        // they share on the cavity boundary.
        let mut open: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        for &id in &created {
            let vertices = self.tets[id].vertices;
            for face in 0..4 {
                if vertices[face] == index {
                    continue;
                }
                let mut edge = vertices
                    .iter()
                    .enumerate()
                    .filter(|&(k, &v)| k != face && v != index)
                    .map(|(_, &v)| v);
                let (Some(a), Some(b)) = (edge.next(), edge.next()) else {
                    continue;
                };
                let key = (a.min(b), a.max(b));
                match open.remove(&key) {
                    Some((other, slot)) => {
                        self.tets[id].neighbors[face] = other;
                        self.tets[other].neighbors[slot] = id;
                    }
                    None => {
                        open.insert(key, (id, face));
                    }
                }
            }
        }

        for &tet in &cavity {
            self.tets[tet].alive = false;
        }
        if let Some(&newest) = created.last() {
            self.last = newest;
        }
    }
}

/// Tetrahedra of the Delaunay tetrahedralization of `points`, as indices
/// into `points`, each with positive VTK orientation.
///
/// Fewer than four non-coplanar points produce no tetrahedra.
pub fn delaunay_tetrahedra(points: &[DVec3]) -> Vec<[usize; 4]> {
    if points.len() < 4 || !spans_volume(points) {
        return Vec::new();
    }

    let Some(bounds) = mesh_dataset::Bounds::from_points(points.iter().copied()) else {
        return Vec::new();
    };
    let center = bounds.center();
    let scale = bounds.diagonal().max(1.0) * DELAUNAY_SUPER_SCALE;

    let n = points.len();
    let mut all: Vec<DVec3> = points.to_vec();
    all.extend([
        center + DVec3::new(1.0, 1.0, 1.0) * scale,
        center + DVec3::new(-1.0, -1.0, 1.0) * scale,
        center + DVec3::new(-1.0, 1.0, -1.0) * scale,
        center + DVec3::new(1.0, -1.0, -1.0) * scale,
    ]);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_cached_key(|&i| morton_key(points[i], bounds.min, bounds.size()));

    let mut triangulation = Triangulation::new(&all, [n, n + 1, n + 2, n + 3]);
    for index in order {
        triangulation.insert(index);
    }

    triangulation
        .tets
        .into_iter()
        .filter(|t| t.alive && t.vertices.iter().all(|&v| v < n))
        .map(|t| t.vertices)
        .collect()
}

/// Swaps two vertices if needed so the tetrahedron has positive VTK
/// orientation (`orient3d` negative).
fn oriented(points: &[DVec3], t: [usize; 4]) -> [usize; 4] {
    if orientation(points, &t) > 0.0 {
        [t[1], t[0], t[2], t[3]]
    } else {
        t
    }
}

/// Tetrahedralizes a point cloud.
///
/// Points closer than `tolerance` times the bounding diagonal are merged
/// first. The result keeps the merged points and their point arrays.
pub fn tetrahedralize(source: &Dataset, tolerance: f64) -> LoadResult<Dataset> {
    let points: Vec<DVec3> = (0..source.point_count()).map(|i| source.point(i)).collect();
    let kept = merge_close_points(&points, tolerance * source.bounds().diagonal());
    let merged: Vec<DVec3> = kept.iter().map(|&i| points[i]).collect();

    let cells = delaunay_tetrahedra(&merged)
        .into_iter()
        .map(|t| Cell::tetrahedron(t.map(|v| v as u32)))
        .collect();

    let mut dataset = Dataset::new(merged, Topology::Unstructured(cells))?;
    for (name, values) in source.point_data() {
        let sampled = kept.iter().map(|&i| values[i]).collect();
        dataset = dataset.with_point_array(name.clone(), sampled)?;
    }
    log::debug!(
        "Tetrahedralized {} points ({} after merging): {} tetrahedra",
        points.len(),
        kept.len(),
        dataset.cell_count()
    );
    Ok(dataset)
}
