//! # Slicing Engine
//!
//! Cuts a dataset with one or more planes and returns the cut polygons as a
//! new polygonal dataset.
//!
//! ## Algorithm
//!
//! 1. Signed distance of every point to the plane (computed once, in parallel)
//! 2. A cell is cut when it has points strictly on both sides, or points on
//!    the plane (`|d| <= tolerance`)
//! 3. Cut points: on-plane cell points plus one interpolated point per
//!    crossing edge
//! 4. Points ordered by angle around their centroid in the plane basis;
//!    fewer than 3 distinct points drop the cell
//!
//! Point arrays are interpolated along the cut edges, cell arrays are
//! inherited from the source cell. Every polygon owns its points; nothing is
//! welded, within one plane or across planes.

mod plane;

#[cfg(test)]
mod tests;

pub use plane::{plane_at_percent, plane_offsets, planes_for, SlicePlane};

use config::constants::{ExtractConfig, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use mesh_dataset::{Cell, CellRef, Dataset, LoadResult, Topology};
use rayon::prelude::*;

/// One point of a cut polygon: `a + t * (b - a)` for source points `a`, `b`.
#[derive(Debug, Clone, Copy)]
struct CutPoint {
    position: DVec3,
    a: u32,
    b: u32,
    t: f64,
}

/// A cut polygon with the index of the cell it came from.
#[derive(Debug, Clone)]
struct CutPolygon {
    cell: usize,
    points: Vec<CutPoint>,
}

/// Cuts `dataset` with a single plane.
///
/// The result may have zero cells when the plane misses the dataset.
pub fn slice(dataset: &Dataset, plane: &SlicePlane, config: &ExtractConfig) -> LoadResult<Dataset> {
    slice_planes(dataset, std::slice::from_ref(plane), config)
}

/// Cuts `dataset` with every plane and concatenates the polygons in plane
/// order.
pub fn slice_planes(
    dataset: &Dataset,
    planes: &[SlicePlane],
    config: &ExtractConfig,
) -> LoadResult<Dataset> {
    let polygons: Vec<CutPolygon> = planes
        .iter()
        .flat_map(|plane| cut(dataset, plane, config.plane_tolerance))
        .collect();
    log::debug!(
        "Cut {} cells with {} plane(s): {} polygons",
        dataset.cell_count(),
        planes.len(),
        polygons.len()
    );
    assemble(dataset, &polygons)
}

fn cut(dataset: &Dataset, plane: &SlicePlane, tolerance: f64) -> Vec<CutPolygon> {
    let distances: Vec<f64> = (0..dataset.point_count())
        .into_par_iter()
        .map(|i| plane.signed_distance(dataset.point(i)))
        .collect();
    let basis = plane.basis();

    (0..dataset.cell_count())
        .into_par_iter()
        .filter_map(|index| {
            let cell = dataset.cell(index)?;
            cut_cell(dataset, &cell, &distances, tolerance, basis).map(|points| CutPolygon {
                cell: index,
                points,
            })
        })
        .collect()
}

fn cut_cell(
    dataset: &Dataset,
    cell: &CellRef<'_>,
    distances: &[f64],
    tolerance: f64,
    (u, v): (DVec3, DVec3),
) -> Option<Vec<CutPoint>> {
    let ids = cell.point_ids();
    let side = |p: u32| {
        let d = distances[p as usize];
        if d > tolerance {
            1
        } else if d < -tolerance {
            -1
        } else {
            0
        }
    };

    let (mut above, mut below, mut on) = (false, false, false);
    for &p in ids {
        match side(p) {
            1 => above = true,
            -1 => below = true,
            _ => on = true,
        }
    }
    if !(on || (above && below)) {
        return None;
    }

    let mut points: Vec<CutPoint> = Vec::new();
    let mut push = |candidate: CutPoint| {
        let merged = points.iter().any(|existing| {
            existing.position.distance_squared(candidate.position)
                <= VERTEX_MERGE_EPSILON * VERTEX_MERGE_EPSILON
        });
        if !merged {
            points.push(candidate);
        }
    };

    for &p in ids.iter().filter(|&&p| side(p) == 0) {
        push(CutPoint {
            position: dataset.point(p as usize),
            a: p,
            b: p,
            t: 0.0,
        });
    }

    cell.kind.for_each_edge(ids.len(), |i, j| {
        let (a, b) = (ids[i], ids[j]);
        let (sa, sb) = (side(a), side(b));
        if sa * sb >= 0 {
            return;
        }
        let (da, db) = (distances[a as usize], distances[b as usize]);
        let t = da / (da - db);
        let pa = dataset.point(a as usize);
        let pb = dataset.point(b as usize);
        push(CutPoint {
            position: pa + (pb - pa) * t,
            a,
            b,
            t,
        });
    });

    if points.len() < 3 {
        return None;
    }

    let centroid = points.iter().map(|p| p.position).sum::<DVec3>() / points.len() as f64;
    let angle = |p: &CutPoint| {
        let offset = p.position - centroid;
        offset.dot(v).atan2(offset.dot(u))
    };
    points.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
    Some(points)
}

/// Builds the polygon dataset, interpolating point arrays and copying cell
/// arrays.
fn assemble(source: &Dataset, polygons: &[CutPolygon]) -> LoadResult<Dataset> {
    let cut_points: Vec<&CutPoint> = polygons
        .iter()
        .flat_map(|poly| poly.points.iter())
        .collect();
    let positions = cut_points.iter().map(|p| p.position).collect();

    let mut next = 0u32;
    let cells = polygons
        .iter()
        .map(|poly| {
            let start = next;
            next += poly.points.len() as u32;
            Cell::polygon((start..next).collect())
        })
        .collect();

    let mut dataset = Dataset::new(positions, Topology::Unstructured(cells))?;

    for (name, values) in source.point_data() {
        let interpolated = cut_points
            .par_iter()
            .map(|p| {
                let va = values[p.a as usize];
                let vb = values[p.b as usize];
                va + (vb - va) * p.t
            })
            .collect();
        dataset = dataset.with_point_array(name.clone(), interpolated)?;
    }
    for (name, values) in source.cell_data() {
        let inherited = polygons.iter().map(|poly| values[poly.cell]).collect();
        dataset = dataset.with_cell_array(name.clone(), inherited)?;
    }
    Ok(dataset)
}
