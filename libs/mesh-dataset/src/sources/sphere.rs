//! # Sphere Source
//!
//! Latitude/longitude triangle sphere with explicit pole vertices and an
//! `Elevation` point array.

use crate::cell::Cell;
use crate::dataset::{Dataset, Topology};
use crate::error::{LoadError, LoadResult};
use config::constants::{
    DEFAULT_SPHERE_RADIUS, DEFAULT_SPHERE_RESOLUTION, ELEVATION_HIGH, ELEVATION_LOW,
};
use glam::DVec3;
use std::f64::consts::PI;

/// Name of the point array written by [`sphere`].
pub const ELEVATION_ARRAY: &str = "Elevation";

/// Creates a triangulated sphere centered at the origin.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `theta_resolution` - Points around each ring (longitude)
/// * `phi_resolution` - Points from pole to pole (latitude), poles included
///
/// # Algorithm
///
/// - Poles at `(0, 0, ±radius)`
/// - `phi_resolution - 2` rings at polar angle `PI * j / (phi_resolution - 1)`
/// - Triangle fans at the poles, two triangles per quad between rings
///
/// The `Elevation` array maps `y` from `[-1, 1]` onto `[0, 1]`, clamped.
///
/// # Example
///
/// ```rust
/// use mesh_dataset::sources::sphere;
///
/// let dataset = sphere(0.5, 30, 30).unwrap();
/// assert_eq!(dataset.point_count(), 2 + 30 * 28);
/// assert_eq!(dataset.cell_count(), 30 * 2 + 30 * 27 * 2);
/// ```
pub fn sphere(radius: f64, theta_resolution: u32, phi_resolution: u32) -> LoadResult<Dataset> {
    if !(radius > 0.0) {
        return Err(LoadError::invalid(format!(
            "Sphere radius must be positive: {}",
            radius
        )));
    }
    if theta_resolution < 3 || phi_resolution < 3 {
        return Err(LoadError::invalid(format!(
            "Sphere resolution must be at least 3: theta={}, phi={}",
            theta_resolution, phi_resolution
        )));
    }

    let segments = theta_resolution as usize;
    let rings = phi_resolution as usize - 2;

    let mut points = Vec::with_capacity(2 + segments * rings);
    points.push(DVec3::new(0.0, 0.0, radius));
    points.push(DVec3::new(0.0, 0.0, -radius));

    for i in 0..rings {
        let phi = PI * (i + 1) as f64 / (phi_resolution - 1) as f64;
        let ring_radius = radius * phi.sin();
        let z = radius * phi.cos();
        for j in 0..segments {
            let theta = 2.0 * PI * j as f64 / segments as f64;
            points.push(DVec3::new(
                ring_radius * theta.cos(),
                ring_radius * theta.sin(),
                z,
            ));
        }
    }

    let ring_point = |ring: usize, j: usize| (2 + ring * segments + j % segments) as u32;
    let mut cells = Vec::with_capacity(2 * segments + 2 * segments * rings.saturating_sub(1));

    // North cap
    for j in 0..segments {
        cells.push(Cell::triangle(0, ring_point(0, j), ring_point(0, j + 1)));
    }

    for i in 0..rings - 1 {
        for j in 0..segments {
            let a0 = ring_point(i, j);
            let a1 = ring_point(i, j + 1);
            let b0 = ring_point(i + 1, j);
            let b1 = ring_point(i + 1, j + 1);
            cells.push(Cell::triangle(a0, b0, b1));
            cells.push(Cell::triangle(a0, b1, a1));
        }
    }

    // South cap
    let last = rings - 1;
    for j in 0..segments {
        cells.push(Cell::triangle(1, ring_point(last, j + 1), ring_point(last, j)));
    }

    let elevation = points.iter().map(|p| elevation_of(*p)).collect();
    Dataset::new(points, Topology::Unstructured(cells))?
        .with_point_array(ELEVATION_ARRAY, elevation)
}

/// The sphere shown before any dataset is loaded.
pub fn default_sphere() -> LoadResult<Dataset> {
    resolution_sphere(DEFAULT_SPHERE_RESOLUTION)
}

/// The default sphere with `resolution` points around each ring and from
/// pole to pole.
pub fn resolution_sphere(resolution: u32) -> LoadResult<Dataset> {
    sphere(DEFAULT_SPHERE_RADIUS, resolution, resolution)
}

fn elevation_of(point: DVec3) -> f64 {
    ((point.y - ELEVATION_LOW) / (ELEVATION_HIGH - ELEVATION_LOW)).clamp(0.0, 1.0)
}
