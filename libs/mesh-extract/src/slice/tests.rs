//! Tests for plane placement and cutting.

use super::*;
use crate::params::{Axis, ExtractParams};
use approx::assert_relative_eq;
use mesh_dataset::{Association, Bounds, CellKind};

/// Unit cube split into six tetrahedra around the 0-7 diagonal.
///
/// `Temperature` runs from 20 at `x = 0` to 90 at `x = 1`.
fn tet_cube() -> Dataset {
    let points: Vec<DVec3> = (0..8)
        .map(|b: u32| DVec3::new((b & 1) as f64, ((b >> 1) & 1) as f64, ((b >> 2) & 1) as f64))
        .collect();
    let temperature = points.iter().map(|p| 20.0 + 70.0 * p.x).collect();
    let tets = [
        [0, 1, 3, 7],
        [0, 1, 5, 7],
        [0, 2, 3, 7],
        [0, 2, 6, 7],
        [0, 4, 5, 7],
        [0, 4, 6, 7],
    ];
    Dataset::new(
        points,
        Topology::Unstructured(tets.iter().map(|&t| Cell::tetrahedron(t)).collect()),
    )
    .unwrap()
    .with_point_array("Temperature", temperature)
    .unwrap()
    .with_cell_array("Region", (0..6).map(f64::from).collect())
    .unwrap()
}

fn x_plane(x: f64) -> SlicePlane {
    SlicePlane::new(DVec3::X, DVec3::new(x, 0.5, 0.5)).unwrap()
}

// =============================================================================
// PLANES
// =============================================================================

#[test]
fn test_plane_normalizes_normal() {
    let plane = SlicePlane::new(DVec3::new(0.0, 3.0, 4.0), DVec3::ZERO).unwrap();
    assert_relative_eq!(plane.normal().length(), 1.0);
    assert_relative_eq!(plane.signed_distance(DVec3::new(0.0, 3.0, 4.0)), 5.0);
}

#[test]
fn test_degenerate_plane_rejected() {
    assert!(SlicePlane::new(DVec3::ZERO, DVec3::ZERO).is_err());
    assert!(SlicePlane::new(DVec3::X, DVec3::splat(f64::NAN)).is_err());
}

#[test]
fn test_basis_is_right_handed() {
    let plane = SlicePlane::new(DVec3::new(1.0, 2.0, -1.0), DVec3::ZERO).unwrap();
    let (u, v) = plane.basis();
    assert_relative_eq!(u.dot(v), 0.0, epsilon = 1e-12);
    assert_relative_eq!(u.dot(plane.normal()), 0.0, epsilon = 1e-12);
    assert!(u.cross(v).distance(plane.normal()) < 1e-12);
}

#[test]
fn test_plane_at_percent() {
    let bounds = Bounds::new(DVec3::ZERO, DVec3::new(10.0, 4.0, 2.0));
    let center = plane_at_percent(&bounds, DVec3::X, 0.0).unwrap();
    assert_eq!(center.origin(), DVec3::new(5.0, 2.0, 1.0));

    let edge = plane_at_percent(&bounds, DVec3::X, 50.0).unwrap();
    assert_relative_eq!(edge.origin().x, 10.0);

    let low = plane_at_percent(&bounds, DVec3::Y, -25.0).unwrap();
    assert_relative_eq!(low.origin().y, 1.0);
}

#[test]
fn test_plane_offsets_are_centered_on_zero() {
    assert_eq!(plane_offsets(2, 1.0), vec![-1.0, 0.0]);
    assert_eq!(plane_offsets(5, 0.5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    for count in 2..10 {
        assert!(plane_offsets(count, 0.3).contains(&0.0));
    }
}

#[test]
fn test_planes_for_single_and_multiple() {
    let bounds = Bounds::new(DVec3::ZERO, DVec3::ONE);
    let single = ExtractParams::default().with_slice(Axis::Z, 0.0);
    let planes = planes_for(&single, &bounds).unwrap();
    assert_eq!(planes.len(), 1);
    assert_eq!(planes[0].normal(), DVec3::Z);
    assert_eq!(planes[0].origin(), DVec3::splat(0.5));

    let multiple = single.with_multiple_slices(3, 0.25);
    let planes = planes_for(&multiple, &bounds).unwrap();
    let heights: Vec<f64> = planes.iter().map(|p| p.origin().z).collect();
    assert_eq!(heights, vec![0.25, 0.5, 0.75]);
}

// =============================================================================
// CUTTING
// =============================================================================

#[test]
fn test_mid_plane_cuts_every_tetrahedron() {
    let sliced = slice(&tet_cube(), &x_plane(0.5), &ExtractConfig::default()).unwrap();
    assert_eq!(sliced.cell_count(), 6);
    assert!(sliced
        .cells()
        .all(|c| c.kind == CellKind::Polygon && c.len() >= 3));
    for i in 0..sliced.point_count() {
        assert_relative_eq!(sliced.point(i).x, 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_point_data_is_interpolated() {
    let sliced = slice(&tet_cube(), &x_plane(0.25), &ExtractConfig::default()).unwrap();
    let temperature = sliced
        .active_scalar(Association::Point, "Temperature")
        .unwrap();
    assert_eq!(temperature.len(), sliced.point_count());
    for &t in temperature {
        assert_relative_eq!(t, 37.5, epsilon = 1e-9);
    }
}

#[test]
fn test_cell_data_is_inherited() {
    let sliced = slice(&tet_cube(), &x_plane(0.5), &ExtractConfig::default()).unwrap();
    let region = sliced.active_scalar(Association::Cell, "Region").unwrap();
    assert_eq!(region, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_polygons_are_convex_and_ordered() {
    let plane = x_plane(0.5);
    let sliced = slice(&tet_cube(), &plane, &ExtractConfig::default()).unwrap();
    for cell in sliced.cells() {
        let p: Vec<DVec3> = cell
            .point_ids()
            .iter()
            .map(|&i| sliced.point(i as usize))
            .collect();
        for k in 0..p.len() {
            let a = p[k];
            let b = p[(k + 1) % p.len()];
            let c = p[(k + 2) % p.len()];
            assert!((b - a).cross(c - b).dot(plane.normal()) > 0.0);
        }
    }
}

#[test]
fn test_plane_outside_bounds_is_empty() {
    let sliced = slice(&tet_cube(), &x_plane(5.0), &ExtractConfig::default()).unwrap();
    assert_eq!(sliced.cell_count(), 0);
    assert_eq!(sliced.point_count(), 0);
}

#[test]
fn test_face_on_plane_yields_polygons() {
    // Only the two tetrahedra with a whole face on x = 0 produce a polygon.
    let sliced = slice(&tet_cube(), &x_plane(0.0), &ExtractConfig::default()).unwrap();
    assert_eq!(sliced.cell_count(), 2);
    assert!(sliced.cells().all(|c| c.len() == 3));
    let region = sliced.active_scalar(Association::Cell, "Region").unwrap();
    assert_eq!(region, &[3.0, 5.0]);
}

#[test]
fn test_multiple_planes_concatenate_in_order() {
    let config = ExtractConfig::default();
    let cube = tet_cube();
    let planes = [x_plane(0.25), x_plane(0.5), x_plane(0.75)];
    let all = slice_planes(&cube, &planes, &config).unwrap();
    assert_eq!(all.cell_count(), 18);

    let middle = slice(&cube, &planes[1], &config).unwrap();
    let offset = all.cells().take(6).map(|c| c.len()).sum::<usize>();
    for i in 0..middle.point_count() {
        assert_eq!(all.point(offset + i), middle.point(i));
    }
}

#[test]
fn test_structured_grid_slice() {
    let grid = mesh_dataset::StructuredGrid::new([3, 3, 3], DVec3::ZERO, DVec3::ONE).unwrap();
    let dataset = Dataset::structured(grid);
    let plane = SlicePlane::new(DVec3::Y, DVec3::new(0.0, 0.5, 0.0)).unwrap();
    let sliced = slice(&dataset, &plane, &ExtractConfig::default()).unwrap();
    assert_eq!(sliced.cell_count(), 4);
    assert!(sliced.cells().all(|c| c.len() == 4));
}

#[test]
fn test_triangle_mesh_slice_drops_segments() {
    let surface = Dataset::new(
        vec![DVec3::ZERO, DVec3::X, DVec3::Y],
        Topology::Unstructured(vec![Cell::triangle(0, 1, 2)]),
    )
    .unwrap();
    let sliced = slice(&surface, &x_plane(0.5), &ExtractConfig::default()).unwrap();
    assert_eq!(sliced.cell_count(), 0);
}
