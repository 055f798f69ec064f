use glam::DVec3;
use mesh_dataset::sources::structured_volume;
use mesh_dataset::{Association, DatasetKind, LoadError};
use mesh_extract::color::{LookupTable, ScalarRange};
use mesh_extract::{extract, Axis, ExtractParams, FieldSelection, Session};
use std::path::PathBuf;

const TET_CUBE: &str = r#"{
  "points": [
    [0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0],
    [0, 0, 1], [1, 0, 1], [0, 1, 1], [1, 1, 1]
  ],
  "cells": [
    { "kind": "tetrahedron", "indices": [0, 1, 3, 7] },
    { "kind": "tetrahedron", "indices": [0, 1, 5, 7] },
    { "kind": "tetrahedron", "indices": [0, 2, 3, 7] },
    { "kind": "tetrahedron", "indices": [0, 2, 6, 7] },
    { "kind": "tetrahedron", "indices": [0, 4, 5, 7] },
    { "kind": "tetrahedron", "indices": [0, 4, 6, 7] }
  ],
  "point_data": {
    "Temperature": [20.0, 90.0, 20.0, 90.0, 20.0, 90.0, 20.0, 90.0]
  }
}"#;

/// Writes `contents` to a file unique to this test process.
fn write_dataset(name: &str, contents: &str) -> PathBuf {
    let file = format!("mesh-extract-{}-{}.json", std::process::id(), name);
    let path = std::env::temp_dir().join(file);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn tet_cube_slice_colors_stay_in_field_range() {
    let path = write_dataset("tet-cube", TET_CUBE);
    let mut session = Session::default();
    session.load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(session.dataset().unwrap().kind(), DatasetKind::Volumetric);
    assert_eq!(
        session.array_names(),
        vec![(Association::Point, "Temperature".to_string())]
    );

    let params = ExtractParams::default()
        .with_field(FieldSelection::point("Temperature"))
        .with_slice(Axis::X, 0.0);
    let extraction = session.extract(&params).unwrap();
    let geometry = &extraction.geometry;
    assert!(extraction.warnings.is_empty());
    assert!(geometry.vertex_count > 0);
    assert!(geometry.triangle_count > 0);

    let lut = LookupTable::default();
    let range = ScalarRange::new(20.0, 90.0);
    for rgb in geometry.colors.chunks_exact(3) {
        let value = lut.decode([rgb[0], rgb[1], rgb[2]], range).unwrap();
        assert!((20.0..=90.0).contains(&value), "decoded {}", value);
        // Every cut point sits halfway along x.
        assert!((value - 55.0).abs() < 0.5);
    }
}

#[test]
fn failed_load_reports_error() {
    let path = write_dataset(
        "broken",
        r#"{ "points": [[0, 0, 0]], "cells": [{ "kind": "triangle", "indices": [0, 1, 2] }] }"#,
    );
    let mut session = Session::default();
    let err = session.load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, LoadError::Invalid { .. }));
    assert!(session.dataset().is_none());
}

#[test]
fn large_grid_surface_is_decimated() {
    let volume = structured_volume([100, 100, 100], DVec3::ZERO, DVec3::ONE).unwrap();
    let extraction = extract(&volume, &ExtractParams::default()).unwrap();
    let geometry = &extraction.geometry;

    // Boundary of 19³ strided hexahedra.
    assert_eq!(geometry.triangle_count, 6 * 19 * 19 * 2);
    assert_eq!(geometry.vertex_count, 20 * 20 * 20 - 18 * 18 * 18);
    assert!(geometry.validate());
    assert!(extraction.warnings.is_empty());
}

#[test]
fn large_grid_slice_is_decimated() {
    let volume = structured_volume([100, 100, 100], DVec3::ZERO, DVec3::ONE).unwrap();
    let params = ExtractParams::default()
        .with_slice(Axis::X, 0.0)
        .with_field(FieldSelection::point("Distance"));
    let extraction = extract(&volume, &params).unwrap();
    let geometry = &extraction.geometry;

    // One quad per hexahedron column crossed by x = 49.5.
    assert_eq!(geometry.triangle_count, 19 * 19 * 2);
    assert_eq!(geometry.vertex_count, 19 * 19 * 4);
    for x in geometry.positions.iter().step_by(3) {
        assert!((x - 49.5).abs() < 1e-4);
    }
}

#[test]
fn large_grid_slice_reaches_far_face() {
    let volume = structured_volume([100, 100, 100], DVec3::ZERO, DVec3::ONE).unwrap();
    for (percent, x) in [(48.0, 97.02), (50.0, 99.0)] {
        let params = ExtractParams::default().with_slice(Axis::X, percent);
        let extraction = extract(&volume, &params).unwrap();
        let geometry = &extraction.geometry;

        assert!(
            extraction.warnings.is_empty(),
            "{}%: {:?}",
            percent,
            extraction.warnings
        );
        assert_eq!(geometry.triangle_count, 19 * 19 * 2);
        for px in geometry.positions.iter().step_by(3) {
            let offset = (f64::from(*px) - x).abs();
            assert!(offset < 1e-3, "{}% cut at x = {}", percent, px);
        }
    }
}

#[test]
fn large_grid_surface_spans_source_bounds() {
    let volume = structured_volume([100, 100, 100], DVec3::ZERO, DVec3::ONE).unwrap();
    let geometry = extract(&volume, &ExtractParams::default()).unwrap().geometry;
    let max = geometry
        .positions
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(max, 99.0);
}
