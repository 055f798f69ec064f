//! Tests for the scalar color mapper.

use super::*;
use approx::assert_relative_eq;
use glam::DVec3;
use mesh_dataset::{Cell, Topology};

fn strip() -> Dataset {
    // Two triangles sharing the edge 1-2.
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(1.0, 2.0, 0.0),
    ];
    let cells = vec![Cell::triangle(0, 1, 2), Cell::triangle(1, 3, 2)];
    Dataset::new(points, Topology::Unstructured(cells))
        .unwrap()
        .with_point_array("T", vec![20.0, 40.0, 60.0, 90.0])
        .unwrap()
        .with_cell_array("P", vec![1.0, 3.0])
        .unwrap()
}

// =============================================================================
// LOOKUP TABLE
// =============================================================================

#[test]
fn test_table_endpoints() {
    let lut = LookupTable::default();
    assert_eq!(lut.len(), 256);
    let unit = ScalarRange::new(0.0, 1.0);
    assert_relative_eq!(rgb_to_hue(lut.color(0.0, unit)), 0.667, epsilon = 1e-6);
    assert_eq!(lut.color(1.0, unit), [1.0, 0.0, 0.0]);
}

#[test]
fn test_hue_is_monotonic() {
    let lut = LookupTable::default();
    let range = ScalarRange::new(20.0, 90.0);
    let mut previous = f64::INFINITY;
    for step in 0..=700 {
        let value = 20.0 + step as f64 * 0.1;
        let hue = rgb_to_hue(lut.color(value, range));
        assert!(hue <= previous + 1e-9, "hue rose at {}", value);
        previous = hue;
    }
    assert_relative_eq!(previous, 0.0, epsilon = 1e-9);
}

#[test]
fn test_values_clamp_to_table() {
    let lut = LookupTable::default();
    let range = ScalarRange::new(0.0, 10.0);
    assert_eq!(lut.index_of(-5.0, range), 0);
    assert_eq!(lut.index_of(15.0, range), 255);
    assert_eq!(lut.index_of(5.0, range), 128);
}

#[test]
fn test_degenerate_range_uses_first_entry() {
    let lut = LookupTable::default();
    let range = ScalarRange::new(4.0, 4.0);
    assert_eq!(lut.index_of(4.0, range), 0);

    // Rounding noise in a constant field still counts as degenerate.
    let noisy = ScalarRange::new(4.0, 4.0 + 1e-12);
    assert!(noisy.is_degenerate());
    assert_eq!(lut.index_of(4.0 + 1e-12, noisy), 0);
    assert!(!ScalarRange::new(4.0, 4.1).is_degenerate());
}

#[test]
fn test_decode_inverts_color() {
    let lut = LookupTable::default();
    let range = ScalarRange::new(20.0, 90.0);
    for value in [20.0, 33.3, 55.0, 89.9] {
        let decoded = lut.decode(lut.color(value, range), range).unwrap();
        assert!((decoded - value).abs() <= range.width() / 256.0);
        assert!(range.contains(decoded));
    }
    assert!(lut.decode([0.5, 0.5, 0.5], range).is_none());
}

#[test]
fn test_hsv_primaries() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]);
    assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0)[1], 1.0);
    assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0)[2], 1.0);
    assert_eq!(hsv_to_rgb(0.3, 0.0, 1.0), [1.0, 1.0, 1.0]);
}

#[test]
fn test_scalar_range_skips_nan() {
    assert!(ScalarRange::of(&[]).is_none());
    assert!(ScalarRange::of(&[f64::NAN]).is_none());
    let range = ScalarRange::of(&[2.0, f64::NAN, -3.0]).unwrap();
    assert_eq!(range, ScalarRange::new(-3.0, 2.0));
}

// =============================================================================
// MAPPER
// =============================================================================

#[test]
fn test_no_field_uses_fallback() {
    let coloring = color_points(&strip(), None, None, &LookupTable::default());
    assert_eq!(coloring.colors, vec![FALLBACK_COLOR; 4]);
    assert!(coloring.range.is_none());
    assert!(coloring.missing.is_none());
}

#[test]
fn test_point_field_maps_range() {
    let lut = LookupTable::default();
    let field = FieldSelection::point("T");
    let coloring = color_points(&strip(), Some(&field), None, &lut);
    let range = ScalarRange::new(20.0, 90.0);
    assert_eq!(coloring.range, Some(range));
    assert_eq!(coloring.colors[3], [1.0, 0.0, 0.0]);
    assert_eq!(coloring.colors[0], lut.color(20.0, range));
}

#[test]
fn test_cell_field_is_averaged() {
    let dataset = strip();
    let values = point_values(&dataset, &FieldSelection::cell("P")).unwrap();
    assert_eq!(values.as_ref(), &[1.0, 2.0, 2.0, 3.0]);
}

#[test]
fn test_missing_field_falls_back_to_elevation() {
    let lut = LookupTable::default();
    let field = FieldSelection::point("Velocity");
    let coloring = color_points(&strip(), Some(&field), None, &lut);
    let missing = coloring.missing.unwrap();
    assert_eq!(missing.name, "Velocity");
    assert_eq!(coloring.range, Some(ScalarRange::new(0.0, 2.0)));
    // Highest point is red, lowest points are blue.
    assert_eq!(coloring.colors[3], [1.0, 0.0, 0.0]);
    assert_eq!(coloring.colors[0], coloring.colors[1]);
}

#[test]
fn test_nan_values_get_nan_color() {
    let lut = LookupTable::default();
    let colors = map_values(&[0.0, f64::NAN, 1.0], ScalarRange::of(&[0.0, 1.0]), &lut);
    assert_eq!(colors[1], NAN_COLOR);
}

#[test]
fn test_range_override() {
    let lut = LookupTable::default();
    let wide = ScalarRange::new(0.0, 180.0);
    let field = FieldSelection::point("T");
    let coloring = color_points(&strip(), Some(&field), Some(wide), &lut);
    assert_eq!(coloring.range, Some(wide));
    assert_eq!(coloring.colors[3], lut.color(90.0, wide));
}
