use glam::DVec3;
use mesh_dataset::sources::{default_sphere, structured_volume};
use mesh_dataset::{Cell, Dataset, Topology};
use mesh_extract::color::{color_points, rgb_to_hue, LookupTable, ScalarRange};
use mesh_extract::pack::pack;
use mesh_extract::{
    extract, slice_or_fallback, Axis, ExtractParams, ExtractWarning, FieldSelection, Session,
    SlicePlane,
};
use config::constants::ExtractConfig;

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
}

fn datasets() -> Vec<Dataset> {
    let cloud = Dataset::new(
        (0..27)
            .map(|i| {
                let (x, y, z) = (i % 3, (i / 3) % 3, i / 9);
                let (x, y, z) = (x as f64, y as f64, z as f64);
                DVec3::new(x, y + 0.01 * x, z + 0.02 * y)
            })
            .collect(),
        Topology::PointCloud,
    )
    .unwrap();
    vec![
        default_sphere().unwrap(),
        structured_volume([5, 6, 7], DVec3::ZERO, DVec3::splat(0.5)).unwrap(),
        tet_cube(),
        cloud,
    ]
}

fn requests() -> Vec<ExtractParams> {
    vec![
        ExtractParams::default(),
        ExtractParams::default().with_slice(Axis::X, 10.0),
        ExtractParams::default().with_slice(Axis::Y, -40.0),
        ExtractParams::default()
            .with_slice(Axis::Z, 0.0)
            .with_multiple_slices(4, 0.3),
    ]
}

#[test]
fn packed_geometry_invariants_hold() {
    for dataset in datasets() {
        for params in requests() {
            let geometry = extract(&dataset, &params).unwrap().geometry;
            assert_eq!(geometry.indices.len() % 3, 0);
            assert_eq!(geometry.positions.len(), 3 * geometry.vertex_count);
            assert_eq!(geometry.colors.len(), geometry.positions.len());
            assert!(geometry
                .indices
                .iter()
                .all(|&i| (i as usize) < geometry.vertex_count));
            assert!(geometry.validate());
        }
    }
}

#[test]
fn plane_outside_bounds_falls_back_to_unsliced_surface() {
    let cube = tet_cube();
    let config = ExtractConfig::default();
    let plane = SlicePlane::new(DVec3::X, DVec3::new(10.0, 0.0, 0.0)).unwrap();

    let (surface, warning) = slice_or_fallback(&cube, &[plane], &config).unwrap();
    assert_eq!(warning, Some(ExtractWarning::EmptySlice { planes: 1 }));

    let colors = color_points(&surface, None, None, &LookupTable::default()).colors;
    let fallback = pack(&surface, &colors, 1.0, false);
    let unsliced = extract(&cube, &ExtractParams::default()).unwrap().geometry;
    assert_eq!(fallback, unsliced);
}

#[test]
fn polygonal_slice_reports_empty_result() {
    let sphere = default_sphere().unwrap();
    let params = ExtractParams::default().with_slice(Axis::Z, 0.0);
    let extraction = extract(&sphere, &params).unwrap();
    assert_eq!(
        extraction.warnings,
        vec![ExtractWarning::EmptySlice { planes: 1 }]
    );
    assert_eq!(extraction.geometry.triangle_count, sphere.cell_count());
}

#[test]
fn multi_slice_contains_single_slice() {
    let volume = structured_volume([6, 6, 6], DVec3::ZERO, DVec3::ONE).unwrap();
    let single = ExtractParams::default()
        .with_slice(Axis::X, 0.0)
        .with_field(FieldSelection::point("Distance"));
    let multiple = single.clone().with_multiple_slices(3, 1.0);

    let one = extract(&volume, &single).unwrap().geometry;
    let many = extract(&volume, &multiple).unwrap().geometry;
    assert_eq!(many.vertex_count, 3 * one.vertex_count);

    let contains = |haystack: &[f32], needle: &[f32]| {
        haystack.windows(needle.len()).any(|w| w == needle)
    };
    assert!(contains(&many.positions, &one.positions));
    assert!(contains(&many.colors, &one.colors));

    let offset = one.vertex_count as u32;
    let shifted: Vec<u32> = one.indices.iter().map(|i| i + offset).collect();
    assert!(many
        .indices
        .windows(shifted.len())
        .any(|w| w == shifted.as_slice()));
}

#[test]
fn hue_decreases_with_value() {
    let lut = LookupTable::default();
    let range = ScalarRange::new(-3.0, 7.0);
    let hues: Vec<f64> = (0..=200)
        .map(|i| rgb_to_hue(lut.color(-3.0 + 0.05 * i as f64, range)))
        .collect();
    assert!(hues.windows(2).all(|w| w[1] <= w[0] + 1e-6));
    assert!(hues[0] > 0.6);
    assert!(hues[200] < 0.01);
}

#[test]
fn repeated_requests_are_memoized() {
    let mut session = Session::default();
    session.set_dataset(tet_cube());
    let params = ExtractParams::default()
        .with_slice(Axis::X, 0.0)
        .with_field(FieldSelection::point("Temperature"));

    let first = session.extract(&params).unwrap().geometry.to_json();
    let second = session.extract(&params).unwrap().geometry.to_json();
    assert_eq!(first.unwrap().as_bytes(), second.unwrap().as_bytes());
    assert_eq!(session.stats().computations, 1);
    assert_eq!(session.stats().misses, 1);

    let other = params.clone().with_slice(Axis::Y, 0.0);
    session.extract(&other).unwrap();
    session.extract(&params).unwrap();
    assert_eq!(session.stats().computations, 3);
}
