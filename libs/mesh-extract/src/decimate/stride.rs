//! Strided hexahedra: one hexahedron per `stride`-sized block of a
//! structured grid.

use mesh_dataset::{Cell, Dataset, LoadResult, StructuredGrid, Topology};

/// Sampled point coordinates along one axis: `0, s, 2s, ...` with the last
/// sample moved to `n - 1`, so the final block absorbs the remainder.
fn samples(n: usize, stride: usize) -> Vec<usize> {
    let mut samples: Vec<usize> = (0..n).step_by(stride).collect();
    if let Some(last) = samples.last_mut() {
        *last = n - 1;
    }
    samples
}

/// Decimates a structured grid to explicit hexahedra spanning
/// `stride`-sized blocks.
///
/// A grid with `n` points along an axis keeps `(n - 1) / stride + 1` points
/// along it, so a 100³ grid with stride 5 keeps 20³ points and 19³ cells.
/// The outermost samples are always the grid's first and last points, so the
/// decimated grid spans the same bounds as the source.
/// Point arrays are sampled; each hexahedron takes the cell values of the
/// source cell at its minimum corner.
pub fn strided_hexahedra(
    grid: &StructuredGrid,
    source: &Dataset,
    stride: usize,
) -> LoadResult<Dataset> {
    let stride = stride.max(1);
    let [nx, ny, nz] = grid.dims();
    let (xs, ys, zs) = (samples(nx, stride), samples(ny, stride), samples(nz, stride));
    let (mx, my, mz) = (xs.len(), ys.len(), zs.len());

    let mut source_points = Vec::with_capacity(mx * my * mz);
    for &k in &zs {
        for &j in &ys {
            for &i in &xs {
                source_points.push(grid.point_index(i, j, k));
            }
        }
    }
    let positions = source_points.iter().map(|&p| grid.point(p)).collect();

    let index = |i: usize, j: usize, k: usize| (i + mx * (j + my * k)) as u32;
    let [cx, cy, _] = grid.cell_dims();
    let mut cells = Vec::new();
    let mut source_cells = Vec::new();
    for k in 0..mz.saturating_sub(1) {
        for j in 0..my.saturating_sub(1) {
            for i in 0..mx.saturating_sub(1) {
                cells.push(Cell::hexahedron([
                    index(i, j, k),
                    index(i + 1, j, k),
                    index(i + 1, j + 1, k),
                    index(i, j + 1, k),
                    index(i, j, k + 1),
                    index(i + 1, j, k + 1),
                    index(i + 1, j + 1, k + 1),
                    index(i, j + 1, k + 1),
                ]));
                source_cells.push(xs[i] + cx * (ys[j] + cy * zs[k]));
            }
        }
    }

    let mut dataset = Dataset::new(positions, Topology::Unstructured(cells))?;
    for (name, values) in source.point_data() {
        let sampled = source_points.iter().map(|&p| values[p]).collect();
        dataset = dataset.with_point_array(name.clone(), sampled)?;
    }
    for (name, values) in source.cell_data() {
        let sampled = source_cells.iter().map(|&c| values[c]).collect();
        dataset = dataset.with_cell_array(name.clone(), sampled)?;
    }

    log::debug!(
        "Strided {:?} grid by {}: {} hexahedra",
        grid.dims(),
        stride,
        dataset.cell_count()
    );
    Ok(dataset)
}
