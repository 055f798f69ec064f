//! # Decimation and Surface Extraction
//!
//! Turns any dataset into a polygonal surface the packer can consume,
//! switching on [`DatasetKind`]:
//!
//! | Kind | Surface |
//! |------|---------|
//! | Structured | outer grid faces as quads |
//! | Polygonal | unchanged |
//! | Volumetric | boundary faces, 2-D cells pass through |
//! | Point cloud | boundary of the Delaunay tetrahedralization |
//!
//! Structured grids with more cells than the configured input budget are
//! first reduced to strided hexahedra.

mod boundary;
mod delaunay;
mod stride;


pub use boundary::{boundary_faces, structured_boundary};
pub use delaunay::{delaunay_tetrahedra, merge_close_points, tetrahedralize};
pub use stride::strided_hexahedra;

use config::constants::ExtractConfig;
use mesh_dataset::{Dataset, DatasetKind, LoadResult, Topology};
use std::borrow::Cow;

/// Reduces oversized structured grids to strided hexahedra.
///
/// Every other dataset is returned as is.
pub fn reduce<'a>(dataset: &'a Dataset, config: &ExtractConfig) -> LoadResult<Cow<'a, Dataset>> {
    match dataset.topology() {
        Topology::Structured(grid) if dataset.cell_count() > config.max_slice_input_cells => {
            let stride = config.stride_for(grid.dims());
            log::debug!(
                "Structured grid has {} cells (budget {}); decimating with stride {}",
                dataset.cell_count(),
                config.max_slice_input_cells,
                stride
            );
            Ok(Cow::Owned(strided_hexahedra(grid, dataset, stride)?))
        }
        _ => Ok(Cow::Borrowed(dataset)),
    }
}

/// Polygonal surface of `dataset`.
///
/// # Example
///
/// ```rust
/// use config::constants::ExtractConfig;
/// use mesh_dataset::{sources::structured_volume, DatasetKind};
/// use mesh_extract::decimate::extract_surface;
/// use glam::DVec3;
///
/// let volume = structured_volume([4, 4, 4], DVec3::ZERO, DVec3::ONE).unwrap();
/// let surface = extract_surface(&volume, &ExtractConfig::default()).unwrap();
/// assert_eq!(surface.kind(), DatasetKind::Polygonal);
/// assert_eq!(surface.cell_count(), 6 * 9);
/// ```
pub fn extract_surface<'a>(
    dataset: &'a Dataset,
    config: &ExtractConfig,
) -> LoadResult<Cow<'a, Dataset>> {
    let input = reduce(dataset, config)?;
    if input.kind() == DatasetKind::Polygonal {
        return Ok(input);
    }
    let surface = match input.topology() {
        Topology::Structured(grid) => structured_boundary(grid, &input)?,
        Topology::PointCloud => {
            let tetrahedra = tetrahedralize(&input, config.delaunay_tolerance)?;
            if tetrahedra.cell_count() == 0 {
                log::debug!("Point cloud spans no volume; keeping bare points");
                tetrahedra
            } else {
                boundary_faces(&tetrahedra)?
            }
        }
        Topology::Unstructured(_) => boundary_faces(&input)?,
    };
    log::debug!(
        "Surface of {:?} dataset: {} points, {} polygons",
        input.kind(),
        surface.point_count(),
        surface.cell_count()
    );
    Ok(Cow::Owned(surface))
}
