//! # Extraction Pipeline
//!
//! Pure function from `(dataset, parameters)` to packed geometry.
//!
//! ```text
//! validate → slice (if enabled) → decimate / surface → color → pack → budget check
//! ```
//!
//! A cut that yields no polygons falls back to the unsliced surface. Oversize
//! output is returned untruncated. Both conditions are reported as
//! [`ExtractWarning`]s next to the geometry.

use crate::color::{color_points, field_range, LookupTable};
use crate::decimate::{extract_surface, reduce};
use crate::error::{ExtractResult, ExtractWarning};
use crate::pack::{pack, PackedGeometry};
use crate::params::ExtractParams;
use crate::slice::{planes_for, slice_planes, SlicePlane};
use config::constants::ExtractConfig;
use mesh_dataset::{Dataset, LoadResult};
use std::borrow::Cow;

/// Geometry of one request plus the conditions recovered on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub geometry: PackedGeometry,
    pub warnings: Vec<ExtractWarning>,
}

/// Extracts with the default configuration.
///
/// # Example
///
/// ```rust
/// use mesh_dataset::sources::default_sphere;
/// use mesh_extract::{extract, ExtractParams, FieldSelection};
///
/// let sphere = default_sphere().unwrap();
/// let params = ExtractParams::default().with_field(FieldSelection::point("Elevation"));
/// let extraction = extract(&sphere, &params).unwrap();
/// assert!(extraction.geometry.validate());
/// assert!(extraction.warnings.is_empty());
/// ```
pub fn extract(dataset: &Dataset, params: &ExtractParams) -> ExtractResult<Extraction> {
    extract_with(dataset, params, &ExtractConfig::default())
}

/// Extracts with explicit settings.
pub fn extract_with(
    dataset: &Dataset,
    params: &ExtractParams,
    config: &ExtractConfig,
) -> ExtractResult<Extraction> {
    params.validate()?;
    let mut warnings = Vec::new();

    let surface = if params.slicing_enabled {
        let planes = planes_for(params, &dataset.bounds())?;
        let (surface, warning) = slice_or_fallback(dataset, &planes, config)?;
        warnings.extend(warning);
        surface
    } else {
        extract_surface(dataset, config)?
    };

    let lut = LookupTable::default();
    let selection = params.active_field.as_ref();
    let range = selection.and_then(|s| field_range(dataset, s));
    let coloring = color_points(&surface, selection, range, &lut);
    if let Some(missing) = coloring.missing {
        warnings.push(ExtractWarning::ArrayNotFound(missing));
    }

    let geometry = pack(&surface, &coloring.colors, params.opacity, params.wireframe);
    warnings.extend(check_budget(&geometry, config));

    log::debug!(
        "Extracted {} vertices, {} triangles",
        geometry.vertex_count,
        geometry.triangle_count
    );
    Ok(Extraction { geometry, warnings })
}

/// Cuts `dataset` with `planes`. When no polygon results, returns the
/// unsliced surface and an [`ExtractWarning::EmptySlice`].
pub fn slice_or_fallback<'a>(
    dataset: &'a Dataset,
    planes: &[SlicePlane],
    config: &ExtractConfig,
) -> LoadResult<(Cow<'a, Dataset>, Option<ExtractWarning>)> {
    let input = reduce(dataset, config)?;
    let sliced = slice_planes(&input, planes, config)?;
    if sliced.cell_count() > 0 {
        return Ok((Cow::Owned(sliced), None));
    }

    let warning = ExtractWarning::EmptySlice {
        planes: planes.len(),
    };
    log::warn!("{}", warning);
    Ok((extract_surface(dataset, config)?, Some(warning)))
}

/// Oversize warning when `geometry` exceeds the render budget.
pub fn check_budget(geometry: &PackedGeometry, config: &ExtractConfig) -> Option<ExtractWarning> {
    if geometry.vertex_count <= config.max_render_vertices
        && geometry.triangle_count <= config.max_render_triangles
    {
        return None;
    }
    let warning = ExtractWarning::Oversize {
        vertex_count: geometry.vertex_count,
        triangle_count: geometry.triangle_count,
        max_vertices: config.max_render_vertices,
        max_triangles: config.max_render_triangles,
    };
    log::warn!("{}", warning);
    Some(warning)
}
