//! # Scalar Color Mapper
//!
//! Maps a scalar field onto per-point RGB colors through a hue
//! [`LookupTable`].
//!
//! ## Rules
//!
//! - No field selected: every point gets [`FALLBACK_COLOR`]
//! - Cell fields are averaged onto the points of their cells
//! - Missing field: elevation gradient along `y`, reported as a warning
//! - NaN values get [`NAN_COLOR`] and are ignored for the range

mod lut;

#[cfg(test)]
mod tests;

pub use lut::{hsv_to_rgb, rgb_to_hue, LookupTable, ScalarRange};

use crate::params::FieldSelection;
use config::constants::{FALLBACK_COLOR, NAN_COLOR};
use mesh_dataset::{ArrayNotFound, Association, Dataset};
use rayon::prelude::*;
use std::borrow::Cow;

/// Per-point colors of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Coloring {
    /// One RGB triple per point.
    pub colors: Vec<[f32; 3]>,
    /// Range the colors were mapped against, if a field was used.
    pub range: Option<ScalarRange>,
    /// Set when the selected field was missing.
    pub missing: Option<ArrayNotFound>,
}

/// Colors every point of `surface`.
///
/// `range` overrides the value range; when `None` it is computed from the
/// field values on `surface`.
pub fn color_points(
    surface: &Dataset,
    selection: Option<&FieldSelection>,
    range: Option<ScalarRange>,
    lut: &LookupTable,
) -> Coloring {
    let Some(selection) = selection else {
        return Coloring {
            colors: vec![FALLBACK_COLOR; surface.point_count()],
            range: None,
            missing: None,
        };
    };

    match point_values(surface, selection) {
        Ok(values) => {
            let range = range.or_else(|| ScalarRange::of(&values));
            Coloring {
                colors: map_values(&values, range, lut),
                range,
                missing: None,
            }
        }
        Err(missing) => {
            log::warn!("{}; coloring by elevation", missing);
            let (values, range) = elevation(surface);
            Coloring {
                colors: map_values(&values, Some(range), lut),
                range: Some(range),
                missing: Some(missing),
            }
        }
    }
}

/// Maps values through the table. Without a range every finite value gets
/// the first entry.
pub fn map_values(values: &[f64], range: Option<ScalarRange>, lut: &LookupTable) -> Vec<[f32; 3]> {
    let range = range.unwrap_or(ScalarRange { min: 0.0, max: 0.0 });
    values
        .par_iter()
        .map(|&v| {
            if v.is_nan() {
                NAN_COLOR
            } else {
                lut.color(v, range)
            }
        })
        .collect()
}

/// Range of the selected field on `dataset`, if present.
pub fn field_range(dataset: &Dataset, selection: &FieldSelection) -> Option<ScalarRange> {
    dataset
        .active_scalar(selection.association, &selection.name)
        .ok()
        .and_then(ScalarRange::of)
}

/// Values of the selection at each point, averaging cell fields.
pub fn point_values<'a>(
    dataset: &'a Dataset,
    selection: &FieldSelection,
) -> Result<Cow<'a, [f64]>, ArrayNotFound> {
    let values = dataset.active_scalar(selection.association, &selection.name)?;
    match selection.association {
        Association::Point => Ok(Cow::Borrowed(values)),
        Association::Cell => Ok(Cow::Owned(cell_to_point(dataset, values))),
    }
}

/// Averages cell values over the cells incident to each point. Points that
/// no cell touches take the smallest finite cell value.
pub fn cell_to_point(dataset: &Dataset, cell_values: &[f64]) -> Vec<f64> {
    let mut sums = vec![0.0; dataset.point_count()];
    let mut counts = vec![0u32; dataset.point_count()];

    for (cell, &value) in dataset.cells().zip(cell_values) {
        if !value.is_finite() {
            continue;
        }
        for &p in cell.point_ids() {
            sums[p as usize] += value;
            counts[p as usize] += 1;
        }
    }

    let fallback = ScalarRange::of(cell_values).map_or(0.0, |r| r.min);
    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| {
            if count == 0 {
                fallback
            } else {
                sum / count as f64
            }
        })
        .collect()
}

/// Elevation gradient: `y` across the dataset bounds.
fn elevation(dataset: &Dataset) -> (Vec<f64>, ScalarRange) {
    let bounds = dataset.bounds();
    let values = (0..dataset.point_count())
        .into_par_iter()
        .map(|i| dataset.point(i).y)
        .collect();
    (values, ScalarRange::new(bounds.min.y, bounds.max.y))
}
