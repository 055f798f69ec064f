//! Slice planes and their placement against a bounding box.

use crate::error::{ExtractError, ExtractResult};
use crate::params::ExtractParams;
use glam::DVec3;
use mesh_dataset::Bounds;

/// A plane with a unit normal through `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlicePlane {
    normal: DVec3,
    origin: DVec3,
}

impl SlicePlane {
    /// Creates a plane, normalizing `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidParameter`] for a zero or non-finite
    /// normal.
    pub fn new(normal: DVec3, origin: DVec3) -> ExtractResult<Self> {
        let normal = normal.try_normalize().ok_or_else(|| {
            ExtractError::invalid_parameter("slice_normal", format!("cannot normalize {}", normal))
        })?;
        if !origin.is_finite() {
            return Err(ExtractError::invalid_parameter(
                "slice_origin",
                format!("must be finite, got {}", origin),
            ));
        }
        Ok(Self { normal, origin })
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// A point on the plane.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Signed distance of `point`; positive on the normal side.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// The plane moved `offset` along its normal.
    #[inline]
    pub fn offset(&self, offset: f64) -> Self {
        Self {
            normal: self.normal,
            origin: self.origin + self.normal * offset,
        }
    }

    /// Orthonormal in-plane axes `(u, v)` with `u × v = normal`.
    pub fn basis(&self) -> (DVec3, DVec3) {
        let u = self.normal.any_orthonormal_vector();
        let v = self.normal.cross(u);
        (u, v)
    }
}

/// Plane through the bounding box at `percent` of its extent along `normal`,
/// measured from the center.
pub fn plane_at_percent(bounds: &Bounds, normal: DVec3, percent: f64) -> ExtractResult<SlicePlane> {
    let unit = normal.try_normalize().unwrap_or(DVec3::ZERO);
    let center = bounds.center() + unit * (percent / 100.0 * bounds.extent_along(unit));
    SlicePlane::new(normal, center)
}

/// Offsets of `count` planes `spacing` apart: `(i - count / 2) * spacing`
/// with integer division.
///
/// # Example
///
/// ```rust
/// use mesh_extract::slice::plane_offsets;
///
/// assert_eq!(plane_offsets(3, 0.5), vec![-0.5, 0.0, 0.5]);
/// assert_eq!(plane_offsets(4, 1.0), vec![-2.0, -1.0, 0.0, 1.0]);
/// ```
pub fn plane_offsets(count: u32, spacing: f64) -> Vec<f64> {
    let half = (count / 2) as i64;
    (0..count as i64)
        .map(|i| (i - half) as f64 * spacing)
        .collect()
}

/// Planes requested by `params`, resolved against the live bounds.
///
/// Returns one plane unless multi-slice mode is on.
pub fn planes_for(params: &ExtractParams, bounds: &Bounds) -> ExtractResult<Vec<SlicePlane>> {
    let center = plane_at_percent(
        bounds,
        params.slice_normal_axis.unit(),
        params.slice_position_percent,
    )?;
    if !params.multiple_slices {
        return Ok(vec![center]);
    }
    Ok(plane_offsets(params.slice_count, params.slice_spacing)
        .into_iter()
        .map(|offset| center.offset(offset))
        .collect())
}
