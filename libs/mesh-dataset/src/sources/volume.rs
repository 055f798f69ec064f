//! Synthetic structured volumes.

use crate::dataset::Dataset;
use crate::error::LoadResult;
use crate::structured::StructuredGrid;
use glam::DVec3;

/// Name of the point array written by [`structured_volume`].
pub const DISTANCE_ARRAY: &str = "Distance";

/// Creates a structured volume whose `Distance` point array holds each
/// point's distance from the grid center.
///
/// # Example
///
/// ```rust
/// use mesh_dataset::sources::structured_volume;
/// use glam::DVec3;
///
/// let volume = structured_volume([20, 20, 20], DVec3::ZERO, DVec3::ONE).unwrap();
/// assert_eq!(volume.point_count(), 8000);
/// ```
pub fn structured_volume(dims: [usize; 3], origin: DVec3, spacing: DVec3) -> LoadResult<Dataset> {
    let grid = StructuredGrid::new(dims, origin, spacing)?;
    let (min, max) = grid.corners();
    let center = (min + max) * 0.5;

    let distance = (0..grid.point_count())
        .map(|index| grid.point(index).distance(center))
        .collect();

    Dataset::structured(grid).with_point_array(DISTANCE_ARRAY, distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Association, DatasetKind};
    use approx::assert_relative_eq;

    #[test]
    fn test_volume_distance_field() {
        let volume = structured_volume([3, 3, 3], DVec3::ZERO, DVec3::ONE).unwrap();
        assert_eq!(volume.kind(), DatasetKind::Structured);

        let values = volume
            .active_scalar(Association::Point, DISTANCE_ARRAY)
            .unwrap();
        assert_eq!(values.len(), 27);
        // Center point (1, 1, 1) has index 13.
        assert_relative_eq!(values[13], 0.0);
        assert_relative_eq!(values[0], 3.0_f64.sqrt());
    }

    #[test]
    fn test_volume_rejects_zero_dims() {
        assert!(structured_volume([0, 3, 3], DVec3::ZERO, DVec3::ONE).is_err());
    }
}
