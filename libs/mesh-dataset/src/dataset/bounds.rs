//! Axis-aligned bounding box.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with inclusive corners.
///
/// # Example
///
/// ```rust
/// use mesh_dataset::Bounds;
/// use glam::DVec3;
///
/// let bounds = Bounds::from_points([DVec3::ZERO, DVec3::new(2.0, 4.0, 6.0)]).unwrap();
/// assert_eq!(bounds.center(), DVec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Bounds {
    /// Creates bounds from two corners.
    #[inline]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.min(p), acc.max.max(p))
        }))
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.size().length()
    }

    /// Extent of the box along a unit direction.
    ///
    /// For an axis direction this is the edge length along that axis.
    #[inline]
    pub fn extent_along(&self, direction: DVec3) -> f64 {
        self.size().dot(direction.abs())
    }

    /// Returns true if `point` lies inside or on the box.
    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Merges two boxes.
    #[inline]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(self.min.min(other.min), self.max.max(other.max))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::ZERO)
    }
}
