//! # Extraction Parameters
//!
//! The request record of one extraction call. Parameters arrive as JSON from
//! the dashboard and are validated before any work is done.

use crate::error::{ExtractError, ExtractResult};
use config::constants::{
    DEFAULT_OPACITY, DEFAULT_SLICE_COUNT, DEFAULT_SLICE_SPACING, MIN_SLICE_COUNT,
    SLICE_POSITION_MAX, SLICE_POSITION_MIN,
};
use glam::DVec3;
use mesh_dataset::Association;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Coordinate axis used as a slice normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along the axis.
    #[inline]
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }
}

/// A scalar field chosen for coloring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSelection {
    /// Whether the array is point or cell data.
    pub association: Association,
    /// Array name.
    pub name: String,
}

impl FieldSelection {
    /// Selects a point array.
    pub fn point(name: impl Into<String>) -> Self {
        Self {
            association: Association::Point,
            name: name.into(),
        }
    }

    /// Selects a cell array.
    pub fn cell(name: impl Into<String>) -> Self {
        Self {
            association: Association::Cell,
            name: name.into(),
        }
    }
}

/// Parameters of one extraction request.
///
/// Missing JSON fields take their defaults.
///
/// # Example
///
/// ```rust
/// use mesh_extract::{Axis, ExtractParams};
///
/// let params: ExtractParams = serde_json::from_str(
///     r#"{ "slicing_enabled": true, "slice_normal_axis": "z", "slice_position_percent": 25.0 }"#,
/// )
/// .unwrap();
/// assert_eq!(params.slice_normal_axis, Axis::Z);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractParams {
    /// Field to color by; `None` paints the fallback color.
    pub active_field: Option<FieldSelection>,
    /// Cut the dataset instead of showing its surface.
    pub slicing_enabled: bool,
    /// Normal of the slice planes.
    pub slice_normal_axis: Axis,
    /// Plane position in `[-50, 50]` percent of the extent along the normal.
    pub slice_position_percent: f64,
    /// Cut with `slice_count` parallel planes.
    pub multiple_slices: bool,
    /// Plane count in multi-slice mode.
    pub slice_count: u32,
    /// Distance between neighbouring planes (world units).
    pub slice_spacing: f64,
    /// Echoed into the packed geometry.
    pub opacity: f32,
    /// Echoed into the packed geometry.
    pub wireframe: bool,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            active_field: None,
            slicing_enabled: false,
            slice_normal_axis: Axis::X,
            slice_position_percent: 0.0,
            multiple_slices: false,
            slice_count: DEFAULT_SLICE_COUNT,
            slice_spacing: DEFAULT_SLICE_SPACING,
            opacity: DEFAULT_OPACITY,
            wireframe: false,
        }
    }
}

impl ExtractParams {
    /// Parses a JSON request.
    pub fn from_json(text: &str) -> ExtractResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Colors by `field`.
    pub fn with_field(mut self, field: FieldSelection) -> Self {
        self.active_field = Some(field);
        self
    }

    /// Enables single-plane slicing.
    pub fn with_slice(mut self, axis: Axis, position_percent: f64) -> Self {
        self.slicing_enabled = true;
        self.slice_normal_axis = axis;
        self.slice_position_percent = position_percent;
        self
    }

    /// Switches slicing to `count` planes `spacing` apart.
    pub fn with_multiple_slices(mut self, count: u32, spacing: f64) -> Self {
        self.multiple_slices = true;
        self.slice_count = count;
        self.slice_spacing = spacing;
        self
    }

    /// Checks every parameter against its documented range.
    ///
    /// Slice parameters are checked even when slicing is disabled.
    pub fn validate(&self) -> ExtractResult<()> {
        if !(SLICE_POSITION_MIN..=SLICE_POSITION_MAX).contains(&self.slice_position_percent) {
            return Err(ExtractError::invalid_parameter(
                "slice_position_percent",
                format!(
                    "must be in [{}, {}], got {}",
                    SLICE_POSITION_MIN, SLICE_POSITION_MAX, self.slice_position_percent
                ),
            ));
        }
        if self.slice_count < MIN_SLICE_COUNT {
            return Err(ExtractError::invalid_parameter(
                "slice_count",
                format!(
                    "must be at least {}, got {}",
                    MIN_SLICE_COUNT, self.slice_count
                ),
            ));
        }
        if !(self.slice_spacing > 0.0 && self.slice_spacing.is_finite()) {
            return Err(ExtractError::invalid_parameter(
                "slice_spacing",
                format!("must be positive, got {}", self.slice_spacing),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ExtractError::invalid_parameter(
                "opacity",
                format!("must be in [0, 1], got {}", self.opacity),
            ));
        }
        Ok(())
    }

    /// Value hash of every parameter. Floats hash by bit pattern.
    pub fn parameters_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.active_field.hash(&mut hasher);
        self.slicing_enabled.hash(&mut hasher);
        self.slice_normal_axis.hash(&mut hasher);
        self.slice_position_percent.to_bits().hash(&mut hasher);
        self.multiple_slices.hash(&mut hasher);
        self.slice_count.hash(&mut hasher);
        self.slice_spacing.to_bits().hash(&mut hasher);
        self.opacity.to_bits().hash(&mut hasher);
        self.wireframe.hash(&mut hasher);
        hasher.finish()
    }
}
