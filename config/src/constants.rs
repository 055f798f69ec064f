//! # Configuration Constants
//!
//! Centralized constants for the extraction pipeline. Precision values,
//! slicing parameters, decimation policy, color mapping and render budgets
//! are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Slicing**: Slice position range and multi-slice defaults
//! - **Decimation**: Stride policy and Delaunay tolerance
//! - **Limits**: Render budgets that trigger oversize warnings
//! - **Color**: Lookup table layout and fallback colors
//! - **Sources**: Defaults for procedurally generated datasets

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance below which a point counts as lying exactly on a slice plane.
///
/// Points within this band are treated as "on the plane" rather than on
/// either side, so a cell face lying in the plane still produces a polygon.
///
/// # Example
///
/// ```rust
/// use config::constants::PLANE_TOLERANCE;
///
/// let signed_distance = 1e-12_f64;
/// assert!(signed_distance.abs() <= PLANE_TOLERANCE);
/// ```
pub const PLANE_TOLERANCE: f64 = 1e-9;

/// Epsilon for merging intersection points that coincide on a cut polygon.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

// =============================================================================
// SLICING CONSTANTS
// =============================================================================

/// Lowest accepted slice position, as a percentage of the extent along the
/// slice normal measured from the bounding-box center.
pub const SLICE_POSITION_MIN: f64 = -50.0;

/// Highest accepted slice position percentage.
pub const SLICE_POSITION_MAX: f64 = 50.0;

/// Minimum plane count in multi-slice mode.
///
/// # Example
///
/// ```rust
/// use config::constants::{MIN_SLICE_COUNT, DEFAULT_SLICE_COUNT};
/// assert!(DEFAULT_SLICE_COUNT >= MIN_SLICE_COUNT);
/// ```
pub const MIN_SLICE_COUNT: u32 = 2;

/// Default plane count in multi-slice mode.
pub const DEFAULT_SLICE_COUNT: u32 = 3;

/// Default distance between neighbouring planes in multi-slice mode
/// (world units).
pub const DEFAULT_SLICE_SPACING: f64 = 0.1;

/// Structured inputs with more implicit cells than this (64³) are reduced with the
/// strided-hexahedra policy before being cut or surfaced.
pub const MAX_SLICE_INPUT_CELLS: usize = 262_144;

// =============================================================================
// DECIMATION CONSTANTS
// =============================================================================

/// Divisor of the smallest grid dimension used to derive the decimation
/// stride: `stride = max(1, min(nx, ny, nz) / STRIDE_DIVISOR)`.
///
/// # Example
///
/// ```rust
/// use config::constants::STRIDE_DIVISOR;
///
/// let stride = (100 / STRIDE_DIVISOR).max(1);
/// assert_eq!(stride, 5);
/// ```
pub const STRIDE_DIVISOR: usize = 20;

/// Point-merging tolerance of the point-cloud tetrahedralization, as a
/// fraction of the bounding-box diagonal.
pub const DELAUNAY_TOLERANCE: f64 = 0.01;

/// Scale of the enclosing super-tetrahedron relative to the bounding-box
/// diagonal during tetrahedralization.
pub const DELAUNAY_SUPER_SCALE: f64 = 50.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Vertex budget of one packed geometry. Exceeding it produces an oversize
/// warning; the geometry is never truncated.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_RENDER_VERTICES;
///
/// let vertex_count = 1000;
/// assert!(vertex_count < MAX_RENDER_VERTICES);
/// ```
pub const MAX_RENDER_VERTICES: usize = 2_000_000;

/// Triangle budget of one packed geometry.
pub const MAX_RENDER_TRIANGLES: usize = 4_000_000;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Hue at the low end of the scalar range (blue).
pub const HUE_MIN: f64 = 0.667;

/// Hue at the high end of the scalar range (red).
pub const HUE_MAX: f64 = 0.0;

/// Number of samples in the color lookup table.
pub const LOOKUP_TABLE_SIZE: usize = 256;

/// Color used for every point when no scalar field is selected (orange).
///
/// RGB values in range [0.0, 1.0].
pub const FALLBACK_COLOR: [f32; 3] = [1.0, 0.5, 0.0];

/// Color used for NaN scalar values.
pub const NAN_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

// =============================================================================
// SOURCE CONSTANTS
// =============================================================================

/// Default theta/phi resolution of the sphere shown before a file is loaded.
pub const DEFAULT_SPHERE_RESOLUTION: u32 = 30;

/// Default radius of the sphere shown before a file is loaded.
pub const DEFAULT_SPHERE_RADIUS: f64 = 0.5;

/// Low point of the elevation gradient (y coordinate mapped to 0.0).
pub const ELEVATION_LOW: f64 = -1.0;

/// High point of the elevation gradient (y coordinate mapped to 1.0).
pub const ELEVATION_HIGH: f64 = 1.0;

// =============================================================================
// MATERIAL CONSTANTS
// =============================================================================

/// Opacity echoed when a request does not specify one.
pub const DEFAULT_OPACITY: f32 = 1.0;

// =============================================================================
// EXTRACT CONFIG
// =============================================================================

/// Immutable snapshot of the tunable extraction settings.
///
/// # Examples
/// ```
/// use config::constants::ExtractConfig;
/// let config = ExtractConfig::default();
/// assert!(config.plane_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractConfig {
    /// Distance below which a point is on a slice plane.
    pub plane_tolerance: f64,
    /// Divisor used to derive the structured decimation stride.
    pub stride_divisor: usize,
    /// Point-merging tolerance for point-cloud tetrahedralization.
    pub delaunay_tolerance: f64,
    /// Vertex budget before an oversize warning.
    pub max_render_vertices: usize,
    /// Triangle budget before an oversize warning.
    pub max_render_triangles: usize,
    /// Structured cell count above which inputs are decimated before cutting.
    pub max_slice_input_cells: usize,
}

impl ExtractConfig {
    /// Builds a configuration, rejecting tolerances that are not positive and
    /// a zero stride divisor.
    ///
    /// Budgets keep their defaults; adjust them on the returned value.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ExtractConfig;
    /// let cfg = ExtractConfig::new(1.0e-6, 0.05, 10).expect("valid config");
    /// assert_eq!(cfg.stride_divisor, 10);
    /// assert!(ExtractConfig::new(0.0, 0.05, 10).is_err());
    /// ```
    pub fn new(
        plane_tolerance: f64,
        delaunay_tolerance: f64,
        stride_divisor: usize,
    ) -> Result<Self, ConfigError> {
        if !(plane_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(plane_tolerance));
        }
        if !(delaunay_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(delaunay_tolerance));
        }
        if stride_divisor == 0 {
            return Err(ConfigError::InvalidStrideDivisor(stride_divisor));
        }
        Ok(Self {
            plane_tolerance,
            delaunay_tolerance,
            stride_divisor,
            ..Self::default()
        })
    }

    /// Decimation stride for a structured grid with the given point
    /// dimensions.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ExtractConfig;
    /// let cfg = ExtractConfig::default();
    /// assert_eq!(cfg.stride_for([100, 100, 100]), 5);
    /// assert_eq!(cfg.stride_for([10, 200, 200]), 1);
    /// ```
    pub fn stride_for(&self, dims: [usize; 3]) -> usize {
        let smallest = dims.iter().copied().min().unwrap_or(0);
        (smallest / self.stride_divisor).max(1)
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            plane_tolerance: PLANE_TOLERANCE,
            stride_divisor: STRIDE_DIVISOR,
            delaunay_tolerance: DELAUNAY_TOLERANCE,
            max_render_vertices: MAX_RENDER_VERTICES,
            max_render_triangles: MAX_RENDER_TRIANGLES,
            max_slice_input_cells: MAX_SLICE_INPUT_CELLS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the stride divisor is zero.
    InvalidStrideDivisor(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidStrideDivisor(value) => {
                write!(f, "stride divisor must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
