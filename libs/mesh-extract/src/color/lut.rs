//! Hue lookup table.

use config::constants::{approx_equal, HUE_MAX, HUE_MIN, LOOKUP_TABLE_SIZE};
use serde::{Deserialize, Serialize};

/// Closed value range of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarRange {
    pub min: f64,
    pub max: f64,
}

impl ScalarRange {
    /// Creates a range; `min` and `max` are swapped if given in reverse.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Range of the finite values, or `None` if there are none.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_extract::color::ScalarRange;
    ///
    /// let range = ScalarRange::of(&[3.0, f64::NAN, -1.0, 7.5]).unwrap();
    /// assert_eq!((range.min, range.max), (-1.0, 7.5));
    /// ```
    pub fn of(values: &[f64]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Self>, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Width of the range.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if both ends coincide within `EPSILON`.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        approx_equal(self.min, self.max)
    }

    /// Returns true if `value` lies inside the range.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Precomputed table of fully saturated colors sweeping a hue range.
///
/// # Example
///
/// ```rust
/// use mesh_extract::color::{LookupTable, ScalarRange};
///
/// let lut = LookupTable::default();
/// let range = ScalarRange::new(0.0, 1.0);
/// assert_eq!(lut.color(0.0, range)[2], 1.0);
/// assert_eq!(lut.color(1.0, range), [1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    hue_range: (f64, f64),
    entries: Vec<[f32; 3]>,
}

impl LookupTable {
    /// Builds a table of `size` entries from `hue_start` to `hue_end`.
    ///
    /// Sizes below 2 are raised to 2.
    pub fn new(hue_start: f64, hue_end: f64, size: usize) -> Self {
        let size = size.max(2);
        let entries = (0..size)
            .map(|i| {
                let t = i as f64 / (size - 1) as f64;
                hsv_to_rgb(hue_start + (hue_end - hue_start) * t, 1.0, 1.0)
            })
            .collect();
        Self {
            hue_range: (hue_start, hue_end),
            entries,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a table holds at least two entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hue at the first and last entry.
    #[inline]
    pub fn hue_range(&self) -> (f64, f64) {
        self.hue_range
    }

    /// Entry index for `value`. Values outside the range clamp to the ends;
    /// a zero-width range maps to the first entry.
    pub fn index_of(&self, value: f64, range: ScalarRange) -> usize {
        let last = self.entries.len() - 1;
        let width = range.width();
        if range.is_degenerate() || !(width > 0.0) {
            return 0;
        }
        let scaled = (value - range.min) / width * self.entries.len() as f64;
        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        }
    }

    /// Hue of entry `index`.
    #[inline]
    pub fn hue_at(&self, index: usize) -> f64 {
        let (start, end) = self.hue_range;
        start + (end - start) * index as f64 / (self.entries.len() - 1) as f64
    }

    /// Color of `value` within `range`.
    #[inline]
    pub fn color(&self, value: f64, range: ScalarRange) -> [f32; 3] {
        self.entries[self.index_of(value, range)]
    }

    /// Value at the center of the entry whose color is closest to `rgb`.
    ///
    /// Returns `None` when no entry lies within `1e-3` per channel.
    pub fn decode(&self, rgb: [f32; 3], range: ScalarRange) -> Option<f64> {
        let (index, distance) = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let d = (0..3)
                    .map(|c| (e[c] - rgb[c]).abs())
                    .fold(0.0_f32, f32::max);
                (i, d)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        if distance > 1e-3 {
            return None;
        }
        let step = range.width() / self.entries.len() as f64;
        Some(range.min + (index as f64 + 0.5) * step)
    }
}

impl Default for LookupTable {
    /// Blue-to-red table with 256 entries.
    fn default() -> Self {
        Self::new(HUE_MIN, HUE_MAX, LOOKUP_TABLE_SIZE)
    }
}

/// Converts hue/saturation/value in `[0, 1]` to RGB in `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use mesh_extract::color::hsv_to_rgb;
///
/// assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]);
/// ```
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [f32; 3] {
    let h = hue.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match sector as u32 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    [r as f32, g as f32, b as f32]
}

/// Hue in `[0, 1)` of an RGB color; gray maps to 0.
pub fn rgb_to_hue(rgb: [f32; 3]) -> f64 {
    let [r, g, b] = rgb.map(f64::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta <= 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    sector / 6.0
}
