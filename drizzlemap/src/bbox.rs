//! Axis-aligned index boxes and pixel-map bounding-box reduction.

use serde::{Deserialize, Serialize};

use crate::pixmap::PixelMap;

/// Axis-aligned bounding box with `usize` pixel indices.
///
/// Uses inclusive bounds: a pixel at (x, y) is inside if
/// `x_min <= x <= x_max` and `y_min <= y <= y_max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl Aabb {
    #[inline]
    pub const fn new(x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Box covering every pixel of a `width` x `height` image.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[inline]
    pub const fn from_size(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be non-zero");
        Self::new(0, width - 1, 0, height - 1)
    }

    /// Width of the bounding box (number of columns).
    #[inline]
    pub const fn width(&self) -> usize {
        self.x_max.saturating_sub(self.x_min) + 1
    }

    /// Height of the bounding box (number of rows).
    #[inline]
    pub const fn height(&self) -> usize {
        self.y_max.saturating_sub(self.y_min) + 1
    }

    /// Check if a point is inside the bounding box.
    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Check a signed pixel index, treating negative indices as outside.
    #[inline]
    pub fn contains_signed(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && self.contains(x as usize, y as usize)
    }

    #[inline]
    pub const fn is_inverted(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }
}

/// Shrink `bounds` to the tightest box around defined pixel-map cells.
///
/// Scans from the top-left for the first defined cell of every row, then from
/// the bottom-right for the last one. Returns `None` when the defined region
/// does not span at least two columns and two rows.
///
/// # Panics
///
/// Panics if `bounds` is inverted or extends past the pixel map.
pub fn tight_bounds(pixmap: &PixelMap, bounds: Aabb) -> Option<Aabb> {
    assert!(!bounds.is_inverted(), "bounds {bounds:?} are inverted");
    assert!(
        bounds.x_max < pixmap.width() && bounds.y_max < pixmap.height(),
        "bounds {:?} exceed the {}x{} pixel map",
        bounds,
        pixmap.width(),
        pixmap.height()
    );

    let mut x_min = bounds.x_max;
    let mut y_min = bounds.y_max;
    for y in bounds.y_min..=bounds.y_max {
        if let Some(x) = (bounds.x_min..=bounds.x_max).find(|&x| pixmap.is_defined(x, y)) {
            x_min = x_min.min(x);
            y_min = y_min.min(y);
        }
    }

    let mut x_max = x_min;
    let mut y_max = y_min;
    for y in (bounds.y_min..=bounds.y_max).rev() {
        if let Some(x) = (bounds.x_min..=bounds.x_max)
            .rev()
            .find(|&x| pixmap.is_defined(x, y))
        {
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }

    if x_min >= x_max || y_min >= y_max {
        return None;
    }

    Some(Aabb::new(x_min, x_max, y_min, y_max))
}
