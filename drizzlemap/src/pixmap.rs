//! Discrete input-to-output pixel map.

use glam::DVec2;
use rayon::prelude::*;

/// Read-only grid mapping each input pixel center to output-frame coordinates.
///
/// Stored row-major (`height` rows of `width` cells). A cell with NaN in
/// either component is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelMap {
    cells: Vec<DVec2>,
    width: usize,
    height: usize,
}

impl PixelMap {
    pub fn new(width: usize, height: usize, cells: Vec<DVec2>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "cells length must equal width * height"
        );
        Self {
            cells,
            width,
            height,
        }
    }

    /// Build a map by evaluating `f(x, y)` for every input pixel, rows in parallel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> DVec2 + Sync + Send,
    {
        let mut cells = vec![DVec2::NAN; width * height];
        if width > 0 {
            cells
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, cell) in row.iter_mut().enumerate() {
                        *cell = f(x, y);
                    }
                });
        }
        Self::new(width, height, cells)
    }

    /// Map sending every pixel to the same position in the output frame.
    pub fn identity(width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |x, y| DVec2::new(x as f64, y as f64))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[DVec2] {
        &self.cells
    }

    /// Raw cell value, NaN components included.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the map.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> DVec2 {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside the {}x{} pixel map",
            self.width,
            self.height
        );
        self.cells[y * self.width + x]
    }

    /// Bounds-checked cell lookup with signed indices.
    #[inline]
    pub fn lookup(&self, x: isize, y: isize) -> Option<DVec2> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    /// True if neither component of the cell is NaN.
    #[inline]
    pub fn is_defined(&self, x: usize, y: usize) -> bool {
        !self.get(x, y).is_nan()
    }
}
