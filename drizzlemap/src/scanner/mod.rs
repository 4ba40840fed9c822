//! Scanline rasterization of a convex polygon in input pixel coordinates.
//!
//! The polygon boundary is split at its lowest and highest vertices into a
//! left and a right chain of edges, both ordered by increasing `y`. Rows are
//! then queried bottom to top and each chain's cursor only moves forward.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::bbox::Aabb;
use crate::constants::{POLYGON_CAPACITY, VERTEX_ATOL};
use crate::error::PolygonError;
use crate::polygon::{Polygon, Vertex, wrap_index};

#[cfg(test)]
mod tests;

/// Why a row has no column span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// An edge chain is used up. Every later query fails the same way.
    #[error("scan has passed the top of the polygon")]
    EndOfScan,

    /// The row lies outside the valid rows or outside the polygon.
    #[error("row is outside the scanned region")]
    OutOfBounds,

    #[error("row span has zero width")]
    ZeroWidth,
}

/// Which chain an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Polygon edge as the line `x = m * y + b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Lower end of the edge.
    pub v1: Vertex,
    /// Upper end of the edge.
    pub v2: Vertex,
    pub m: f64,
    pub b: f64,
    /// Intercept shifted half a pixel (plus half the slope) toward the
    /// polygon interior, so `m * y + c` bounds the pixel centers whose
    /// footprint lies entirely inside.
    pub c: f64,
    pub side: Side,
}

impl Edge {
    pub fn new(v1: Vertex, v2: Vertex, side: Side) -> Self {
        let dy = v2.y - v1.y;
        let m = (v2.x - v1.x) / dy;
        let b = (v1.x * v2.y - v1.y * v2.x) / dy;
        let c = b - (0.5 + 0.5 * m.abs()).copysign(side.sign());
        Self {
            v1,
            v2,
            m,
            b,
            c,
            side,
        }
    }

    /// Pixel-center bound of row `y` on this edge.
    #[inline]
    pub fn x_at(&self, y: isize) -> f64 {
        self.m * y as f64 + self.c
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Active,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    left: usize,
    right: usize,
}

/// Row-by-row column limits of a convex polygon.
///
/// Query rows with strictly increasing `y`; a scanner cannot seek backward.
#[derive(Debug, Clone)]
pub struct Scanner {
    left: ArrayVec<Edge, POLYGON_CAPACITY>,
    right: ArrayVec<Edge, POLYGON_CAPACITY>,
    /// `None` once a chain is used up.
    cursor: Option<Cursor>,
    min_y: f64,
    max_y: f64,
    bounds: Aabb,
    tolerance: f64,
}

impl Scanner {
    /// Build the edge chains of a counter-clockwise convex polygon.
    ///
    /// `bounds` are the valid input pixel indices; column limits are clamped
    /// to them. `tolerance` widens every span outward on both sides.
    pub fn new(polygon: &Polygon, bounds: Aabb, tolerance: f64) -> Result<Self, PolygonError> {
        polygon.ensure_not_degenerate()?;
        let v = polygon.vertices();
        let n = v.len();

        // Bottom vertex. A horizontal bottom edge gives one start per chain.
        let mut min_left = 0;
        let mut min_y = v[0].y;
        for (k, vertex) in v.iter().enumerate().skip(1) {
            if vertex.y < min_y {
                min_left = k;
                min_y = vertex.y;
            }
        }
        let before = wrap_index(min_left as isize - 1, n);
        let after = wrap_index(min_left as isize + 1, n);
        let mut min_right = if v[before].y < v[after].y {
            before
        } else {
            after
        };
        if v[min_right].y <= min_y * (1.0 + VERTEX_ATOL.copysign(min_y)) {
            if v[min_left].x > v[min_right].x {
                std::mem::swap(&mut min_left, &mut min_right);
            }
        } else {
            min_right = min_left;
        }

        // Top vertex, likewise.
        let mut max_right = 0;
        let mut max_y = v[0].y;
        for (k, vertex) in v.iter().enumerate().skip(1) {
            if vertex.y > max_y {
                max_right = k;
                max_y = vertex.y;
            }
        }
        let before = wrap_index(max_right as isize - 1, n);
        let after = wrap_index(max_right as isize + 1, n);
        let mut max_left = if v[before].y > v[after].y {
            before
        } else {
            after
        };
        if v[max_left].y >= max_y * (1.0 - VERTEX_ATOL.copysign(max_y)) {
            if v[max_left].x > v[max_right].x {
                std::mem::swap(&mut max_left, &mut max_right);
            }
        } else {
            max_left = max_right;
        }

        // Left chain follows decreasing vertex indices up from the bottom,
        // right chain increasing ones.
        if max_left > min_left {
            min_left += n;
        }
        let left = (0..min_left - max_left)
            .map(|k| {
                let i1 = wrap_index((min_left - k) as isize, n);
                let i2 = wrap_index(i1 as isize - 1, n);
                Edge::new(v[i1], v[i2], Side::Left)
            })
            .collect::<ArrayVec<_, POLYGON_CAPACITY>>();

        if max_right < min_right {
            max_right += n;
        }
        let right = (0..max_right - min_right)
            .map(|k| {
                let i1 = wrap_index((min_right + k) as isize, n);
                let i2 = wrap_index(i1 as isize + 1, n);
                Edge::new(v[i1], v[i2], Side::Right)
            })
            .collect::<ArrayVec<_, POLYGON_CAPACITY>>();

        let cursor = (!left.is_empty() && !right.is_empty()).then_some(Cursor { left: 0, right: 0 });

        Ok(Self {
            left,
            right,
            cursor,
            min_y,
            max_y,
            bounds,
            tolerance,
        })
    }

    /// Scanner that yields no rows.
    pub fn exhausted(bounds: Aabb) -> Self {
        Self {
            left: ArrayVec::new(),
            right: ArrayVec::new(),
            cursor: None,
            min_y: 0.0,
            max_y: 0.0,
            bounds,
            tolerance: 0.0,
        }
    }

    pub fn state(&self) -> ScanState {
        if self.cursor.is_some() {
            ScanState::Active
        } else {
            ScanState::Exhausted
        }
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn left_edges(&self) -> &[Edge] {
        &self.left
    }

    pub fn right_edges(&self) -> &[Edge] {
        &self.right
    }

    /// Inclusive column range of row `y` whose pixels lie inside the polygon.
    ///
    /// Rows must be queried in strictly increasing order. Edges that end
    /// below the row are skipped for good; running off the top of either
    /// chain ends the scan. Each side's bound is taken from the edges at the
    /// bottom and at the top of the row's band, widened by the tolerance and
    /// clamped to the valid columns, and the narrower span wins.
    pub fn scanline_limits(&mut self, y: isize) -> Result<(isize, isize), ScanError> {
        let Some(mut cursor) = self.cursor else {
            return Err(ScanError::EndOfScan);
        };

        let bounds = self.bounds;
        if y < bounds.y_min as isize || y > bounds.y_max as isize {
            return Err(ScanError::OutOfBounds);
        }

        let pyb = y as f64 - 0.5;
        let pyt = y as f64 + 0.5;
        if pyt <= self.min_y || pyb >= self.max_y + 1.0 {
            return Err(ScanError::OutOfBounds);
        }

        let tol = self.tolerance;

        if !advance_past(&self.left, &mut cursor.left, |e| pyb > e.v2.y)
            || !advance_past(&self.right, &mut cursor.right, |e| pyb > e.v2.y)
        {
            self.cursor = None;
            return Err(ScanError::EndOfScan);
        }
        let mut xlb = self.left[cursor.left].x_at(y) - tol;
        let mut xrb = self.right[cursor.right].x_at(y) + tol;

        let past_top = |e: &Edge| pyt > e.v2.y + 0.5 + tol;
        if !advance_past(&self.left, &mut cursor.left, past_top)
            || !advance_past(&self.right, &mut cursor.right, past_top)
        {
            self.cursor = None;
            return Err(ScanError::EndOfScan);
        }
        self.cursor = Some(cursor);

        let mut xlt = self.left[cursor.left].x_at(y) - tol;
        let mut xrt = self.right[cursor.right].x_at(y) + tol;

        let x_min = bounds.x_min as f64;
        let x_max = bounds.x_max as f64;
        xlb = xlb.max(x_min);
        xlt = xlt.max(x_min);
        xrb = xrb.min(x_max);
        xrt = xrt.min(x_max);

        let (x1, x2) = if xlt >= xrt {
            if xlb >= xrb {
                return Err(ScanError::ZeroWidth);
            }
            (xlb, xrb)
        } else if xlb >= xrb {
            (xlt, xrt)
        } else {
            (xlb.max(xlt), xrb.min(xrt))
        };

        Ok((x1.round() as isize, x2.round() as isize))
    }
}

/// Move `cursor` up the chain while `past` holds for its edge.
/// Returns `false` when the last edge is passed.
fn advance_past(edges: &[Edge], cursor: &mut usize, past: impl Fn(&Edge) -> bool) -> bool {
    while past(&edges[*cursor]) {
        if *cursor + 1 == edges.len() {
            return false;
        }
        *cursor += 1;
    }
    true
}
