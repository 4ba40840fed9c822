//! Small convex polygons in fixed-capacity buffers.
//!
//! Polygons here never hold more than [`POLYGON_CAPACITY`] vertices: they are
//! image outlines (four corners) or the intersection of two of them. A
//! normalized polygon is counter-clockwise, has no consecutive duplicates and
//! does not repeat its first vertex at the end.

use arrayvec::ArrayVec;
use glam::DVec2;

use crate::constants::{APPROX_ZERO, POLYGON_CAPACITY, VERTEX_ATOL};
use crate::error::PolygonError;

mod intersect;


pub type Vertex = DVec2;

/// Outcome of [`Polygon::append_vertex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Append {
    Added,
    /// The vertex equals the last vertex and was skipped.
    Duplicate,
    /// The vertex equals the first vertex: the ring is complete.
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: ArrayVec<Vertex, POLYGON_CAPACITY>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygon with the given vertices, taken as is.
    pub fn from_vertices(vertices: &[Vertex]) -> Result<Self, PolygonError> {
        let vertices = ArrayVec::try_from(vertices).map_err(|_| PolygonError::CapacityExceeded {
            capacity: POLYGON_CAPACITY,
        })?;
        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle, counter-clockwise from the `min` corner.
    pub fn rectangle(min: Vertex, max: Vertex) -> Self {
        let mut vertices = ArrayVec::new();
        vertices.push(min);
        vertices.push(DVec2::new(max.x, min.y));
        vertices.push(max);
        vertices.push(DVec2::new(min.x, max.y));
        Self { vertices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Fewer than three vertices enclose no area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    pub(crate) fn ensure_not_degenerate(&self) -> Result<(), PolygonError> {
        if self.is_degenerate() {
            return Err(PolygonError::Degenerate {
                vertices: self.len(),
            });
        }
        Ok(())
    }

    /// Shoelace area, positive for counter-clockwise order.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|k| self.vertices[k].perp_dot(self.vertices[(k + 1) % n]))
            .sum();
        0.5 * twice
    }

    /// Reverse the vertex order if the polygon winds clockwise.
    ///
    /// The winding is judged from the first two vertices taken relative to
    /// the centroid, which is exact for convex polygons.
    pub fn orient_ccw(&mut self) {
        let n = self.vertices.len();
        if n < 3 {
            return;
        }

        let centroid = self.vertices.iter().copied().sum::<DVec2>() / n as f64;
        let v1 = self.vertices[0] - centroid;
        let v2 = self.vertices[1] - centroid;

        if v1.perp_dot(v2) < 0.0 {
            self.vertices.reverse();
        }
    }

    /// Append `vertex` unless it repeats the last or the first vertex.
    pub fn append_vertex(&mut self, vertex: Vertex) -> Result<Append, PolygonError> {
        if let Some(&last) = self.vertices.last()
            && equal_vertices(last, vertex)
        {
            return Ok(Append::Duplicate);
        }
        if let Some(&first) = self.vertices.first()
            && equal_vertices(first, vertex)
        {
            return Ok(Append::Closed);
        }
        self.vertices
            .try_push(vertex)
            .map_err(|_| PolygonError::CapacityExceeded {
                capacity: POLYGON_CAPACITY,
            })?;
        Ok(Append::Added)
    }

    /// Drop vertices lying on the line through their neighbors, and vertices
    /// whose neighbors coincide.
    pub fn simplify(&mut self) {
        let n = self.vertices.len();
        if n < 3 {
            return;
        }

        let mut kept = ArrayVec::<Vertex, POLYGON_CAPACITY>::new();
        for k in 0..n {
            let prev = self.vertices[wrap_index(k as isize - 1, n)];
            let cur = self.vertices[k];
            let next = self.vertices[wrap_index(k as isize + 1, n)];

            let chord = next - prev;
            let arm = cur - prev;
            if chord.perp_dot(arm).abs() > APPROX_ZERO && chord.length() > VERTEX_ATOL {
                kept.push(cur);
            }
        }

        self.vertices = kept;
    }

    /// Convex intersection of `self` and `other`.
    ///
    /// Fails only for degenerate inputs or if the result outgrows the vertex
    /// capacity. Disjoint polygons give an empty polygon.
    pub fn intersect(&self, other: &Polygon) -> Result<Polygon, PolygonError> {
        intersect::intersect(self, other)
    }
}

/// True if every vertex of `p` lies in the closed inner half-plane of every
/// edge of `q`. Both polygons are expected counter-clockwise.
pub fn is_contained(p: &Polygon, q: &Polygon) -> bool {
    let qv = q.vertices();
    let Some(&last) = qv.last() else {
        return true;
    };

    let mut v_ = last;
    for &v in qv {
        if !p.vertices().iter().all(|&pt| is_point_in_hp(pt, v_, v)) {
            return false;
        }
        v_ = v;
    }
    true
}

#[inline]
pub(crate) fn equal_vertices(a: Vertex, b: Vertex) -> bool {
    (a.x - b.x).abs() < VERTEX_ATOL && (a.y - b.y).abs() < VERTEX_ATOL
}

/// `(v - v_) x (pt - v_)`, expanded the way the half-plane tests evaluate it.
#[inline]
fn half_plane_area(pt: Vertex, v_: Vertex, v: Vertex) -> f64 {
    v.perp_dot(pt) - v_.perp_dot(pt) - v.perp_dot(v_)
}

/// `pt` is left of, or on, the directed line from `v_` to `v`.
#[inline]
pub(crate) fn is_point_in_hp(pt: Vertex, v_: Vertex, v: Vertex) -> bool {
    half_plane_area(pt, v_, v) >= -APPROX_ZERO
}

/// `pt` is strictly left of the directed line from `v_` to `v`.
#[inline]
pub(crate) fn is_point_strictly_in_hp(pt: Vertex, v_: Vertex, v: Vertex) -> bool {
    half_plane_area(pt, v_, v) > APPROX_ZERO
}

/// `a` modulo `n` for `a >= -n`.
///
/// Circular indexing only ever steps one vertex back from zero, so the
/// single addition is enough.
#[inline]
pub(crate) fn wrap_index(a: isize, n: usize) -> usize {
    debug_assert!(n > 0 && a >= -(n as isize));
    ((a + n as isize) % n as isize) as usize
}
