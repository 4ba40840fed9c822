//! Convex polygon intersection by simultaneous boundary walk.

use crate::constants::APPROX_ZERO;
use crate::error::PolygonError;

use super::{
    Append, Polygon, Vertex, equal_vertices, is_contained, is_point_strictly_in_hp, wrap_index,
};

/// Edge pairs with a cross product below this are treated as parallel when
/// deciding which boundary to advance.
const PARALLEL_ATOL: f64 = 1.0e-12;

/// Which polygon's boundary is currently inside the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inside {
    Unknown,
    P,
    Q,
}

/// Cursor over the directed edges of a closed polygon.
struct EdgeWalk<'a> {
    vertices: &'a [Vertex],
    index: usize,
    head: Vertex,
    tail: Vertex,
}

impl<'a> EdgeWalk<'a> {
    /// Starts on the closing edge, from the last vertex to the first.
    fn new(vertices: &'a [Vertex]) -> Self {
        Self {
            vertices,
            index: 0,
            head: vertices[0],
            tail: vertices[vertices.len() - 1],
        }
    }

    #[inline]
    fn direction(&self) -> Vertex {
        self.head - self.tail
    }

    #[inline]
    fn advance(&mut self) {
        self.index += 1;
        self.tail = self.head;
        self.head = self.vertices[wrap_index(self.index as isize, self.vertices.len())];
    }
}

/// Intersect two convex polygons.
///
/// Both inputs are oriented counter-clockwise first. If one contains the
/// other, the contained polygon is returned. Otherwise both boundaries are
/// walked in lockstep for at most `2 * (|p| + |q|)` steps, collecting edge
/// crossings and the vertices of whichever boundary is inside; the walk ends
/// when it returns to the first crossing. Disjoint polygons give an empty
/// polygon. The result is simplified.
pub(super) fn intersect(p: &Polygon, q: &Polygon) -> Result<Polygon, PolygonError> {
    p.ensure_not_degenerate()?;
    q.ensure_not_degenerate()?;

    let mut p = p.clone();
    let mut q = q.clone();
    p.orient_ccw();
    q.orient_ccw();

    if is_contained(&p, &q) {
        p.simplify();
        return Ok(p);
    }
    if is_contained(&q, &p) {
        q.simplify();
        return Ok(q);
    }

    let mut pw = EdgeWalk::new(p.vertices());
    let mut qw = EdgeWalk::new(q.vertices());

    let mut out = Polygon::new();
    let mut inside = Inside::Unknown;
    let mut first: Option<(Vertex, usize)> = None;
    let max_steps = 2 * (p.len() + q.len());
    let mut steps = 0;

    for k in 0..=max_steps {
        steps = k;
        let dp = pw.direction();
        let dq = qw.direction();

        let offset = pw.tail - qw.tail;
        let mut t = offset.y * dq.x - offset.x * dq.y;
        let mut u = offset.y * dp.x - offset.x * dp.y;
        let signed_area = dp.perp_dot(dq);
        let d = if signed_area >= 0.0 {
            signed_area
        } else {
            t = -t;
            u = -u;
            -signed_area
        };

        let p_head_inside_q = is_point_strictly_in_hp(qw.tail, qw.head, pw.head);
        let q_head_inside_p = is_point_strictly_in_hp(pw.tail, pw.head, qw.head);

        if (0.0..=d).contains(&t) && (0.0..=d).contains(&u) && d > APPROX_ZERO {
            let crossing = pw.tail + dp * (t / d);

            match first {
                None => {
                    first = Some((crossing, k));
                    if out.append_vertex(crossing)? == Append::Closed {
                        break;
                    }
                }
                Some((first_crossing, first_k)) if equal_vertices(first_crossing, crossing) => {
                    if k > first_k + 1 {
                        break;
                    }
                    first = Some((first_crossing, k));
                }
                Some(_) => {
                    if out.append_vertex(crossing)? == Append::Closed {
                        break;
                    }
                }
            }

            if p_head_inside_q {
                inside = Inside::P;
            } else if q_head_inside_p {
                inside = Inside::Q;
            }
        }

        let advance_p = if d < PARALLEL_ATOL && !p_head_inside_q && !q_head_inside_p {
            inside != Inside::P
        } else if signed_area >= 0.0 {
            q_head_inside_p
        } else {
            !p_head_inside_q
        };

        if advance_p {
            if inside == Inside::P && out.append_vertex(pw.head)? == Append::Closed {
                break;
            }
            pw.advance();
        } else {
            if inside == Inside::Q && out.append_vertex(qw.head)? == Append::Closed {
                break;
            }
            qw.advance();
        }
    }

    tracing::trace!(
        steps,
        max_steps,
        vertices = out.len(),
        "Convex polygon intersection walk finished"
    );

    out.simplify();
    Ok(out)
}
