//! Numerical constants shared by the mapping and geometry code.

/// Number of vertices in an image outline (a quadrilateral).
pub const IMAGE_OUTLINE_NPTS: usize = 4;

/// Vertex capacity of a [`Polygon`](crate::Polygon).
///
/// The intersection of two image outlines has at most twice as many vertices
/// as either outline, which bounds every polygon this crate builds.
pub const POLYGON_CAPACITY: usize = 2 * IMAGE_OUTLINE_NPTS;

/// Absolute tolerance under which two vertices are considered equal.
pub const VERTEX_ATOL: f64 = 1.0e-12;

/// Threshold for half-plane and collinearity tests.
///
/// Only a guard against round-off around exact zero. Changing it changes which
/// near-collinear configurations count as inside.
pub const APPROX_ZERO: f64 = 1.0e3 * f64::MIN_POSITIVE;

/// Default inversion accuracy in input pixels.
pub const MAX_INV_ERR: f64 = 0.03;

/// Default iteration limit of the inverse mapping search.
pub const MAX_INV_ITERATIONS: usize = 50;

/// Conjugate golden ratio `(√5 - 1) / 2`.
pub(crate) const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_894_8;
