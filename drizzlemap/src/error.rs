//! Error types for mapping, geometry and footprint construction.

use thiserror::Error;

use crate::bbox::Aabb;

/// Errors from evaluating the pixel map.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapError {
    /// The pixel map has no defined value at this position.
    #[error("pixel map is undefined at ({x:.2}, {y:.2})")]
    Undefined { x: f64, y: f64 },

    #[error("pixel ({i}, {j}) is outside the {width}x{height} pixel map")]
    OutOfRange {
        i: isize,
        j: isize,
        width: usize,
        height: usize,
    },

    /// An exact lookup inside the pixel map but outside the context's valid bounds.
    #[error("pixel ({i}, {j}) is outside the valid bounds {bounds:?}")]
    OutsideBounds { i: isize, j: isize, bounds: Aabb },

    /// Bilinear interpolation needs at least a 2x2 neighborhood.
    #[error("pixel map of {width}x{height} is too small to interpolate")]
    TooSmall { width: usize, height: usize },
}

/// Errors from the polygon kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolygonError {
    #[error("polygon with {vertices} vertices has no area")]
    Degenerate { vertices: usize },

    #[error("polygon vertex capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
}

/// Reasons why an input image has no usable overlap with the output image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FootprintError {
    #[error("error computing input image bounding box: {0}")]
    ForwardMapping(#[source] MapError),

    #[error("overlap polygon is invalid: {0}")]
    Polygon(#[from] PolygonError),

    #[error("input image does not overlap the output image")]
    NoOverlap,

    #[error("failed to invert pixel map at position ({x:.2}, {y:.2}): {source}")]
    Inversion {
        x: f64,
        y: f64,
        #[source]
        source: MapError,
    },

    #[error("failed to invert pixel map at position ({x:.2}, {y:.2}): no convergence")]
    InversionDiverged { x: f64, y: f64 },
}

/// Errors from building a [`DrizzleContext`](crate::DrizzleContext).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("pixel map is empty")]
    EmptyPixelMap,

    #[error("output image {width}x{height} is empty")]
    EmptyOutput { width: usize, height: usize },

    #[error("bounds {bounds:?} are inverted")]
    InvertedBounds { bounds: Aabb },

    #[error("bounds {bounds:?} exceed the {width}x{height} pixel map")]
    BoundsOutsidePixelMap {
        bounds: Aabb,
        width: usize,
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_error_message() {
        let err = MapError::Undefined { x: 1.5, y: -0.25 };
        assert_eq!(err.to_string(), "pixel map is undefined at (1.50, -0.25)");
    }

    #[test]
    fn test_out_of_range_error_message() {
        let err = MapError::OutOfRange {
            i: -1,
            j: 4,
            width: 10,
            height: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("(-1, 4)"));
        assert!(msg.contains("10x20"));
    }

    #[test]
    fn test_outside_bounds_error_message() {
        let err = MapError::OutsideBounds {
            i: 7,
            j: 3,
            bounds: Aabb::new(0, 4, 0, 9),
        };
        let msg = err.to_string();
        assert!(msg.contains("(7, 3)"), "unexpected message: {}", msg);
        assert!(msg.contains("valid bounds"), "unexpected message: {}", msg);
        assert!(!msg.contains("pixel map"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_inversion_error_names_position() {
        let err = FootprintError::InversionDiverged { x: 12.25, y: 6.0 };
        assert_eq!(
            err.to_string(),
            "failed to invert pixel map at position (12.25, 6.00): no convergence"
        );
    }

    #[test]
    fn test_footprint_error_source_chain() {
        use std::error::Error as StdError;

        let err = FootprintError::ForwardMapping(MapError::Undefined { x: 0.0, y: 0.0 });
        assert!(err.source().is_some());

        let err = FootprintError::from(PolygonError::Degenerate { vertices: 2 });
        assert_eq!(
            err,
            FootprintError::Polygon(PolygonError::Degenerate { vertices: 2 })
        );
    }

    #[test]
    fn test_bounds_error_message() {
        let err = ContextError::BoundsOutsidePixelMap {
            bounds: Aabb::new(0, 10, 0, 10),
            width: 5,
            height: 5,
        };
        assert!(err.to_string().contains("5x5"));
    }
}
