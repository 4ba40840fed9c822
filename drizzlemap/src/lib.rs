//! Drizzlemap - pixel-map footprint geometry for drizzle resampling.
//!
//! Given a pixel map that sends every input pixel center to output-frame
//! coordinates, this library determines which part of the input image lands
//! on the output image and turns that region into per-row column spans:
//! - Forward mapping (bilinear interpolation over the pixel map)
//! - Inverse mapping (golden-section search)
//! - Convex polygon clipping in fixed-capacity buffers
//! - Scanline edge walking over the overlap polygon
//! - Bounding-box reduction of partially undefined pixel maps
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use drizzlemap::{DrizzleContext, PixelMap, build_footprint};
//!
//! let pixmap = PixelMap::identity(100, 80);
//! let ctx = DrizzleContext::new(&pixmap, 200, 160)?;
//! let footprint = build_footprint(&ctx);
//!
//! for span in footprint.into_spans() {
//!     println!("row {}: columns {}..={}", span.y, span.x_min, span.x_max);
//! }
//! ```

mod bbox;
mod config;
mod constants;
mod context;
mod error;
mod footprint;
mod mapping;
mod pixmap;
mod polygon;
mod scanner;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Core types
// ============================================================================

pub use bbox::{Aabb, tight_bounds};
pub use config::MapConfig;
pub use constants::{APPROX_ZERO, IMAGE_OUTLINE_NPTS, MAX_INV_ERR, POLYGON_CAPACITY, VERTEX_ATOL};
pub use context::DrizzleContext;
pub use error::{ContextError, FootprintError, MapError, PolygonError};
pub use pixmap::PixelMap;

// ============================================================================
// Coordinate mapping
// ============================================================================

pub use mapping::{Inversion, interpolate, invert, map_exact, map_point};

// ============================================================================
// Geometry
// ============================================================================

pub use polygon::{Append, Polygon, Vertex, is_contained};
pub use scanner::{Edge, ScanError, ScanState, Scanner, Side};

// ============================================================================
// Footprints
// ============================================================================

pub use footprint::{Footprint, RowSpan, Spans, build_footprint, build_footprints};
