//! Overlap of an input image with the output image, in input pixel rows.
//!
//! The valid input rectangle is projected into the output frame, clipped
//! against the output image, and the clipped outline is inverted back into
//! input coordinates. The resulting convex polygon is handed to a
//! [`Scanner`] that yields the input columns to resample on every row.

use std::ops::RangeInclusive;

use arrayvec::ArrayVec;
use glam::DVec2;
use rayon::prelude::*;

use crate::constants::{IMAGE_OUTLINE_NPTS, POLYGON_CAPACITY};
use crate::context::DrizzleContext;
use crate::error::FootprintError;
use crate::mapping::{invert, map_point};
use crate::polygon::{Polygon, Vertex};
use crate::scanner::{ScanError, Scanner};


/// Inclusive column range of one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub y: isize,
    pub x_min: isize,
    pub x_max: isize,
}

/// Scanner over the overlap polygon plus the input rows worth scanning.
///
/// When no usable overlap exists the footprint is invalid: its scanner is
/// exhausted, its row range is empty and [`Footprint::invalid_reason`] says
/// why. The image then simply contributes nothing.
#[derive(Debug, Clone)]
pub struct Footprint {
    scanner: Scanner,
    row_min: isize,
    row_max: isize,
    invalid: Option<FootprintError>,
}

impl Footprint {
    fn invalid(ctx: &DrizzleContext<'_>, reason: FootprintError) -> Self {
        Self {
            scanner: Scanner::exhausted(ctx.bounds()),
            row_min: 0,
            row_max: -1,
            invalid: Some(reason),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.invalid.is_none()
    }

    pub fn invalid_reason(&self) -> Option<&FootprintError> {
        self.invalid.as_ref()
    }

    #[inline]
    pub fn row_min(&self) -> isize {
        self.row_min
    }

    #[inline]
    pub fn row_max(&self) -> isize {
        self.row_max
    }

    /// Input rows to scan, bottom to top. Empty for invalid footprints.
    pub fn rows(&self) -> RangeInclusive<isize> {
        self.row_min..=self.row_max
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Scanner for manual row queries. Queries must follow [`Self::rows`] upward.
    pub fn scanner_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }

    /// Iterate the non-empty row spans.
    pub fn into_spans(self) -> Spans {
        Spans {
            rows: self.rows(),
            scanner: self.scanner,
        }
    }
}

/// Row spans of a [`Footprint`].
///
/// Rows outside the polygon or with zero width are skipped; the iterator
/// ends with the row range or when the scan reaches the top of the polygon.
#[derive(Debug, Clone)]
pub struct Spans {
    scanner: Scanner,
    rows: RangeInclusive<isize>,
}

impl Iterator for Spans {
    type Item = RowSpan;

    fn next(&mut self) -> Option<RowSpan> {
        loop {
            let y = self.rows.next()?;
            match self.scanner.scanline_limits(y) {
                Ok((x_min, x_max)) => return Some(RowSpan { y, x_min, x_max }),
                Err(ScanError::EndOfScan) => {
                    self.rows = 1..=0;
                    return None;
                }
                Err(ScanError::OutOfBounds | ScanError::ZeroWidth) => continue,
            }
        }
    }
}

/// Compute the footprint of the context's input image on its output image.
///
/// Never fails: any mapping, clipping or inversion problem yields an invalid
/// footprint, and its message is also recorded in the context's error sink.
pub fn build_footprint(ctx: &DrizzleContext<'_>) -> Footprint {
    match scan_overlap(ctx) {
        Ok(footprint) => {
            tracing::trace!(
                row_min = footprint.row_min,
                row_max = footprint.row_max,
                "Footprint built"
            );
            footprint
        }
        Err(reason) => {
            tracing::debug!(%reason, "Input image has no usable overlap");
            ctx.report_error(reason.to_string());
            Footprint::invalid(ctx, reason)
        }
    }
}

/// Build footprints for independent contexts in parallel.
pub fn build_footprints(contexts: &[DrizzleContext<'_>]) -> Vec<Footprint> {
    contexts.par_iter().map(build_footprint).collect()
}

fn scan_overlap(ctx: &DrizzleContext<'_>) -> Result<Footprint, FootprintError> {
    let polygon = overlap_polygon(ctx)?;
    let bounds = ctx.bounds();
    let tolerance = ctx.config().max_inversion_error;
    let scanner = Scanner::new(&polygon, bounds, tolerance)?;

    let row_min = ((scanner.min_y() + 0.5 + 2.0 * tolerance).floor() as isize).max(0);
    let row_max = ((scanner.max_y() + 2.0 * tolerance).floor() as isize).min(bounds.y_max as isize);

    Ok(Footprint {
        scanner,
        row_min,
        row_max,
        invalid: None,
    })
}

/// Overlap of the input and output images, as a counter-clockwise polygon in
/// input pixel coordinates.
fn overlap_polygon(ctx: &DrizzleContext<'_>) -> Result<Polygon, FootprintError> {
    let bounds = ctx.bounds();
    let input = Polygon::rectangle(
        DVec2::new(bounds.x_min as f64 - 0.5, bounds.y_min as f64 - 0.5),
        DVec2::new(bounds.x_max as f64 + 0.5, bounds.y_max as f64 + 0.5),
    );

    let projected = input
        .vertices()
        .iter()
        .map(|&corner| map_point(ctx, corner))
        .collect::<Result<ArrayVec<Vertex, IMAGE_OUTLINE_NPTS>, _>>()
        .map_err(FootprintError::ForwardMapping)?;
    let projected = Polygon::from_vertices(&projected)?;

    let output = Polygon::rectangle(
        DVec2::new(-0.5, -0.5),
        DVec2::new(
            ctx.output_width() as f64 - 0.5,
            ctx.output_height() as f64 - 0.5,
        ),
    );

    let clipped = projected.intersect(&output)?;
    if clipped.is_degenerate() {
        return Err(FootprintError::NoOverlap);
    }

    let mut inverted = ArrayVec::<Vertex, POLYGON_CAPACITY>::new();
    for &vertex in clipped.vertices() {
        let inversion = invert(ctx, vertex).map_err(|source| FootprintError::Inversion {
            x: vertex.x,
            y: vertex.y,
            source,
        })?;
        if !inversion.converged {
            return Err(FootprintError::InversionDiverged {
                x: vertex.x,
                y: vertex.y,
            });
        }
        inverted.push(inversion.position);
    }

    let mut polygon = Polygon::from_vertices(&inverted)?;
    polygon.orient_ccw();
    Ok(polygon)
}
