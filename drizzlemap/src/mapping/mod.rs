//! Forward and inverse coordinate mapping through a [`PixelMap`].
//!
//! The pixel map only samples the transform at pixel centers. Between centers
//! the forward map is bilinear, and outside the map it is extrapolated from the
//! nearest border cell. The inverse has no closed form and is found by search
//! (see [`invert`]).

use glam::DVec2;

use crate::context::DrizzleContext;
use crate::error::MapError;

mod inverse;


pub use inverse::{Inversion, invert};

/// Bilinearly interpolate the pixel map at a (generally non-integer) input position.
///
/// The base cell is clamped to `[0, width - 2] x [0, height - 2]`, so points
/// outside the map are extrapolated from the border cells. Undefined cells
/// propagate: the result is [`MapError::Undefined`] whenever any of the four
/// contributing cells has a NaN component.
pub fn interpolate(ctx: &DrizzleContext<'_>, point: DVec2) -> Result<DVec2, MapError> {
    let pixmap = ctx.pixmap();
    let width = pixmap.width();
    let height = pixmap.height();
    if width < 2 || height < 2 {
        return Err(MapError::TooSmall { width, height });
    }

    // Truncation toward zero, then clamping, mirrors integer cell selection.
    let i0 = (point.x as i64).clamp(0, width as i64 - 2) as usize;
    let j0 = (point.y as i64).clamp(0, height as i64 - 2) as usize;

    let x = point.x - i0 as f64;
    let y = point.y - j0 as f64;
    let x1 = 1.0 - x;
    let y1 = 1.0 - y;

    let f00 = pixmap.get(i0, j0);
    let f10 = pixmap.get(i0 + 1, j0);
    let f01 = pixmap.get(i0, j0 + 1);
    let f11 = pixmap.get(i0 + 1, j0 + 1);

    let out = f00 * x1 * y1 + f10 * x * y1 + f01 * x1 * y + f11 * x * y;
    if out.is_nan() {
        return Err(MapError::Undefined {
            x: point.x,
            y: point.y,
        });
    }

    Ok(out)
}

/// Exact pixel map lookup at integer input indices.
///
/// Fails with [`MapError::OutOfRange`] outside the map extent and with
/// [`MapError::Undefined`] for cells with a NaN component.
pub fn map_exact(ctx: &DrizzleContext<'_>, i: isize, j: isize) -> Result<DVec2, MapError> {
    let pixmap = ctx.pixmap();
    let value = pixmap.lookup(i, j).ok_or(MapError::OutOfRange {
        i,
        j,
        width: pixmap.width(),
        height: pixmap.height(),
    })?;

    if value.is_nan() {
        return Err(MapError::Undefined {
            x: i as f64,
            y: j as f64,
        });
    }

    Ok(value)
}

/// Map an input position to the output frame.
///
/// Integral positions are looked up directly and must lie inside the context's
/// valid bounds, failing with [`MapError::OutsideBounds`] otherwise. Every
/// other position is interpolated.
pub fn map_point(ctx: &DrizzleContext<'_>, point: DVec2) -> Result<DVec2, MapError> {
    let i = point.x as isize;
    let j = point.y as isize;

    if i as f64 != point.x || j as f64 != point.y {
        return interpolate(ctx, point);
    }

    let bounds = ctx.bounds();
    if !bounds.contains_signed(i, j) {
        return Err(MapError::OutsideBounds { i, j, bounds });
    }

    map_exact(ctx, i, j)
}
