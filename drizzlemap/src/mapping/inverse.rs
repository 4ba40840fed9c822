//! Inverse pixel mapping by golden-section search.

use glam::DVec2;

use crate::constants::GOLDEN_RATIO_CONJUGATE;
use crate::context::DrizzleContext;
use crate::error::MapError;

use super::interpolate;

/// Result of an inverse mapping search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inversion {
    /// Center of the final search bracket, in input pixel coordinates.
    pub position: DVec2,
    /// Whether the bracket shrank below the configured tolerance.
    /// Callers must check this before trusting `position`.
    pub converged: bool,
    /// Number of search iterations performed.
    pub iterations: usize,
}

/// Squared output-frame distance between the forward-mapped `(x, y)` and `target`.
#[inline]
fn distance_squared(
    ctx: &DrizzleContext<'_>,
    x: f64,
    y: f64,
    target: DVec2,
) -> Result<f64, MapError> {
    let mapped = interpolate(ctx, DVec2::new(x, y))?;
    Ok(mapped.distance_squared(target))
}

/// Find the input position whose forward mapping is closest to `target`.
///
/// The search starts from the context's valid bounds expanded by half a pixel.
/// Each iteration evaluates the forward map at the four golden-ratio interior
/// points, keeps the quadrant whose point is closest and stops once the
/// bracket is no wider than `max_inversion_error` on both axes, or after
/// `max_inversion_iterations`.
///
/// A non-finite `target`, or any undefined forward evaluation, aborts the
/// search with [`MapError::Undefined`].
pub fn invert(ctx: &DrizzleContext<'_>, target: DVec2) -> Result<Inversion, MapError> {
    if !target.is_finite() {
        return Err(MapError::Undefined {
            x: target.x,
            y: target.y,
        });
    }

    let config = ctx.config();
    let tolerance = config.max_inversion_error;
    let bounds = ctx.bounds();

    let mut lo = DVec2::new(bounds.x_min as f64 - 0.5, bounds.y_min as f64 - 0.5);
    let mut hi = DVec2::new(bounds.x_max as f64 + 0.5, bounds.y_max as f64 + 0.5);
    let mut size = hi - lo;

    let mut iterations = 0;
    while (size.x > tolerance || size.y > tolerance)
        && iterations < config.max_inversion_iterations
    {
        iterations += 1;

        let lower = hi - GOLDEN_RATIO_CONJUGATE * size;
        let upper = lo + GOLDEN_RATIO_CONJUGATE * size;

        let distances = [
            distance_squared(ctx, lower.x, lower.y, target)?,
            distance_squared(ctx, lower.x, upper.y, target)?,
            distance_squared(ctx, upper.x, lower.y, target)?,
            distance_squared(ctx, upper.x, upper.y, target)?,
        ];

        // Ties keep the earlier quadrant. A target centered on one axis ties
        // that axis, and either half still contains it.
        let best = (1..distances.len()).fold(0, |best, k| {
            if distances[k] < distances[best] { k } else { best }
        });

        match best {
            0 => hi = upper,
            1 => {
                hi.x = upper.x;
                lo.y = lower.y;
            }
            2 => {
                lo.x = lower.x;
                hi.y = upper.y;
            }
            _ => lo = lower,
        }

        size = hi - lo;
    }

    let converged = size.x <= tolerance && size.y <= tolerance;
    if !converged {
        tracing::warn!(
            x = target.x,
            y = target.y,
            iterations,
            "Pixel map inversion did not converge"
        );
    } else {
        tracing::trace!(x = target.x, y = target.y, iterations, "Pixel map inverted");
    }

    Ok(Inversion {
        position: 0.5 * (lo + hi),
        converged,
        iterations,
    })
}
