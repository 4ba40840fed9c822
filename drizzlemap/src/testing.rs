//! Testing utilities for drizzlemap.

#![allow(dead_code)]

use glam::DVec2;

use crate::PixelMap;

/// Initialize tracing subscriber for tests.
/// Safe to call multiple times - will only initialize once.
/// Respects RUST_LOG env var, defaults to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Pixel map applying a per-axis scale followed by a translation.
///
/// Affine maps are reproduced exactly by bilinear interpolation, which makes
/// expected inverse positions easy to state.
pub fn affine_pixmap(width: usize, height: usize, scale: DVec2, offset: DVec2) -> PixelMap {
    PixelMap::from_fn(width, height, |x, y| {
        DVec2::new(x as f64, y as f64) * scale + offset
    })
}

/// Pixel map translating every pixel by `offset`.
pub fn shifted_pixmap(width: usize, height: usize, offset: DVec2) -> PixelMap {
    affine_pixmap(width, height, DVec2::ONE, offset)
}

/// Assert that two points agree within `tolerance` on both axes.
#[track_caller]
pub fn assert_close(actual: DVec2, expected: DVec2, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff.x <= tolerance && diff.y <= tolerance,
        "expected {:?}, got {:?} (tolerance {})",
        expected,
        actual,
        tolerance
    );
}
