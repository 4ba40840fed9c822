//! Per-image mapping context.

use std::sync::OnceLock;

use crate::bbox::Aabb;
use crate::config::MapConfig;
use crate::error::ContextError;
use crate::pixmap::PixelMap;

/// Everything the footprint computation reads for one input image.
///
/// Bundles the borrowed pixel map, the valid input index box, the output image
/// size and a write-once error sink. The context is `Sync`, so independent
/// contexts (or one shared context) can be read from several worker threads.
#[derive(Debug)]
pub struct DrizzleContext<'a> {
    pixmap: &'a PixelMap,
    bounds: Aabb,
    output_width: usize,
    output_height: usize,
    config: MapConfig,
    error: OnceLock<String>,
}

impl<'a> DrizzleContext<'a> {
    /// Context covering the whole pixel map.
    pub fn new(
        pixmap: &'a PixelMap,
        output_width: usize,
        output_height: usize,
    ) -> Result<Self, ContextError> {
        if pixmap.is_empty() {
            return Err(ContextError::EmptyPixelMap);
        }
        if output_width == 0 || output_height == 0 {
            return Err(ContextError::EmptyOutput {
                width: output_width,
                height: output_height,
            });
        }

        Ok(Self {
            pixmap,
            bounds: Aabb::from_size(pixmap.width(), pixmap.height()),
            output_width,
            output_height,
            config: MapConfig::default(),
            error: OnceLock::new(),
        })
    }

    /// Restrict the valid input pixels to `bounds`.
    pub fn with_bounds(mut self, bounds: Aabb) -> Result<Self, ContextError> {
        if bounds.is_inverted() {
            return Err(ContextError::InvertedBounds { bounds });
        }
        if bounds.x_max >= self.pixmap.width() || bounds.y_max >= self.pixmap.height() {
            return Err(ContextError::BoundsOutsidePixelMap {
                bounds,
                width: self.pixmap.width(),
                height: self.pixmap.height(),
            });
        }
        self.bounds = bounds;
        Ok(self)
    }

    pub fn with_config(mut self, config: MapConfig) -> Self {
        config.validate();
        self.config = config;
        self
    }

    #[inline]
    pub fn pixmap(&self) -> &'a PixelMap {
        self.pixmap
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    #[inline]
    pub fn output_width(&self) -> usize {
        self.output_width
    }

    #[inline]
    pub fn output_height(&self) -> usize {
        self.output_height
    }

    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// First failure message recorded for this context, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.get().map(String::as_str)
    }

    /// Record a failure message. Only the first message is kept.
    pub(crate) fn report_error(&self, message: impl Into<String>) {
        let _ = self.error.set(message.into());
    }
}
