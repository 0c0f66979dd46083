use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{DynamicImage, RgbaImage, imageops};

use crate::{
    foundation::{
        core::{CanvasSpec, Rgba8},
        error::{ThumbError, ThumbResult},
    },
    render::{composite::alpha_composite, standardize::standardize_thumbnail},
    transform::{
        border::{DEFAULT_BLACK_TOLERANCE, crop_black_bars},
        resample::{resize_rgb, resize_rgba},
    },
};

/// Largest accepted `resize_ratio`, and the cap on the shrunken size relative to the canvas.
pub const MAX_OVERSIZE_FACTOR: u32 = 4;

/// What gets composited on top of the recentered thumbnail. Exactly one layer is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayRequest {
    /// Image file stretched to the canvas. Falls back to `fallback` if it cannot be loaded.
    Image {
        /// Overlay file on disk; any format the `image` crate decodes.
        path: PathBuf,
        /// Flat color used when the file is missing or undecodable.
        fallback: Rgba8,
    },
    /// Uniform translucent rectangle covering the whole canvas.
    Color(Rgba8),
}

impl OverlayRequest {
    /// Image overlay if `path` is set, flat `color` otherwise.
    pub fn from_parts(path: Option<&Path>, color: Rgba8) -> Self {
        match path {
            Some(p) => Self::Image {
                path: p.to_path_buf(),
                fallback: color,
            },
            None => Self::Color(color),
        }
    }
}

/// Produces the final branded composite from a decoded source thumbnail.
#[derive(Clone, Copy, Debug)]
pub struct CompositionEngine {
    canvas: CanvasSpec,
    black_tolerance: u8,
}

impl Default for CompositionEngine {
    fn default() -> Self {
        Self::new(CanvasSpec::default())
    }
}

impl CompositionEngine {
    /// Engine drawing onto `canvas`.
    pub fn new(canvas: CanvasSpec) -> Self {
        Self {
            canvas,
            black_tolerance: DEFAULT_BLACK_TOLERANCE,
        }
    }

    /// Canvas every output is produced on.
    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    /// Standardize, trim black bars, shrink by `resize_ratio`, center on a transparent canvas
    /// and apply the overlay.
    ///
    /// `resize_ratio` is meant to be in `(0, 1]`. Larger values are accepted up to
    /// [`MAX_OVERSIZE_FACTOR`] times the canvas; the oversized paste is clipped by the canvas
    /// edges. Ratios that shrink the content to nothing, or grow it past that cap, are rejected.
    #[tracing::instrument(skip(self, source, overlay), fields(w = source.width(), h = source.height()))]
    pub fn process_thumbnail(
        &self,
        source: &DynamicImage,
        resize_ratio: f64,
        overlay: &OverlayRequest,
    ) -> ThumbResult<RgbaImage> {
        self.canvas.validate()?;
        if !resize_ratio.is_finite() || resize_ratio <= 0.0 {
            return Err(ThumbError::validation(format!(
                "resize ratio must be a positive number, got {resize_ratio}"
            )));
        }
        if resize_ratio > 1.0 {
            tracing::warn!(
                marker = "oversized-ratio",
                resize_ratio,
                "content will be clipped by the canvas"
            );
        }

        let standardized = standardize_thumbnail(source, &self.canvas);
        let cropped = crop_black_bars(&DynamicImage::ImageRgb8(standardized), self.black_tolerance);

        let scaled_w = (f64::from(cropped.width()) * resize_ratio).floor();
        let scaled_h = (f64::from(cropped.height()) * resize_ratio).floor();
        if scaled_w < 1.0 || scaled_h < 1.0 {
            return Err(ThumbError::validation(format!(
                "resize ratio {resize_ratio} shrinks {}x{} to nothing",
                cropped.width(),
                cropped.height()
            )));
        }
        let max_w = u64::from(self.canvas.width) * u64::from(MAX_OVERSIZE_FACTOR);
        let max_h = u64::from(self.canvas.height) * u64::from(MAX_OVERSIZE_FACTOR);
        if scaled_w > max_w as f64 || scaled_h > max_h as f64 {
            return Err(ThumbError::validation(format!(
                "resize ratio {resize_ratio} grows {}x{} past {max_w}x{max_h}",
                cropped.width(),
                cropped.height()
            )));
        }
        // Bounded by the canvas cap above, so both fit in u32.
        let (target_w, target_h) = (scaled_w as u32, scaled_h as u32);
        let shrunken = DynamicImage::ImageRgb8(resize_rgb(&cropped, target_w, target_h)).to_rgba8();

        let (cw, ch) = (self.canvas.width, self.canvas.height);
        let mut canvas = RgbaImage::new(cw, ch);
        let (x, y) = centered_offset((cw, ch), (target_w, target_h));
        tracing::debug!(target_w, target_h, x, y, "pasting shrunken thumbnail");
        imageops::replace(&mut canvas, &shrunken, x, y);

        let layer = self.resolve_overlay(overlay);
        alpha_composite(&canvas, &layer)
    }

    fn resolve_overlay(&self, overlay: &OverlayRequest) -> RgbaImage {
        match overlay {
            OverlayRequest::Image { path, fallback } => match self.load_overlay(path) {
                Ok(img) => img,
                Err(err) => {
                    tracing::warn!(
                        marker = "overlay-fallback",
                        path = %path.display(),
                        error = %err,
                        "failed to load overlay image, using flat color"
                    );
                    self.flat_overlay(*fallback)
                }
            },
            OverlayRequest::Color(color) => self.flat_overlay(*color),
        }
    }

    fn load_overlay(&self, path: &Path) -> ThumbResult<RgbaImage> {
        let img = image::open(path)
            .with_context(|| format!("open overlay '{}'", path.display()))?
            .to_rgba8();
        Ok(resize_rgba(&img, self.canvas.width, self.canvas.height))
    }

    fn flat_overlay(&self, color: Rgba8) -> RgbaImage {
        RgbaImage::from_pixel(self.canvas.width, self.canvas.height, color.to_pixel())
    }
}

/// Top-left position that centers `inner` in `outer`, flooring like integer division.
/// Negative when `inner` is larger than `outer`.
pub fn centered_offset(outer: (u32, u32), inner: (u32, u32)) -> (i64, i64) {
    let dx = i64::from(outer.0) - i64::from(inner.0);
    let dy = i64::from(outer.1) - i64::from(inner.1);
    (dx.div_euclid(2), dy.div_euclid(2))
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
