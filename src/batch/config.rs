use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{CanvasSpec, Rgba8},
        error::{ThumbError, ThumbResult},
    },
    render::engine::{MAX_OVERSIZE_FACTOR, OverlayRequest},
    source::fetch::{DEFAULT_RESOLUTIONS, DEFAULT_THUMBNAIL_BASE, DEFAULT_WATCH_URL_PREFIX},
};

/// One rendered output per URL: an optional overlay file plus the label appended to the name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Variant {
    /// Overlay stretched over the canvas; the flat overlay color is used when absent.
    pub overlay_image: Option<PathBuf>,
    /// Appended to the file name after a space, e.g. `"White"`.
    pub label: String,
}

impl Variant {
    /// Overlay request for this variant with `color` as flat layer or fallback.
    pub fn overlay_request(&self, color: Rgba8) -> OverlayRequest {
        OverlayRequest::from_parts(self.overlay_image.as_deref(), color)
    }
}

/// Plain parameters for one batch run. Every field has a default, so `{}` is a valid file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Shrink factor applied after border trimming, expected in `(0, 1]`.
    pub resize_ratio: f64,
    /// Flat overlay, and fallback when an overlay image fails to load.
    pub overlay_color: Rgba8,
    /// Output surface.
    pub canvas: CanvasSpec,
    /// Thumbnail resolutions tried in order.
    pub resolutions: Vec<String>,
    /// Base URL thumbnails are fetched from.
    pub thumbnail_base_url: String,
    /// Prefix the video id is appended to when fetching the page title.
    pub watch_url_prefix: String,
    /// Renders produced per URL.
    pub variants: Vec<Variant>,
    /// Number of URLs processed concurrently; 1 is strictly sequential.
    pub jobs: usize,
    /// Per-request network timeout.
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resize_ratio: 0.955,
            overlay_color: Rgba8::default_overlay(),
            canvas: CanvasSpec::default(),
            resolutions: DEFAULT_RESOLUTIONS.iter().map(|s| s.to_string()).collect(),
            thumbnail_base_url: DEFAULT_THUMBNAIL_BASE.to_string(),
            watch_url_prefix: DEFAULT_WATCH_URL_PREFIX.to_string(),
            variants: vec![Variant::default()],
            jobs: 1,
            timeout_secs: 20,
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> ThumbResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject values the pipeline cannot run with. Ratios above 1 pass (with a warning) up to
    /// [`MAX_OVERSIZE_FACTOR`].
    pub fn validate(&self) -> ThumbResult<()> {
        if !self.resize_ratio.is_finite() || self.resize_ratio <= 0.0 {
            return Err(ThumbError::validation(format!(
                "resize_ratio must be a positive number, got {}",
                self.resize_ratio
            )));
        }
        if self.resize_ratio > f64::from(MAX_OVERSIZE_FACTOR) {
            return Err(ThumbError::validation(format!(
                "resize_ratio must be at most {MAX_OVERSIZE_FACTOR}, got {}",
                self.resize_ratio
            )));
        }
        if self.resize_ratio > 1.0 {
            tracing::warn!(
                marker = "oversized-ratio",
                resize_ratio = self.resize_ratio,
                "resize_ratio above 1 clips content at the canvas edges"
            );
        }
        self.canvas.validate()?;
        if self.jobs == 0 {
            return Err(ThumbError::validation("jobs must be >= 1"));
        }
        if self.variants.is_empty() {
            return Err(ThumbError::validation("at least one variant is required"));
        }
        if self.resolutions.is_empty() {
            return Err(ThumbError::validation(
                "at least one thumbnail resolution is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/config.rs"]
mod tests;
