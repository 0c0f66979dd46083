//! thumbkit turns a list of video URLs into branded, fixed-size thumbnails.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: URL -> video id -> first retrievable thumbnail resolution
//! 2. **Standardize**: trim height to 16:9, Lanczos-resize to the canvas (1280×720)
//! 3. **Trim**: cut uniform black borders, keeping a 5 px margin
//! 4. **Compose**: shrink by the resize ratio, center on a transparent canvas, then
//!    alpha-composite either an overlay image or a flat translucent color on top
//! 5. **Persist**: one PNG per URL and variant, named after the sanitized page title
//!
//! The image stages (2–4) are pure: every transform takes its input by reference and returns
//! a new image. Network access goes through a [`ThumbnailSource`] and filesystem access is
//! confined to [`BatchRunner`] and its helpers.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod foundation;
mod render;
mod source;
mod transform;

pub use batch::config::{PipelineConfig, Variant};
pub use batch::runner::{
    BatchReport, BatchRunner, MAX_FILE_NAME_BYTES, SkippedItem, clear_output_dir, load_urls,
    output_file_name, save_png,
};
pub use foundation::core::{AspectRatio, BoundingBox, CanvasSpec, Rgb8, Rgba8};
pub use foundation::error::{ThumbError, ThumbResult};
pub use render::composite::{StraightRgba8, alpha_composite, over};
pub use render::engine::{CompositionEngine, MAX_OVERSIZE_FACTOR, OverlayRequest, centered_offset};
pub use render::standardize::standardize_thumbnail;
pub use source::fetch::{
    DEFAULT_RESOLUTIONS, DEFAULT_THUMBNAIL_BASE, DEFAULT_WATCH_URL_PREFIX, FetchError,
    HttpSource, MemorySource, ThumbnailSource, decode_image, fetch_thumbnail,
    thumbnail_candidates,
};
pub use source::title::{FORBIDDEN_FILENAME_CHARS, fetch_title, parse_title, sanitize_title};
pub use source::video_id::extract_video_id;
pub use transform::aspect::{crop_height_to_16_9, crop_height_to_aspect};
pub use transform::border::{BORDER_MARGIN, DEFAULT_BLACK_TOLERANCE, content_bbox, crop_black_bars};
pub use transform::color::{SAMPLE_GRID, get_dominant_color};
pub use transform::resample::{HIGH_QUALITY, resize_rgb, resize_rgba};
