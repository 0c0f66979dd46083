use image::{DynamicImage, RgbImage, imageops};

use crate::{
    foundation::core::CanvasSpec,
    transform::{aspect::crop_height_to_aspect, color::get_dominant_color, resample::resize_rgb},
};

/// Normalize `img` to an opaque `canvas.width`×`canvas.height` image.
///
/// Steps, in order:
/// 1. sample the representative color from the *original* image,
/// 2. center-crop the height down to `canvas.aspect` (never pads),
/// 3. Lanczos-resize to exactly the canvas size,
/// 4. paste at the top-left of a canvas filled with the sampled color.
///
/// Step 3 always yields the full canvas size, so the fill is completely covered under the
/// current resize policy. It only shows through if the resize ever produces less than the
/// canvas.
pub fn standardize_thumbnail(img: &DynamicImage, canvas: &CanvasSpec) -> RgbImage {
    let fill = get_dominant_color(img);
    tracing::debug!(r = fill.r, g = fill.g, b = fill.b, "sampled background color");

    let trimmed = crop_height_to_aspect(img, canvas.aspect);
    let resized = resize_rgb(&trimmed.to_rgb8(), canvas.width, canvas.height);

    let mut background = RgbImage::from_pixel(canvas.width, canvas.height, fill.to_pixel());
    imageops::replace(&mut background, &resized, 0, 0);
    background
}

#[cfg(test)]
#[path = "../../tests/unit/render/standardize.rs"]
mod tests;
