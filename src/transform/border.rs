use image::{DynamicImage, RgbImage, imageops};

use crate::foundation::core::BoundingBox;

/// Pixels kept around detected content so the crop is never flush against it.
pub const BORDER_MARGIN: u32 = 5;

/// Default tolerance advertised by [`crop_black_bars`] callers.
pub const DEFAULT_BLACK_TOLERANCE: u8 = 10;

/// Minimal box enclosing every pixel that differs from pure black in any channel.
///
/// Returns `None` when the image is entirely black (or empty).
pub fn content_bbox(img: &RgbImage) -> Option<BoundingBox> {
    let (w, h) = img.dimensions();
    let mut left = w;
    let mut top = h;
    let mut right = 0u32;
    let mut bottom = 0u32;

    for (x, y, px) in img.enumerate_pixels() {
        if px.0 == [0, 0, 0] {
            continue;
        }
        left = left.min(x);
        top = top.min(y);
        right = right.max(x + 1);
        bottom = bottom.max(y + 1);
    }

    BoundingBox::new(left, top, right, bottom)
}

/// Trim uniform black borders, keeping a [`BORDER_MARGIN`] pixel margin around content.
///
/// The input is converted to opaque RGB first. A fully black image is returned unchanged.
///
/// `tolerance` is accepted for call-site compatibility but does not participate in the
/// decision: any pixel that is not exactly `(0, 0, 0)` counts as content.
pub fn crop_black_bars(img: &DynamicImage, tolerance: u8) -> RgbImage {
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();

    let Some(bbox) = content_bbox(&rgb) else {
        tracing::debug!(tolerance, "no content found, leaving image untouched");
        return rgb;
    };

    let crop = bbox.expand_clamped(BORDER_MARGIN, w, h);
    tracing::debug!(
        tolerance,
        left = crop.left,
        top = crop.top,
        right = crop.right,
        bottom = crop.bottom,
        "cropping black bars"
    );
    imageops::crop_imm(&rgb, crop.left, crop.top, crop.width(), crop.height()).to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/border.rs"]
mod tests;
