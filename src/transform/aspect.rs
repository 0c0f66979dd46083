use image::DynamicImage;

use crate::foundation::core::AspectRatio;

/// Center-crop the height of `img` so it is no taller than `aspect` allows.
///
/// Width is always preserved. Images that are already as wide as `aspect` (or wider) are
/// returned unchanged; this never pads or upscales.
pub fn crop_height_to_aspect(img: &DynamicImage, aspect: AspectRatio) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let target_height = aspect.target_height(width);

    if height <= target_height {
        tracing::debug!(width, height, "image already at target aspect or wider");
        return img.clone();
    }

    let top = (height - target_height) / 2;
    tracing::debug!(width, target_height, top, "cropping height to target aspect");
    img.crop_imm(0, top, width, target_height)
}

/// [`crop_height_to_aspect`] with the 16:9 widescreen ratio.
pub fn crop_height_to_16_9(img: &DynamicImage) -> DynamicImage {
    crop_height_to_aspect(img, AspectRatio::WIDESCREEN)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/aspect.rs"]
mod tests;
