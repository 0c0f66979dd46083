use image::{RgbImage, RgbaImage, imageops};

/// Filter used wherever the pipeline needs "high quality" resampling.
pub const HIGH_QUALITY: imageops::FilterType = imageops::FilterType::Lanczos3;

/// Lanczos resize of an opaque image to exactly `width`×`height`.
pub fn resize_rgb(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, HIGH_QUALITY)
}

/// Lanczos resize of a straight-alpha image.
///
/// Color channels are filtered premultiplied so fully transparent texels do not bleed
/// their (meaningless) RGB into visible edges.
pub fn resize_rgba(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    let (w, h) = img.dimensions();
    let mut premul = img.as_raw().clone();
    premultiply_rgba8_in_place(&mut premul);
    let premul = RgbaImage::from_raw(w, h, premul).unwrap_or_else(|| img.clone());

    let resized = imageops::resize(&premul, width, height, HIGH_QUALITY);
    let (rw, rh) = resized.dimensions();
    let mut raw = resized.into_raw();
    unpremultiply_rgba8_in_place(&mut raw);
    RgbaImage::from_raw(rw, rh, raw).unwrap_or_else(|| RgbaImage::new(rw, rh))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resample.rs"]
mod tests;
