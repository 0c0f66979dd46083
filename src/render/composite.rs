use image::{Rgba, RgbaImage};

use crate::foundation::error::{ThumbError, ThumbResult};

/// Straight-alpha RGBA8 pixel.
pub type StraightRgba8 = [u8; 4];

/// Porter-Duff "source over destination" on straight (non-premultiplied) alpha.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let dst_w = u32::from(mul_div255(u16::from(dst[3]), (255 - sa) as u16));
    let out_a = sa + dst_w;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    out[3] = out_a.min(255) as u8;
    for i in 0..3 {
        let c = u32::from(src[i]) * sa + u32::from(dst[i]) * dst_w;
        out[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    out
}

/// Composite `top` over `bottom`, producing a new image. Both must share dimensions.
pub fn alpha_composite(bottom: &RgbaImage, top: &RgbaImage) -> ThumbResult<RgbaImage> {
    if bottom.dimensions() != top.dimensions() {
        return Err(ThumbError::validation(format!(
            "alpha_composite expects equal sizes, got {:?} and {:?}",
            bottom.dimensions(),
            top.dimensions()
        )));
    }

    let mut out = bottom.clone();
    for (d, s) in out.pixels_mut().zip(top.pixels()) {
        *d = Rgba(over(d.0, s.0));
    }
    Ok(out)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
