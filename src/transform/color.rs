use image::{DynamicImage, imageops};

use crate::foundation::core::Rgb8;

/// Edge length of the grid an image is reduced to before averaging.
pub const SAMPLE_GRID: u32 = 50;

/// Representative fill color of `img`.
///
/// Despite the name this is not a mode or a cluster center: the image is downsampled to a
/// [`SAMPLE_GRID`]×[`SAMPLE_GRID`] grid and the per-channel arithmetic mean over every grid
/// cell is returned, truncated toward zero. Alpha is ignored.
pub fn get_dominant_color(img: &DynamicImage) -> Rgb8 {
    if img.width() == 0 || img.height() == 0 {
        return Rgb8::new(0, 0, 0);
    }

    let small = imageops::resize(
        &img.to_rgb8(),
        SAMPLE_GRID,
        SAMPLE_GRID,
        imageops::FilterType::CatmullRom,
    );

    let mut sums = [0u64; 3];
    for px in small.pixels() {
        for (sum, c) in sums.iter_mut().zip(px.0) {
            *sum += u64::from(c);
        }
    }

    let n = u64::from(SAMPLE_GRID * SAMPLE_GRID);
    Rgb8::new(
        (sums[0] / n) as u8,
        (sums[1] / n) as u8,
        (sums[2] / n) as u8,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/transform/color.rs"]
mod tests;
