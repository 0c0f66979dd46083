use super::*;

use image::{Rgb, Rgba, RgbaImage};

#[test]
fn output_is_always_canvas_sized() {
    let canvas = CanvasSpec::default();
    for (w, h) in [(1920, 1080), (426, 240), (480, 360), (300, 300), (200, 900), (1280, 200)] {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([20, 40, 60])));
        let out = standardize_thumbnail(&img, &canvas);
        assert_eq!(out.dimensions(), (1280, 720), "{w}x{h}");
    }
}

#[test]
fn alpha_sources_become_opaque_rgb() {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 36, Rgba([9, 8, 7, 255])));
    let out = standardize_thumbnail(&img, &CanvasSpec::default());
    assert_eq!(out.get_pixel(640, 360).0, [9, 8, 7]);
}

#[test]
fn tall_source_keeps_its_vertical_center() {
    // Top and bottom quarters are blue; the 16:9 trim of a square keeps only the red middle.
    let mut img = RgbImage::from_pixel(160, 160, Rgb([255, 0, 0]));
    for y in (0..20).chain(140..160) {
        for x in 0..160 {
            img.put_pixel(x, y, Rgb([0, 0, 255]));
        }
    }
    let out = standardize_thumbnail(&DynamicImage::ImageRgb8(img), &CanvasSpec::default());
    assert_eq!(out.get_pixel(640, 4).0, [255, 0, 0]);
    assert_eq!(out.get_pixel(640, 715).0, [255, 0, 0]);
}

#[test]
fn smaller_canvas_is_supported() {
    let canvas = CanvasSpec {
        width: 64,
        height: 36,
        ..CanvasSpec::default()
    };
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([1, 2, 3])));
    assert_eq!(standardize_thumbnail(&img, &canvas).dimensions(), (64, 36));
}
