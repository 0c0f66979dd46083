use super::*;

use image::{Rgb, RgbaImage};

fn black(w: u32, h: u32) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb([0, 0, 0]))
}

#[test]
fn fully_black_image_is_returned_bit_identical() {
    let img = black(37, 21);
    let out = crop_black_bars(&DynamicImage::ImageRgb8(img.clone()), DEFAULT_BLACK_TOLERANCE);
    assert_eq!(out, img);
}

#[test]
fn single_pixel_box_is_margin_expanded() {
    let mut img = black(100, 80);
    img.put_pixel(40, 30, Rgb([1, 0, 0]));
    let out = crop_black_bars(&DynamicImage::ImageRgb8(img), 0);
    assert_eq!(out.dimensions(), (11, 11));
    assert_eq!(out.get_pixel(5, 5).0, [1, 0, 0]);
}

#[test]
fn single_pixel_near_corner_is_clamped() {
    let mut img = black(50, 40);
    img.put_pixel(2, 38, Rgb([0, 0, 9]));
    let out = crop_black_bars(&DynamicImage::ImageRgb8(img), 0);
    // x: [0, 8), y: [33, 40)
    assert_eq!(out.dimensions(), (8, 7));
    assert_eq!(out.get_pixel(2, 5).0, [0, 0, 9]);
}

#[test]
fn letterbox_is_trimmed_to_content_plus_margin() {
    let mut img = black(64, 64);
    for y in 20..44 {
        for x in 0..64 {
            img.put_pixel(x, y, Rgb([200, 10, 10]));
        }
    }
    let out = crop_black_bars(&DynamicImage::ImageRgb8(img), DEFAULT_BLACK_TOLERANCE);
    assert_eq!(out.dimensions(), (64, 34));
}

#[test]
fn tolerance_does_not_affect_near_black_pixels() {
    let mut img = black(30, 30);
    img.put_pixel(15, 15, Rgb([3, 3, 3]));
    let strict = crop_black_bars(&DynamicImage::ImageRgb8(img.clone()), 0);
    let loose = crop_black_bars(&DynamicImage::ImageRgb8(img), 255);
    assert_eq!(strict, loose);
    assert_eq!(strict.dimensions(), (11, 11));
}

#[test]
fn alpha_input_is_flattened_to_rgb() {
    let img = RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 0]));
    let out = crop_black_bars(&DynamicImage::ImageRgba8(img), 0);
    assert_eq!(out, black(10, 10));
}

#[test]
fn content_bbox_none_for_black_and_empty() {
    assert!(content_bbox(&black(5, 5)).is_none());
    assert!(content_bbox(&black(0, 0)).is_none());
}
