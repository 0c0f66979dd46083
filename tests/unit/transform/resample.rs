use super::*;

#[test]
fn resize_rgb_hits_exact_size_and_keeps_solid_color() {
    let img = RgbImage::from_pixel(426, 239, image::Rgb([255, 0, 0]));
    let out = resize_rgb(&img, 1280, 720);
    assert_eq!(out.dimensions(), (1280, 720));
    assert_eq!(out.get_pixel(640, 360).0, [255, 0, 0]);
    assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0]);
}

#[test]
fn resize_rgba_transparent_texels_do_not_darken_edges() {
    let mut img = RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 0]));
    for y in 0..8 {
        for x in 4..8 {
            img.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
        }
    }
    let out = resize_rgba(&img, 16, 16);
    assert_eq!(out.dimensions(), (16, 16));
    for x in 0..16 {
        let px = out.get_pixel(x, 8).0;
        if px[3] > 16 {
            assert!(px[0] > 200, "dark fringe at x={x}: {px:?}");
        }
    }
}

#[test]
fn premultiply_roundtrip_is_close() {
    let mut buf = vec![200u8, 100, 50, 128, 10, 20, 30, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut buf);
    assert_eq!(&buf[4..8], &[0, 0, 0, 0]);
    assert_eq!(&buf[8..12], &[1, 2, 3, 255]);
    unpremultiply_rgba8_in_place(&mut buf);
    for (got, want) in buf[..3].iter().zip([200u8, 100, 50]) {
        assert!(got.abs_diff(want) <= 2, "{got} vs {want}");
    }
}
