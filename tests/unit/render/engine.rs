use super::*;

use image::{Rgb, RgbImage, Rgba};

use crate::foundation::core::AspectRatio;

fn red_source() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(426, 240, Rgb([255, 0, 0])))
}

#[test]
fn centered_offset_floors() {
    assert_eq!(centered_offset((1280, 720), (1152, 648)), (64, 36));
    assert_eq!(centered_offset((1280, 720), (1151, 647)), (64, 36));
    assert_eq!(centered_offset((1280, 720), (1281, 721)), (-1, -1));
    assert_eq!(centered_offset((10, 10), (10, 10)), (0, 0));
}

#[test]
fn output_is_canvas_sized_with_alpha_for_valid_ratios() {
    let engine = CompositionEngine::default();
    for ratio in [0.1, 0.5, 0.9, 0.955, 1.0] {
        let out = engine
            .process_thumbnail(&red_source(), ratio, &OverlayRequest::Color(Rgba8::new(0, 0, 0, 0)))
            .unwrap();
        assert_eq!(out.dimensions(), (1280, 720), "ratio {ratio}");
    }
}

#[test]
fn content_is_centered_and_outside_stays_transparent() {
    let engine = CompositionEngine::default();
    let out = engine
        .process_thumbnail(&red_source(), 0.5, &OverlayRequest::Color(Rgba8::new(0, 0, 0, 0)))
        .unwrap();
    // 640x360 pasted at (320, 180).
    assert_eq!(out.get_pixel(640, 360).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(320, 180).0[3], 255);
    assert_eq!(out.get_pixel(959, 539).0[3], 255);
    assert_eq!(out.get_pixel(319, 360).0[3], 0);
    assert_eq!(out.get_pixel(960, 360).0[3], 0);
    assert_eq!(out.get_pixel(640, 179).0[3], 0);
    assert_eq!(out.get_pixel(640, 540).0[3], 0);
}

#[test]
fn oversized_ratio_is_clipped_not_rejected() {
    let engine = CompositionEngine::default();
    let out = engine
        .process_thumbnail(&red_source(), 1.5, &OverlayRequest::Color(Rgba8::new(0, 0, 0, 0)))
        .unwrap();
    assert_eq!(out.dimensions(), (1280, 720));
    assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(1279, 719).0, [255, 0, 0, 255]);
}

#[test]
fn huge_ratio_is_rejected_before_resizing() {
    let engine = CompositionEngine::default();
    let overlay = OverlayRequest::Color(Rgba8::default_overlay());
    for ratio in [1e7, 1e12, f64::from(MAX_OVERSIZE_FACTOR) + 0.5] {
        let err = engine.process_thumbnail(&red_source(), ratio, &overlay);
        assert!(matches!(err, Err(ThumbError::Validation(_))), "ratio {ratio}");
    }
}

#[test]
fn ratio_at_oversize_cap_is_accepted() {
    let canvas = CanvasSpec {
        width: 32,
        height: 18,
        aspect: AspectRatio::WIDESCREEN,
    };
    let engine = CompositionEngine::new(canvas);
    let out = engine
        .process_thumbnail(
            &red_source(),
            f64::from(MAX_OVERSIZE_FACTOR),
            &OverlayRequest::Color(Rgba8::new(0, 0, 0, 0)),
        )
        .unwrap();
    assert_eq!(out.dimensions(), (32, 18));
    assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn non_positive_or_nan_ratio_is_rejected() {
    let engine = CompositionEngine::default();
    let overlay = OverlayRequest::Color(Rgba8::default_overlay());
    for ratio in [0.0, -0.5, f64::NAN, f64::INFINITY, 1e-9] {
        let err = engine.process_thumbnail(&red_source(), ratio, &overlay);
        assert!(matches!(err, Err(ThumbError::Validation(_))), "ratio {ratio}");
    }
}

#[test]
fn missing_overlay_file_falls_back_to_flat_color() {
    let engine = CompositionEngine::default();
    let overlay = OverlayRequest::Image {
        path: PathBuf::from("definitely/not/here/overlay.png"),
        fallback: Rgba8::new(0, 0, 0, 100),
    };
    let out = engine.process_thumbnail(&red_source(), 0.9, &overlay).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 100]);
    assert_eq!(out.get_pixel(640, 360).0, [155, 0, 0, 255]);
}

#[test]
fn image_overlay_is_stretched_over_canvas() {
    let dir = std::env::temp_dir().join(format!("thumbkit_engine_overlay_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame.png");

    // 2x2 overlay: opaque white top row, transparent bottom row.
    let mut ov = RgbaImage::new(2, 2);
    ov.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
    ov.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
    ov.save(&path).unwrap();

    let engine = CompositionEngine::default();
    let out = engine
        .process_thumbnail(
            &red_source(),
            0.9,
            &OverlayRequest::from_parts(Some(&path), Rgba8::default_overlay()),
        )
        .unwrap();
    assert_eq!(out.get_pixel(640, 20).0, [255, 255, 255, 255]);
    assert_eq!(out.get_pixel(640, 700).0, [0, 0, 0, 0]);
    assert_eq!(out.get_pixel(640, 600).0, [255, 0, 0, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn inputs_are_not_mutated() {
    let src = red_source();
    let before = src.clone();
    CompositionEngine::default()
        .process_thumbnail(&src, 0.9, &OverlayRequest::Color(Rgba8::default_overlay()))
        .unwrap();
    assert_eq!(src, before);
}

#[test]
fn from_parts_picks_exactly_one_layer() {
    let c = Rgba8::new(1, 2, 3, 4);
    assert_eq!(OverlayRequest::from_parts(None, c), OverlayRequest::Color(c));
    assert_eq!(
        OverlayRequest::from_parts(Some(Path::new("a.png")), c),
        OverlayRequest::Image {
            path: PathBuf::from("a.png"),
            fallback: c
        }
    );
}
