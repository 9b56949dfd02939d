// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for rendering TOF records

use depthset::encoding::{decode_linear, plasma_rgba};
use depthset::raster::{convert_tof_file, rasterize_tof_frame};
use depthset::{AppError, EncodedPixel, EncodingMethod, RasterOptions, RecordError, TofFrame};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tof_frame() -> TofFrame {
    TofFrame::from_path(fixture("tof_0.json")).unwrap()
}

#[test]
fn test_default_options_colormap_blocks() {
    let canvas = rasterize_tof_frame(&tof_frame(), &RasterOptions::default()).unwrap();

    assert_eq!((canvas.width(), canvas.height()), (8, 6));
    // Two corner blocks clipped to 2x2, one full 3x3 block, one point off-canvas
    assert_eq!(canvas.count_not(EncodedPixel::TRANSPARENT), 4 + 9 + 4);

    // 0.5 / 4.0 * 255 = 31.875
    assert_eq!(canvas.get(1, 1), Some(EncodedPixel(plasma_rgba(32))));
    assert_eq!(canvas.get(5, 4), Some(EncodedPixel(plasma_rgba(128))));
    assert_eq!(canvas.get(7, 5), Some(EncodedPixel(plasma_rgba(255))));
    assert_eq!(canvas.get(2, 0), Some(EncodedPixel::TRANSPARENT));
}

#[test]
fn test_linear_values_decode_back() {
    let options = RasterOptions::from_codes(2, 0, [0, 0, 0, 255]);
    let frame = tof_frame();
    let canvas = rasterize_tof_frame(&frame, &options).unwrap();

    assert_eq!(canvas.count_not(EncodedPixel::new(0, 0, 0, 255)), 3);
    let pixel = canvas.get(4, 3).unwrap();
    assert_eq!(pixel, EncodedPixel::new(128, 128, 128, 255));

    let step = frame.max_distance / 255.0;
    let decoded = decode_linear(pixel, frame.max_distance).unwrap();
    assert!((decoded - 2.0).abs() < step);
}

#[test]
fn test_raw_bits_are_float_bytes() {
    let options = RasterOptions {
        method: EncodingMethod::RawBits,
        point_radius: 0,
        background: EncodedPixel::TRANSPARENT,
    };
    let canvas = rasterize_tof_frame(&tof_frame(), &options).unwrap();
    assert_eq!(canvas.get(4, 3), Some(EncodedPixel(2.0f32.to_be_bytes())));
}

#[test]
fn test_invalid_max_distance_rejects_frame() {
    let mut frame = tof_frame();
    frame.max_distance = 0.0;
    assert!(rasterize_tof_frame(&frame, &RasterOptions::default()).is_err());
}

#[test]
fn test_convert_writes_png() {
    let output = std::env::temp_dir().join(format!("depthset_tof_{}.png", std::process::id()));
    let drawn = convert_tof_file(&fixture("tof_0.json"), &output, &RasterOptions::default()).unwrap();
    assert_eq!(drawn, 4);

    let image = image::open(&output).unwrap().to_rgba8();
    let _ = std::fs::remove_file(&output);
    assert_eq!(image.dimensions(), (8, 6));
    assert_eq!(image.get_pixel(4, 3).0, plasma_rgba(128));
    assert_eq!(image.get_pixel(2, 0).0, [0, 0, 0, 0]);
}

#[test]
fn test_convert_bad_record_fails() {
    let output = std::env::temp_dir().join(format!("depthset_bad_{}.png", std::process::id()));
    let result = convert_tof_file(&fixture("points_0.json"), &output, &RasterOptions::default());
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_oversized_record_fails_without_allocating() {
    let input = std::env::temp_dir().join(format!("depthset_huge_{}.json", std::process::id()));
    let output = input.with_extension("png");
    let json = std::fs::read_to_string(fixture("tof_0.json"))
        .unwrap()
        .replace("\"width\": 8", "\"width\": 4000000000")
        .replace("\"height\": 6", "\"height\": 4000000000");
    std::fs::write(&input, json).unwrap();

    let result = convert_tof_file(&input, &output, &RasterOptions::default());
    let _ = std::fs::remove_file(&input);
    assert!(matches!(
        result,
        Err(AppError::Record(RecordError::InvalidValue { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn test_huge_radius_fills_small_frame() {
    let options = RasterOptions::from_codes(2, u32::MAX as i64, [0, 0, 0, 0]);
    let canvas = rasterize_tof_frame(&tof_frame(), &options).unwrap();
    assert_eq!(canvas.count_not(EncodedPixel::TRANSPARENT), 8 * 6);
    // The off-canvas point is drawn last and covers everything
    assert_eq!(canvas.get(0, 0), Some(EncodedPixel::new(191, 191, 191, 255)));
}
