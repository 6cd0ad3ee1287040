// Adaptive transform unit tests
//
// Black-box checks over the public transform API: resize geometry, output
// format selection, and byte-budget convergence.

use std::io::Cursor;

use image::{DynamicImage, Rgba, RgbaImage};
use rstest::rstest;

use suzaku::constants::{MAX_REDUCTION_STEPS, MIN_QUALITY};
use suzaku::transform::{process_image, SourceFormat, TransformRequest};

const NO_PRESSURE: usize = usize::MAX;

fn encode_as(img: RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, format)
        .unwrap();
    buffer.into_inner()
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

/// High-entropy pixels keep jpeg output large enough to trip byte budgets
fn noise(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let seed = x.wrapping_mul(2654435761).wrapping_add(y.wrapping_mul(97));
        Rgba([(seed >> 2) as u8, (seed >> 10) as u8, (seed >> 18) as u8, 255])
    })
}

// Test: requested dimensions at or above the intrinsic ones leave the
// payload byte-identical
#[rstest]
#[case::wider("w=1000")]
#[case::taller("h=1000")]
#[case::both("w=1000&h=1000")]
#[case::exact("w=40&h=20")]
fn test_never_upscales(#[case] query: &str) {
    let data = encode_as(gradient(40, 20), image::ImageFormat::Png);
    let request = TransformRequest::from_query(query);

    let processed = process_image(&data, SourceFormat::Png, &request, NO_PRESSURE).unwrap();
    assert_eq!(processed.output_size, Some((40, 20)));
    assert_eq!(processed.data, data);
}

// Test: a single requested dimension scales with the aspect ratio and
// gets no canvas padding
#[rstest]
#[case::width_driven("w=10", (10, 5))]
#[case::height_driven("h=5", (10, 5))]
fn test_single_dimension_preserves_aspect(#[case] query: &str, #[case] expected: (u32, u32)) {
    let data = encode_as(gradient(40, 20), image::ImageFormat::Png);
    let request = TransformRequest::from_query(query);

    let processed = process_image(&data, SourceFormat::Png, &request, NO_PRESSURE).unwrap();
    assert_eq!(processed.output_size, Some(expected));

    let decoded = image::load_from_memory(&processed.data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), expected);
}

// Test: both dimensions produce exactly the requested canvas, letterboxed
// on white when the aspect ratios disagree
#[test]
fn test_dual_dimensions_letterbox_on_white() {
    let source = RgbaImage::from_pixel(40, 20, Rgba([10, 10, 10, 255]));
    let data = encode_as(source, image::ImageFormat::Png);
    let request = TransformRequest::from_query("w=10&h=10");

    let processed = process_image(&data, SourceFormat::Png, &request, NO_PRESSURE).unwrap();
    assert_eq!(processed.output_size, Some((10, 10)));

    let decoded = image::load_from_memory(&processed.data)
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (10, 10));
    // 40x20 contained in 10x10 scales to 10x5 centered: the top row is
    // pure fill, the middle row is image
    assert_eq!(decoded.get_pixel(5, 0).0, [255, 255, 255, 255]);
    assert_ne!(decoded.get_pixel(5, 5).0, [255, 255, 255, 255]);
}

// Test: resize combines with an explicit format change in one pass
#[test]
fn test_resize_with_format_change() {
    let data = encode_as(gradient(16, 8), image::ImageFormat::Png);
    let request = TransformRequest::from_query("w=8&f=jpeg");

    let processed = process_image(&data, SourceFormat::Png, &request, NO_PRESSURE).unwrap();
    assert_eq!(processed.format, "jpeg");
    assert_eq!(processed.output_size, Some((8, 4)));
    assert_eq!(&processed.data[0..2], &[0xFF, 0xD8]);
}

// Test: webp and tiff targets produce their container signatures
#[rstest]
#[case::webp("f=webp", image::ImageFormat::WebP)]
#[case::tiff("f=tiff", image::ImageFormat::Tiff)]
fn test_alternate_containers(#[case] query: &str, #[case] expected: image::ImageFormat) {
    let data = encode_as(gradient(8, 8), image::ImageFormat::Png);
    let request = TransformRequest::from_query(query);

    let processed = process_image(&data, SourceFormat::Png, &request, NO_PRESSURE).unwrap();
    assert_eq!(image::guess_format(&processed.data).unwrap(), expected);
}

// Test: an unreachable budget walks quality from 100 down to the floor in
// a fixed number of steps, then returns the floor encode as best effort
#[test]
fn test_impossible_budget_reaches_floor_deterministically() {
    let data = encode_as(noise(64, 64), image::ImageFormat::Png);
    let request = TransformRequest::from_query("f=jpeg");

    let processed = process_image(&data, SourceFormat::Png, &request, 1).unwrap();
    // 100 -> 80 -> 64 -> ... -> 1 under integer 4/5 decay
    assert_eq!(processed.reduction_steps, 16);
    assert_eq!(processed.quality, MIN_QUALITY);
    assert!(processed.reduction_steps <= MAX_REDUCTION_STEPS);
    assert!(!processed.data.is_empty());
}

// Test: a reachable budget converges and stops degrading immediately
#[test]
fn test_reachable_budget_converges() {
    let data = encode_as(noise(64, 64), image::ImageFormat::Png);
    let request = TransformRequest::from_query("f=jpeg");
    let budget = 4096;

    let processed = process_image(&data, SourceFormat::Png, &request, budget).unwrap();
    assert!(processed.data.len() <= budget);
    assert!(processed.reduction_steps >= 1);
    assert!(processed.quality < 100);
}

// Test: a floor-level starting quality terminates without any decay steps
#[test]
fn test_floor_quality_request_terminates_immediately() {
    let data = encode_as(noise(32, 32), image::ImageFormat::Png);
    let request = TransformRequest::from_query("f=jpeg&q=0");

    let processed = process_image(&data, SourceFormat::Png, &request, 1).unwrap();
    assert_eq!(processed.reduction_steps, 0);
    assert!(!processed.data.is_empty());
}

// Test: undecodable payloads skip the transform and keep the source format
#[test]
fn test_undecodable_source_degrades_to_original() {
    let data = b"definitely not an image";
    let request = TransformRequest::from_query("w=10&q=50");

    let processed = process_image(data, SourceFormat::Jpeg, &request, NO_PRESSURE).unwrap();
    assert_eq!(processed.data, data.to_vec());
    assert_eq!(processed.format, "jpeg");
    assert_eq!(processed.original_size, None);
    assert_eq!(processed.output_size, None);
}

// Test: a jpeg requested back at full quality with no dimensions is
// returned byte-identical, not re-encoded
#[test]
fn test_full_quality_jpeg_round_trips() {
    let data = encode_as(gradient(32, 32), image::ImageFormat::Jpeg);
    let request = TransformRequest::from_query("q=100");

    let processed = process_image(&data, SourceFormat::Jpeg, &request, NO_PRESSURE).unwrap();
    assert_eq!(processed.data, data);
    assert_eq!(processed.reduction_steps, 0);
}
