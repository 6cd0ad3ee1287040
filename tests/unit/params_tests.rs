// Transformation parameter unit tests
//
// Query resolution is forgiving by design: unusable values fall back to
// their defaults instead of failing the request.

use rstest::rstest;

use suzaku::transform::{OutputFormat, TransformRequest};

// Test: dimensions accept positive integers only
#[rstest]
#[case::positive("w=800", Some(800))]
#[case::smallest("w=1", Some(1))]
#[case::zero("w=0", None)]
#[case::negative("w=-5", None)]
#[case::fractional("w=12.5", None)]
#[case::textual("w=abc", None)]
#[case::empty_value("w=", None)]
#[case::wider_than_u32("w=4294967296", None)]
fn test_width_parsing(#[case] query: &str, #[case] expected: Option<u32>) {
    assert_eq!(TransformRequest::from_query(query).width, expected);
}

// Test: quality clamps into 0-100 and defaults to 100
#[rstest]
#[case::in_range("q=55", 55)]
#[case::upper_bound("q=100", 100)]
#[case::lower_bound("q=0", 0)]
#[case::above_range("q=150", 100)]
#[case::below_range("q=-20", 0)]
#[case::garbage("q=high", 100)]
#[case::absent("w=10", 100)]
fn test_quality_resolution(#[case] query: &str, #[case] expected: u8) {
    assert_eq!(TransformRequest::from_query(query).quality, expected);
}

// Test: only encodable tokens name an output format; everything else
// falls back to inference from the resource extension
#[rstest]
#[case::jpeg("f=jpeg", Some(OutputFormat::Jpeg))]
#[case::png("f=png", Some(OutputFormat::Png))]
#[case::webp("f=webp", Some(OutputFormat::WebP))]
#[case::tiff("f=tiff", Some(OutputFormat::Tiff))]
#[case::uppercase("f=WEBP", Some(OutputFormat::WebP))]
#[case::jpg_alias_not_canonical("f=jpg", None)]
#[case::gif_not_encodable("f=gif", None)]
#[case::svg_not_encodable("f=svg", None)]
#[case::unknown("f=avif", None)]
fn test_format_resolution(#[case] query: &str, #[case] expected: Option<OutputFormat>) {
    assert_eq!(TransformRequest::from_query(query).format, expected);
}

// Test: pass-through requires the complete absence of recognized keys
#[rstest]
#[case::empty("", true)]
#[case::unrelated_keys("v=2&token=abc", true)]
#[case::width("w=100", false)]
#[case::height("h=50", false)]
#[case::quality("q=80", false)]
#[case::format("f=webp", false)]
#[case::unusable_value_still_counts("w=abc", false)]
#[case::bare_key("q", false)]
fn test_passthrough_detection(#[case] query: &str, #[case] passthrough: bool) {
    assert_eq!(
        TransformRequest::from_query(query).is_passthrough(),
        passthrough
    );
}

// Test: a full query resolves every field at once
#[test]
fn test_combined_query() {
    let request = TransformRequest::from_query("w=800&h=600&q=80&f=webp&cache=no");
    assert_eq!(request.width, Some(800));
    assert_eq!(request.height, Some(600));
    assert_eq!(request.quality, 80);
    assert_eq!(request.format, Some(OutputFormat::WebP));
    assert!(!request.is_passthrough());
}

// Test: percent-encoded values decode before parsing
#[test]
fn test_urlencoded_values_decode() {
    assert_eq!(
        TransformRequest::from_query("f=%77ebp").format,
        Some(OutputFormat::WebP)
    );
    assert_eq!(TransformRequest::from_query("w=%31%30").width, Some(10));
}
