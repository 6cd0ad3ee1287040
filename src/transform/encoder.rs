//! Image encoder abstraction
//!
//! Trait-based encoder seam with one implementation per writable format.
//! The adaptive encoding loop re-invokes the same encoder at decreasing
//! quality, so quality is a per-call argument rather than encoder state.

use crate::constants::{MAX_QUALITY, MIN_QUALITY};

use super::error::TransformError;
use super::format::OutputFormat;

/// Trait for image encoders
///
/// Implementations encode raw RGBA pixel data to their target format.
/// The trait is object-safe to allow dynamic dispatch from the factory.
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Whether `encode` output varies with the quality argument
    ///
    /// Lossless encoders ignore it, so re-encoding them at a lower
    /// quality reproduces the same bytes.
    fn respects_quality(&self) -> bool;

    /// Encode raw RGBA image data to the target format
    ///
    /// # Arguments
    /// * `rgba` - Raw pixel data in RGBA format (4 bytes per pixel)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `quality` - Encoding quality (0-100); ignored by lossless formats
    fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        quality: u8,
    ) -> Result<Vec<u8>, TransformError>;
}

/// JPEG encoder using the image crate
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn respects_quality(&self) -> bool {
        true
    }

    fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        quality: u8,
    ) -> Result<Vec<u8>, TransformError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        // Convert RGBA to RGB (JPEG doesn't support alpha)
        let rgb_data = rgba_to_rgb(rgba);

        // The codec accepts 1-100
        let quality = quality.clamp(MIN_QUALITY, MAX_QUALITY);

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, quality);

        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8)
            .map_err(|e| TransformError::encode_failed("jpeg", e))?;

        Ok(output.into_inner())
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn respects_quality(&self) -> bool {
        false
    }

    fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        _quality: u8,
    ) -> Result<Vec<u8>, TransformError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new(&mut output);

        encoder
            .write_image(rgba, width, height, image::ColorType::Rgba8)
            .map_err(|e| TransformError::encode_failed("png", e))?;

        Ok(output.into_inner())
    }
}

/// WebP encoder using the image crate
///
/// Note: The `image` crate only supports lossless WebP encoding.
/// For lossy WebP encoding, consider using the `webp` crate directly.
pub struct WebPEncoder;

impl ImageEncoder for WebPEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::WebP
    }

    fn respects_quality(&self) -> bool {
        false
    }

    fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        _quality: u8,
    ) -> Result<Vec<u8>, TransformError> {
        use image::codecs::webp::WebPEncoder as ImageWebPEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageWebPEncoder::new_lossless(&mut output);

        encoder
            .write_image(rgba, width, height, image::ColorType::Rgba8)
            .map_err(|e| TransformError::encode_failed("webp", e))?;

        Ok(output.into_inner())
    }
}

/// TIFF encoder using the image crate
pub struct TiffEncoder;

impl ImageEncoder for TiffEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Tiff
    }

    fn respects_quality(&self) -> bool {
        false
    }

    fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        _quality: u8,
    ) -> Result<Vec<u8>, TransformError> {
        use image::codecs::tiff::TiffEncoder as ImageTiffEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageTiffEncoder::new(&mut output);

        encoder
            .write_image(rgba, width, height, image::ColorType::Rgba8)
            .map_err(|e| TransformError::encode_failed("tiff", e))?;

        Ok(output.into_inner())
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    /// Create an encoder for the specified output format
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::Png => Box::new(PngEncoder),
            OutputFormat::WebP => Box::new(WebPEncoder),
            OutputFormat::Tiff => Box::new(TiffEncoder),
        }
    }
}

/// Convert RGBA to RGB by discarding alpha channel
fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let pixel_count = rgba.len() / 4;
    let mut rgb = Vec::with_capacity(pixel_count * 3);

    for chunk in rgba.chunks_exact(4) {
        rgb.push(chunk[0]); // R
        rgb.push(chunk[1]); // G
        rgb.push(chunk[2]); // B
                            // Alpha (chunk[3]) is discarded
    }

    rgb
}
