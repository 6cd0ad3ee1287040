//! Decode and resize primitives
//!
//! Source decoding with container guessing, and the contain-fit resize:
//! scale preserving aspect ratio, never upscale, letterbox onto a white
//! canvas when both dimensions were requested.

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::io::Reader as ImageReader;
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::num::NonZeroU32;

use crate::constants::{CANVAS_FILL_RGBA, MAX_CANVAS_PIXELS};

use super::error::TransformError;

/// A decoded source image with its intrinsic dimensions
pub struct DecodedSource {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
}

/// Decode source bytes, guessing the container format
///
/// Returns None when the codec cannot read the bytes (svg, corrupt data);
/// callers then skip resizing and serve the original payload.
pub fn decode_source(data: &[u8]) -> Option<DecodedSource> {
    let image = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .decode()
        .ok()?;
    let width = image.width();
    let height = image.height();
    Some(DecodedSource {
        image,
        width,
        height,
    })
}

/// The resolved resize decision for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Dimensions the source scales to
    pub scaled: (u32, u32),
    /// Output canvas; differs from `scaled` only when both dimensions were
    /// requested and the aspect ratios disagree
    pub canvas: (u32, u32),
}

/// Decide whether a resize applies and at what dimensions
///
/// A resize happens only when a requested dimension is strictly smaller
/// than the corresponding intrinsic one; images are never upscaled. The
/// scale factor is the smallest of the requested ratios so the image fits
/// the requested box. A canvas above [`MAX_CANVAS_PIXELS`] is rejected
/// here, before anything is allocated.
pub fn plan_resize(
    src_width: u32,
    src_height: u32,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<Option<ResizePlan>, TransformError> {
    let width_ratio = width.map(|w| f64::from(w) / f64::from(src_width));
    let height_ratio = height.map(|h| f64::from(h) / f64::from(src_height));

    let scale = match (width_ratio, height_ratio) {
        (Some(w), Some(h)) => w.min(h),
        (Some(w), None) => w,
        (None, Some(h)) => h,
        (None, None) => return Ok(None),
    };

    if scale >= 1.0 {
        return Ok(None);
    }

    let mut scaled_w = ((f64::from(src_width)) * scale).round().max(1.0) as u32;
    let mut scaled_h = ((f64::from(src_height)) * scale).round().max(1.0) as u32;
    // Rounding must not push past the requested box
    if let Some(w) = width {
        scaled_w = scaled_w.min(w);
    }
    if let Some(h) = height {
        scaled_h = scaled_h.min(h);
    }

    let canvas = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ => (scaled_w, scaled_h),
    };

    // The canvas is client-controlled when both dimensions are present;
    // bound it before resize_contain materializes the buffer
    let canvas_pixels = u64::from(canvas.0) * u64::from(canvas.1);
    if canvas_pixels > MAX_CANVAS_PIXELS {
        return Err(TransformError::canvas_too_large(canvas.0, canvas.1));
    }

    Ok(Some(ResizePlan {
        scaled: (scaled_w, scaled_h),
        canvas,
    }))
}

/// Resize onto the planned canvas
///
/// When the canvas is larger than the scaled image the remainder is filled
/// with solid white and the image is centered.
pub fn resize_contain(
    img: &DynamicImage,
    plan: &ResizePlan,
) -> Result<DynamicImage, TransformError> {
    let (scaled_w, scaled_h) = plan.scaled;
    let scaled = resample(img, scaled_w, scaled_h)?;

    if plan.canvas == plan.scaled {
        return Ok(scaled);
    }

    let (canvas_w, canvas_h) = plan.canvas;
    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, Rgba(CANVAS_FILL_RGBA));
    let offset_x = i64::from((canvas_w - scaled_w) / 2);
    let offset_y = i64::from((canvas_h - scaled_h) / 2);
    imageops::overlay(&mut canvas, &scaled, offset_x, offset_y);

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Resample to exact target dimensions with fast-image-resize (Lanczos3)
fn resample(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TransformError> {
    let src_width = NonZeroU32::new(img.width())
        .ok_or_else(|| TransformError::resize_failed("source width is 0"))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| TransformError::resize_failed("source height is 0"))?;
    let dst_width = NonZeroU32::new(target_w)
        .ok_or_else(|| TransformError::resize_failed("target width is 0"))?;
    let dst_height = NonZeroU32::new(target_h)
        .ok_or_else(|| TransformError::resize_failed("target height is 0"))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.to_rgba8().into_raw(),
        PixelType::U8x4,
    )
    .map_err(|e| TransformError::resize_failed(format!("failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| TransformError::resize_failed(format!("resize operation failed: {:?}", e)))?;

    let result_buf = dst_image.into_vec();
    let rgba_image = RgbaImage::from_raw(target_w, target_h, result_buf)
        .ok_or_else(|| TransformError::resize_failed("failed to create output image buffer"))?;

    Ok(DynamicImage::ImageRgba8(rgba_image))
}
