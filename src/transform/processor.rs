//! Adaptive image transformation
//!
//! Orchestrates decode → conditional resize → conditional re-encode, with
//! quality degradation until the encoded payload fits the byte budget.

use crate::constants::{
    MAX_QUALITY, MAX_REDUCTION_STEPS, MIN_QUALITY, QUALITY_DECAY_DENOMINATOR,
    QUALITY_DECAY_NUMERATOR,
};

use super::codec::{decode_source, plan_resize, resize_contain};
use super::encoder::EncoderFactory;
use super::error::TransformError;
use super::format::{OutputFormat, SourceFormat};
use super::params::TransformRequest;

/// Result of a transformation pass
#[derive(Debug)]
pub struct ProcessedImage {
    /// Final payload bytes
    pub data: Vec<u8>,
    /// Format token as it appears in the content-type header
    pub format: &'static str,
    /// Intrinsic dimensions, when the source was decodable
    pub original_size: Option<(u32, u32)>,
    /// Output dimensions, when the source was decodable
    pub output_size: Option<(u32, u32)>,
    /// Quality of the final encode (100 when the original bytes were kept)
    pub quality: u8,
    /// Times the byte-budget loop lowered quality
    pub reduction_steps: u32,
}

/// Transform source bytes according to the request
///
/// Resizes at most once, re-encodes only when something actually changes
/// (dimensions, format, or quality below 100), and otherwise returns the
/// original bytes untouched. `max_output_bytes` is the payload budget the
/// adaptive loop converges under; once the quality floor or the step cap is
/// reached the last buffer is returned as-is. The loop only runs for
/// quality-bearing targets; lossless encodes are returned on the first pass
/// whatever their size.
pub fn process_image(
    data: &[u8],
    source_format: SourceFormat,
    request: &TransformRequest,
    max_output_bytes: usize,
) -> Result<ProcessedImage, TransformError> {
    // Undecodable sources (svg, corrupt data) cannot be resized or
    // re-encoded: serve the original payload under the source format
    let Some(source) = decode_source(data) else {
        return Ok(ProcessedImage {
            data: data.to_vec(),
            format: source_format.as_str(),
            original_size: None,
            output_size: None,
            quality: MAX_QUALITY,
            reduction_steps: 0,
        });
    };

    let plan = plan_resize(source.width, source.height, request.width, request.height)?;

    let format_changes = match (request.format, source_format.reencode_target()) {
        (Some(explicit), inferred) => Some(explicit) != inferred,
        (None, _) => false,
    };

    if plan.is_none() && !format_changes && request.quality >= MAX_QUALITY {
        // Nothing to change: hand back the original bytes untouched
        return Ok(ProcessedImage {
            data: data.to_vec(),
            format: source_format.as_str(),
            original_size: Some((source.width, source.height)),
            output_size: Some((source.width, source.height)),
            quality: MAX_QUALITY,
            reduction_steps: 0,
        });
    }

    // Decodable sources the codec cannot write back (gif) are up-converted
    // losslessly when an encode pass is unavoidable
    let target = request
        .format
        .or_else(|| source_format.reencode_target())
        .unwrap_or(OutputFormat::Png);

    let (base, output_size) = match &plan {
        Some(plan) => {
            let resized = resize_contain(&source.image, plan)?;
            let dims = (resized.width(), resized.height());
            (resized, dims)
        }
        None => (source.image, (source.width, source.height)),
    };

    let rgba = base.to_rgba8();
    let (width, height) = rgba.dimensions();
    let raw = rgba.into_raw();
    let encoder = EncoderFactory::create(target);

    let mut quality = request.quality;
    let mut reduction_steps = 0u32;

    // Every pass re-encodes the same decoded pixels so artifacts never
    // compound; only the quality setting moves
    let data = loop {
        let encoded = encoder.encode(&raw, width, height, quality)?;
        if encoded.len() <= max_output_bytes {
            break encoded;
        }
        if !encoder.respects_quality() {
            // Lossless output never varies with quality; the first
            // oversized encode is already the best effort
            break encoded;
        }
        if quality <= MIN_QUALITY || reduction_steps >= MAX_REDUCTION_STEPS {
            // Floor or cap reached: the oversized buffer is the best effort
            break encoded;
        }
        quality = reduce_quality(quality);
        reduction_steps += 1;
    };

    Ok(ProcessedImage {
        data,
        format: target.as_str(),
        original_size: Some((source.width, source.height)),
        output_size: Some(output_size),
        quality,
        reduction_steps,
    })
}

/// One step of quality decay, never below the floor
fn reduce_quality(quality: u8) -> u8 {
    let reduced = u32::from(quality) * QUALITY_DECAY_NUMERATOR / QUALITY_DECAY_DENOMINATOR;
    (reduced as u8).max(MIN_QUALITY)
}
