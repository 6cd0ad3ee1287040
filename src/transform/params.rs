//! Transformation parameter resolution
//!
//! Recognized query keys: `w`, `h`, `q`, `f`. Everything else in the query
//! string is ignored. Unusable values degrade to their defaults instead of
//! failing the request.

use std::borrow::Cow;
use std::str::FromStr;

use crate::constants::MAX_QUALITY;

use super::format::OutputFormat;

/// A resolved transformation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    /// Target width in pixels
    pub width: Option<u32>,
    /// Target height in pixels
    pub height: Option<u32>,
    /// Encoding quality, always within 0-100
    pub quality: u8,
    /// Explicit output format; None means infer from the resource extension
    pub format: Option<OutputFormat>,
    /// Whether any recognized key appeared in the query string
    requested: bool,
}

impl TransformRequest {
    /// Resolve a raw query string (e.g. `w=800&h=600&q=80&f=webp`)
    ///
    /// Dimensions must be positive integers (anything else counts as
    /// absent), quality clamps into 0-100 and defaults to 100, and unknown
    /// format tokens fall back to the format inferred from the extension.
    pub fn from_query(querystring: &str) -> Self {
        let mut request = Self {
            width: None,
            height: None,
            quality: MAX_QUALITY,
            format: None,
            requested: false,
        };

        for pair in querystring.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, decode(v)),
                None => (pair, Cow::Borrowed("")),
            };
            match key {
                "w" => {
                    request.requested = true;
                    request.width = parse_dimension(&value);
                }
                "h" => {
                    request.requested = true;
                    request.height = parse_dimension(&value);
                }
                "q" => {
                    request.requested = true;
                    request.quality = parse_quality(&value);
                }
                "f" => {
                    request.requested = true;
                    request.format = OutputFormat::from_str(&value).ok();
                }
                _ => {}
            }
        }

        request
    }

    /// True when no recognized key was supplied, meaning the upstream
    /// response passes through without a storage fetch
    pub fn is_passthrough(&self) -> bool {
        !self.requested
    }
}

fn decode(value: &str) -> Cow<'_, str> {
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}

/// Positive integers only; anything else counts as absent
fn parse_dimension(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|px| *px > 0)
}

/// Integers clamp into 0-100; non-numeric values default to 100
fn parse_quality(value: &str) -> u8 {
    match value.parse::<i64>() {
        Ok(q) => q.clamp(0, i64::from(MAX_QUALITY)) as u8,
        Err(_) => MAX_QUALITY,
    }
}
