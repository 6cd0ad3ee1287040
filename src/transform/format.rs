//! Source and output format vocabulary
//!
//! Interception supports a fixed set of resource extensions; only a subset
//! of those formats can be written back by the codec.

use std::str::FromStr;

use super::error::TransformError;

/// Formats eligible for interception, keyed by resource extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Svg,
    Gif,
    WebP,
    Tiff,
}

impl SourceFormat {
    /// Map a lowercased extension to its format
    ///
    /// Returns None for extensions outside the supported set, which the
    /// eligibility filter turns into a Forbidden response.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Tiff => "tiff",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Svg => "image/svg", // token mirrors the extension; svg is never re-encoded
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Tiff => "image/tiff",
        }
    }

    /// The format this source re-encodes to when no explicit `f` is given
    ///
    /// None for formats the codec cannot write (svg, gif).
    pub fn reencode_target(&self) -> Option<OutputFormat> {
        match self {
            Self::Jpeg => Some(OutputFormat::Jpeg),
            Self::Png => Some(OutputFormat::Png),
            Self::WebP => Some(OutputFormat::WebP),
            Self::Tiff => Some(OutputFormat::Tiff),
            Self::Svg | Self::Gif => None,
        }
    }
}

/// Formats the encoder can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Tiff,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Tiff => "tiff",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Tiff => "image/tiff",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            "tiff" => Ok(OutputFormat::Tiff),
            _ => Err(TransformError::unsupported_format(s)),
        }
    }
}
