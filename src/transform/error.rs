//! Error types for image transformation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("unsupported output format: {token}")]
    UnsupportedFormat { token: String },

    #[error("resize failed: {0}")]
    Resize(String),

    #[error("requested canvas {width}x{height} exceeds the composite pixel bound")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("failed to encode as {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
}

impl TransformError {
    pub fn unsupported_format(token: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            token: token.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        Self::Resize(message.into())
    }

    pub fn canvas_too_large(width: u32, height: u32) -> Self {
        Self::CanvasTooLarge { width, height }
    }

    pub fn encode_failed(format: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: message.to_string(),
        }
    }
}
