//! Image transformation module
//!
//! Implements the adaptive encoder stage of the pipeline:
//! - Decode with container guessing
//! - Contain-fit resize (white letterbox, never upscale)
//! - Format conversion across the writable set (JPEG, PNG, WebP, TIFF)
//! - Quality degradation loop that converges under the payload budget
//!
//! Transformation parameters arrive as query keys:
//! ```text
//! /photos/cat.jpg?w=800&h=600&q=80&f=webp
//! ```

// Core modules
pub mod codec;
pub mod encoder;
pub mod error;
pub mod format;
pub mod params;
pub mod processor;

// Re-export commonly used types
pub use codec::{decode_source, plan_resize, resize_contain, DecodedSource, ResizePlan};
pub use encoder::{EncoderFactory, ImageEncoder};
pub use error::TransformError;
pub use format::{OutputFormat, SourceFormat};
pub use params::TransformRequest;
pub use processor::{process_image, ProcessedImage};
