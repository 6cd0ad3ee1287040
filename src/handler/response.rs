//! Terminal response construction
//!
//! Pure functions from pipeline outcomes to CloudFront response
//! descriptors. Upstream headers other than content-type are preserved on
//! every path.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::event::ResponseDescriptor;
use crate::transform::ProcessedImage;

/// 403 with a plain-text body for unsupported extensions
pub fn forbidden(mut upstream: ResponseDescriptor) -> ResponseDescriptor {
    upstream.status = "403".to_string();
    upstream.status_description = Some("Forbidden".to_string());
    upstream.set_header("content-type", "Content-Type", "text/plain");
    upstream.body = Some("Forbidden".to_string());
    upstream.body_encoding = None;
    upstream
}

/// 404 with a plain-text body for absent or empty objects
pub fn not_found(mut upstream: ResponseDescriptor) -> ResponseDescriptor {
    upstream.status = "404".to_string();
    upstream.status_description = Some("Not Found".to_string());
    upstream.set_header("content-type", "Content-Type", "text/plain");
    upstream.body = Some("Not Found".to_string());
    upstream.body_encoding = None;
    upstream
}

/// 200 carrying the transformed payload base64-encoded
pub fn success(
    mut upstream: ResponseDescriptor,
    processed: &ProcessedImage,
) -> ResponseDescriptor {
    upstream.status = "200".to_string();
    upstream.status_description = Some("OK".to_string());
    upstream.set_header(
        "content-type",
        "Content-Type",
        &format!("image/{}", processed.format),
    );
    upstream.body = Some(STANDARD.encode(&processed.data));
    upstream.body_encoding = Some("base64".to_string());
    upstream
}
