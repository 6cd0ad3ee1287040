//! Eligibility filter
//!
//! First pipeline stage: decides whether an intercepted exchange passes
//! through untouched, is rejected outright, or proceeds to transformation.

use std::borrow::Cow;

use crate::constants::DEFAULT_EXTENSION;
use crate::event::InterceptedExchange;
use crate::transform::SourceFormat;

/// How the pipeline continues after the eligibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Upstream response goes back unchanged
    PassThrough,
    /// Extension outside the supported set
    Forbidden,
    /// Proceed with the resolved key and source format
    Transformable { key: String, format: SourceFormat },
}

/// Evaluate an exchange against the interception rules
///
/// Non-success upstream statuses short-circuit before any parsing. An
/// unsupported extension is rejected even when no transformation
/// parameters are present.
pub fn evaluate(exchange: &InterceptedExchange) -> Continuation {
    if !exchange.upstream.is_success() {
        return Continuation::PassThrough;
    }

    let key = resource_key(&exchange.uri);
    let extension = extension_of(&key);

    match SourceFormat::from_extension(&extension) {
        Some(format) => Continuation::Transformable { key, format },
        None => Continuation::Forbidden,
    }
}

/// Resolve the resource key from the request path: URL-decode, then strip
/// the leading separator
pub fn resource_key(uri: &str) -> String {
    let decoded = urlencoding::decode(uri).unwrap_or(Cow::Borrowed(uri));
    decoded.strip_prefix('/').unwrap_or(&decoded).to_string()
}

/// Extension after the final `.`, lowercased; keys without one assume the
/// default
pub fn extension_of(key: &str) -> String {
    match key.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => DEFAULT_EXTENSION.to_string(),
    }
}
