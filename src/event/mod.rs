//! CloudFront origin-response event envelope
//!
//! Serde view of the Lambda@Edge payload: `Records[0].cf` carries the origin
//! request and the upstream response. Unknown fields are ignored on the way
//! in; terminal responses serialize with the exact CloudFront field names.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EdgeError;

/// Top-level Lambda@Edge event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginResponseEvent {
    #[serde(rename = "Records")]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub cf: CfPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfPayload {
    pub request: RequestDescriptor,
    pub response: ResponseDescriptor,
}

/// The origin request as CloudFront forwarded it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub uri: String,
    #[serde(default)]
    pub querystring: String,
}

/// One header value; `key` preserves the canonical casing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

/// The upstream response, and the shape every terminal outcome serializes to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    pub status: String,
    #[serde(
        rename = "statusDescription",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_description: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, Vec<HeaderEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "bodyEncoding", skip_serializing_if = "Option::is_none")]
    pub body_encoding: Option<String>,
}

impl ResponseDescriptor {
    /// Numeric view of the string status; unparsable statuses count as
    /// non-success
    pub fn status_code(&self) -> u16 {
        self.status.parse().unwrap_or(0)
    }

    pub fn is_success(&self) -> bool {
        self.status_code() == 200
    }

    /// Replace (or insert) a header by its lowercase name, keeping every
    /// other header untouched
    pub fn set_header(&mut self, name: &str, canonical: &str, value: &str) {
        self.headers.insert(
            name.to_string(),
            vec![HeaderEntry {
                key: Some(canonical.to_string()),
                value: value.to_string(),
            }],
        );
    }

    /// First value of a header by its lowercase name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}

/// An intercepted exchange: the origin request paired with the upstream
/// response it produced
#[derive(Debug, Clone)]
pub struct InterceptedExchange {
    pub uri: String,
    pub querystring: String,
    pub upstream: ResponseDescriptor,
}

impl InterceptedExchange {
    /// Pull the exchange out of the event's first record
    pub fn from_event(event: OriginResponseEvent) -> Result<Self, EdgeError> {
        let record = event
            .records
            .into_iter()
            .next()
            .ok_or_else(|| EdgeError::malformed_event("event carries no records"))?;

        Ok(Self {
            uri: record.cf.request.uri,
            querystring: record.cf.request.querystring,
            upstream: record.cf.response,
        })
    }
}
