//! Opaque instruction payloads.
//!
//! The reconciler never looks inside a payload. The one thing exposed to
//! downstream decoders is the protocol version tag, so that every decoder reads it
//! the same way regardless of which message variant carried the payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Supported cross-consensus message format versions.
///
/// Serialized with the feed's spelling (`"V3"`); the lowercase form is accepted on
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XcmVersion {
    #[serde(alias = "v2")]
    V2,
    #[serde(alias = "v3")]
    V3,
    #[serde(alias = "v4")]
    V4,
}

impl XcmVersion {
    /// Parses a version tag, accepting both `V3` and `v3`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "v2" => Some(XcmVersion::V2),
            "v3" => Some(XcmVersion::V3),
            "v4" => Some(XcmVersion::V4),
            _ => None,
        }
    }
}

impl fmt::Display for XcmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            XcmVersion::V2 => "V2",
            XcmVersion::V3 => "V3",
            XcmVersion::V4 => "V4",
        };
        write!(f, "{}", tag)
    }
}

/// A raw instruction payload, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionPayload(pub Value);

impl InstructionPayload {
    pub fn new(value: Value) -> Self {
        InstructionPayload(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns the protocol version the payload is encoded with, if recognisable.
    ///
    /// Two shapes occur on the feed: `{ "type": "V3", "value": [...] }` and the
    /// single-key form `{ "V3": [...] }`.
    pub fn version(&self) -> Option<XcmVersion> {
        let object = self.0.as_object()?;
        if let Some(tag) = object.get("type").and_then(Value::as_str) {
            return XcmVersion::from_tag(tag);
        }
        match object.len() {
            1 => object.keys().next().and_then(|k| XcmVersion::from_tag(k)),
            _ => None,
        }
    }
}
