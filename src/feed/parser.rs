//! Feed payload parser.
//!
//! This module parses raw JSON payloads into typed [`UpdateMessage`] values.
//!
//! # Parsing Strategy
//!
//! 1. The payload is read as either a bare update message or a subscription
//!    envelope whose `payload` field holds the update message
//! 2. The update message is deserialized into raw structures
//! 3. Path metadata is validated: at least one leg, and the reported waypoint
//!    must address one of those legs
//! 4. Malformed payloads return `Err` with details

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::{ChainId, LegKind, WaypointReport};

use super::message::{LegSpec, MessageWaypoint, UpdateKind, UpdateMessage};

/// Error type for feed parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Field has invalid value (e.g., a leg index outside the announced path).
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses a feed payload into a typed update message.
///
/// # Examples
///
/// ```
/// use xcm_journeys::feed::parse_update;
///
/// let payload = br#"{
///     "type": "xcm.sent",
///     "origin": { "chainId": "urn:ocn:polkadot:1000", "blockNumber": "100" },
///     "destination": { "chainId": "urn:ocn:polkadot:2034" },
///     "legs": [
///         { "from": "urn:ocn:polkadot:1000", "to": "urn:ocn:polkadot:2034", "type": "hrmp" }
///     ],
///     "waypoint": {
///         "chainId": "urn:ocn:polkadot:1000",
///         "legIndex": 0,
///         "messageHash": "0xabcd",
///         "outcome": "Success"
///     }
/// }"#;
///
/// let message = parse_update(payload).unwrap();
/// assert_eq!(message.legs.len(), 1);
/// ```
pub fn parse_update(payload: &[u8]) -> Result<UpdateMessage, ParseError> {
    let value: Value = serde_json::from_slice(payload)?;
    let raw: RawUpdate = serde_json::from_value(unwrap_envelope(value))?;
    raw.validate()
}

/// Strips a subscription envelope (`{ "payload": {...}, ... }`), if present.
fn unwrap_envelope(mut value: Value) -> Value {
    let is_envelope = value
        .as_object()
        .map(|o| !o.contains_key("waypoint") && o.get("payload").is_some_and(Value::is_object))
        .unwrap_or(false);

    if is_envelope {
        value["payload"].take()
    } else {
        value
    }
}

// ============================================================================
// Raw payload structures for deserialization
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUpdate {
    #[serde(rename = "type")]
    kind: String,
    origin: WaypointReport,
    destination: WaypointReport,
    legs: Vec<RawLeg>,
    waypoint: RawWaypoint,
    sender: Option<Value>,
    message_id: Option<String>,
    forward_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    from: String,
    to: String,
    relay: Option<String>,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWaypoint {
    leg_index: usize,
    #[serde(flatten)]
    report: WaypointReport,
}

impl RawUpdate {
    fn validate(self) -> Result<UpdateMessage, ParseError> {
        if self.legs.is_empty() {
            return Err(ParseError::InvalidField {
                field: "legs",
                value: "[]".to_string(),
            });
        }

        if self.waypoint.leg_index >= self.legs.len() {
            return Err(ParseError::InvalidField {
                field: "waypoint.legIndex",
                value: self.waypoint.leg_index.to_string(),
            });
        }

        let legs = self
            .legs
            .into_iter()
            .map(|l| LegSpec {
                from: ChainId(l.from),
                to: ChainId(l.to),
                relay: l.relay.map(ChainId),
                kind: LegKind::from(l.kind),
            })
            .collect();

        Ok(UpdateMessage {
            kind: UpdateKind::from_tag(&self.kind),
            origin: self.origin,
            destination: self.destination,
            legs,
            waypoint: MessageWaypoint {
                leg_index: self.waypoint.leg_index,
                report: self.waypoint.report,
            },
            sender: self.sender,
            message_id: self.message_id,
            forward_id: self.forward_id,
        })
    }
}
