//! Typed update messages from the subscription feed.
//!
//! Each message reports on exactly one waypoint of one journey, and carries the
//! journey's full path metadata so that the first message seen for a journey is
//! enough to build its whole shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::types::{ChainId, LegKind, WaypointReport};

/// What kind of event the update message reports.
///
/// The feed namespaces its types (`xcm.received`); the bare spelling (`received`)
/// is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UpdateKind {
    /// The message left the origin chain.
    Sent,

    /// The message was received (and executed or failed) on the destination.
    Received,

    /// The message was seen passing through the relay chain.
    Relayed,

    /// The message was processed on an intermediate chain of a multi-hop path.
    Hop,

    /// The message was seen by a bridge.
    Bridge,

    /// The feed gave up waiting for the message to arrive.
    Timeout,

    Other(String),
}

impl UpdateKind {
    pub fn from_tag(tag: &str) -> Self {
        let bare = tag.strip_prefix("xcm.").unwrap_or(tag);
        match bare {
            "sent" => UpdateKind::Sent,
            "received" => UpdateKind::Received,
            "relayed" => UpdateKind::Relayed,
            "hop" => UpdateKind::Hop,
            "bridge" => UpdateKind::Bridge,
            "timeout" => UpdateKind::Timeout,
            _ => UpdateKind::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UpdateKind::Sent => "xcm.sent",
            UpdateKind::Received => "xcm.received",
            UpdateKind::Relayed => "xcm.relayed",
            UpdateKind::Hop => "xcm.hop",
            UpdateKind::Bridge => "xcm.bridge",
            UpdateKind::Timeout => "xcm.timeout",
            UpdateKind::Other(s) => s.as_str(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpdateKind::Timeout)
    }

    pub fn is_received(&self) -> bool {
        matches!(self, UpdateKind::Received)
    }
}

impl From<String> for UpdateKind {
    fn from(s: String) -> Self {
        UpdateKind::from_tag(&s)
    }
}

impl From<UpdateKind> for String {
    fn from(kind: UpdateKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Path metadata for one leg, as announced by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegSpec {
    pub from: ChainId,
    pub to: ChainId,

    /// Relay chain the leg is routed through, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay: Option<ChainId>,

    #[serde(rename = "type")]
    pub kind: LegKind,
}

impl LegSpec {
    pub fn new(from: impl Into<ChainId>, to: impl Into<ChainId>, kind: LegKind) -> Self {
        LegSpec {
            from: from.into(),
            to: to.into(),
            relay: None,
            kind,
        }
    }

    pub fn via(mut self, relay: impl Into<ChainId>) -> Self {
        self.relay = Some(relay.into());
        self
    }
}

/// The waypoint an update message reports on, addressed by leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageWaypoint {
    pub leg_index: usize,

    #[serde(flatten)]
    pub report: WaypointReport,
}

impl MessageWaypoint {
    pub fn chain_id(&self) -> &ChainId {
        &self.report.chain_id
    }
}

/// One status update from the subscription feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessage {
    #[serde(rename = "type")]
    pub kind: UpdateKind,

    pub origin: WaypointReport,

    pub destination: WaypointReport,

    pub legs: Vec<LegSpec>,

    pub waypoint: MessageWaypoint,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Value>,

    /// Topic identifier shared by all messages of a journey, when the feed knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Identifier correlating the forwarded parts of a bridged journey.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_id: Option<String>,
}
