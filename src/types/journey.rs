//! Journey and leg types.
//!
//! A [`Journey`] is the aggregate root: the reconstructed lifecycle of one
//! cross-chain message from origin to destination, decomposed into ordered
//! [`Leg`]s of ordered stops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::ids::{ChainId, JourneyId};
use super::instructions::InstructionPayload;
use super::waypoint::{Outcome, Waypoint};

/// The kind of hop a leg represents.
///
/// Kinds the feed adds later are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LegKind {
    /// Horizontal message passing between two parachains.
    Hrmp,
    /// Vertical message passing between a parachain and its relay chain.
    Vmp,
    /// A multi-hop transfer routed through an intermediate chain.
    Hop,
    /// A bridge between two consensus systems.
    Bridge,
    Other(String),
}

impl LegKind {
    pub fn as_str(&self) -> &str {
        match self {
            LegKind::Hrmp => "hrmp",
            LegKind::Vmp => "vmp",
            LegKind::Hop => "hop",
            LegKind::Bridge => "bridge",
            LegKind::Other(s) => s.as_str(),
        }
    }

    pub fn is_bridge(&self) -> bool {
        matches!(self, LegKind::Bridge)
    }
}

impl From<String> for LegKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "hrmp" => LegKind::Hrmp,
            "vmp" => LegKind::Vmp,
            "hop" => LegKind::Hop,
            "bridge" => LegKind::Bridge,
            _ => LegKind::Other(s),
        }
    }
}

impl From<&str> for LegKind {
    fn from(s: &str) -> Self {
        LegKind::from(s.to_string())
    }
}

impl From<LegKind> for String {
    fn from(kind: LegKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One hop segment of a journey.
///
/// INVARIANT: `stops` holds at least the `from` and `to` waypoints, with an
/// optional relay waypoint between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub stops: Vec<Waypoint>,

    /// 0-based position of this leg in the journey.
    pub index: usize,

    #[serde(rename = "type")]
    pub kind: LegKind,
}

impl Leg {
    /// Returns the position of the stop on `chain_id`, if the leg has one.
    pub fn position_of(&self, chain_id: &ChainId) -> Option<usize> {
        self.stops.iter().position(|s| &s.chain_id == chain_id)
    }

    /// Returns the position of the first failed stop, if any.
    pub fn first_failure(&self) -> Option<usize> {
        self.stops.iter().position(Waypoint::is_failed)
    }
}

/// Summary of where a journey stands, read off its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStatus {
    InProgress,
    Succeeded,
    Failed,
    TimedOut,
}

impl JourneyStatus {
    /// Returns true if no further update can change the destination outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JourneyStatus::Succeeded | JourneyStatus::Failed)
    }
}

/// The tracked lifecycle of one cross-chain message.
///
/// INVARIANTS:
/// - `origin.chain_id == legs[0].stops[0].chain_id`
/// - `destination.chain_id` equals the chain of the last stop of the last leg
/// - `created <= updated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub id: JourneyId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Value>,

    /// Set once, when the first update for this identity is seen.
    pub created: DateTime<Utc>,

    /// Bumped by every merge.
    pub updated: DateTime<Utc>,

    /// Instruction payload captured from the first update message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<InstructionPayload>,

    pub origin: Waypoint,

    pub destination: Waypoint,

    pub legs: Vec<Leg>,

    /// Protocol-level topic identifier (the message id) when the feed supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_id: Option<String>,
}

impl Journey {
    /// Returns the stop on `chain_id` within leg `leg_index`.
    pub fn stop(&self, leg_index: usize, chain_id: &ChainId) -> Option<&Waypoint> {
        let leg = self.legs.get(leg_index)?;
        leg.position_of(chain_id).map(|i| &leg.stops[i])
    }

    /// Iterates over every stop of every leg, in path order.
    pub fn stops(&self) -> impl Iterator<Item = &Waypoint> {
        self.legs.iter().flat_map(|l| l.stops.iter())
    }

    pub fn status(&self) -> JourneyStatus {
        match self.destination.outcome {
            Some(Outcome::Success) => JourneyStatus::Succeeded,
            Some(Outcome::Fail) => JourneyStatus::Failed,
            _ if self.destination.timeout => JourneyStatus::TimedOut,
            _ => JourneyStatus::InProgress,
        }
    }

    /// Returns true if any leg crosses a bridge.
    pub fn crosses_bridge(&self) -> bool {
        self.legs.iter().any(|l| l.kind.is_bridge())
    }
}
