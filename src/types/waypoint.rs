//! Waypoint types: a single chain touchpoint on a journey's path.
//!
//! A [`Waypoint`] is what the reconciler stores. A [`WaypointReport`] is what the
//! feed says about a waypoint in one update message; every field other than the
//! chain identifier may be missing from any given report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{BlockNumber, ChainId};
use super::instructions::InstructionPayload;

/// Resolution state of a stop. A missing outcome means the stop is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Fail,
    Skip,
}

/// Display-oriented reading of a waypoint's resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    /// No outcome yet.
    Pending,

    /// No outcome, and the feed signalled a timeout for the journey.
    TimedOut,

    /// The message was processed on this chain.
    Succeeded,

    /// The message bypassed this chain, or never reached it because of an
    /// upstream failure.
    Skipped,

    /// The message failed on this chain.
    Failed,
}

/// A single chain touchpoint on a journey's path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub chain_id: ChainId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<BlockNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_position: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Value>,

    /// Raw instruction payload. Only ever populated on the origin waypoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<InstructionPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_trapped: Option<Value>,

    #[serde(default)]
    pub skipped: bool,

    #[serde(default)]
    pub timeout: bool,
}

impl Waypoint {
    /// Creates a waypoint that carries only its chain identifier.
    pub fn bare(chain_id: impl Into<ChainId>) -> Self {
        Waypoint {
            chain_id: chain_id.into(),
            message_hash: None,
            block_number: None,
            block_position: None,
            outcome: None,
            error: None,
            event: None,
            instructions: None,
            assets_trapped: None,
            skipped: false,
            timeout: false,
        }
    }

    /// Returns true once the stop has an outcome.
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == Some(Outcome::Fail)
    }

    /// Forces the stop to `Fail` + `skipped`: the message never reached it.
    pub fn foreclose(&mut self) {
        self.outcome = Some(Outcome::Fail);
        self.skipped = true;
    }

    pub fn status(&self) -> StopStatus {
        match self.outcome {
            None if self.timeout => StopStatus::TimedOut,
            None => StopStatus::Pending,
            Some(Outcome::Success) => StopStatus::Succeeded,
            Some(Outcome::Skip) => StopStatus::Skipped,
            Some(Outcome::Fail) if self.skipped => StopStatus::Skipped,
            Some(Outcome::Fail) => StopStatus::Failed,
        }
    }

    /// Shallow-merges a report over this waypoint.
    ///
    /// Fields present in the report win; fields the report leaves out survive.
    pub fn overlay(mut self, report: &WaypointReport) -> Self {
        self.chain_id = report.chain_id.clone();
        overlay_field(&mut self.message_hash, &report.message_hash);
        overlay_field(&mut self.block_number, &report.block_number);
        overlay_field(&mut self.block_position, &report.block_position);
        overlay_field(&mut self.outcome, &report.outcome);
        overlay_field(&mut self.error, &report.error);
        overlay_field(&mut self.event, &report.event);
        overlay_field(&mut self.instructions, &report.instructions);
        overlay_field(&mut self.assets_trapped, &report.assets_trapped);
        if let Some(skipped) = report.skipped {
            self.skipped = skipped;
        }
        if let Some(timeout) = report.timeout {
            self.timeout = timeout;
        }
        self
    }
}

fn overlay_field<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}

/// What one update message reports about a waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointReport {
    pub chain_id: ChainId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<BlockNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_position: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<InstructionPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_trapped: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<bool>,
}

impl WaypointReport {
    /// Creates a report that carries only a chain identifier.
    pub fn new(chain_id: impl Into<ChainId>) -> Self {
        WaypointReport {
            chain_id: chain_id.into(),
            message_hash: None,
            block_number: None,
            block_position: None,
            outcome: None,
            error: None,
            event: None,
            instructions: None,
            assets_trapped: None,
            skipped: None,
            timeout: None,
        }
    }

    /// Converts the report into a stored waypoint, replacing whatever was there.
    pub fn to_waypoint(&self) -> Waypoint {
        Waypoint::bare(self.chain_id.clone()).overlay(self)
    }
}
