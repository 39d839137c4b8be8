//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different string identifiers (e.g., using
//! a chain identifier where a journey identity is expected) and make the code more
//! self-documenting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stable identity correlating every update message of one journey.
///
/// Derived by [`crate::reconcile::journey_id`] from a forward identifier, a topic
/// identifier, or the origin block and message hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JourneyId(pub String);

impl JourneyId {
    pub fn new(s: impl Into<String>) -> Self {
        JourneyId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JourneyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JourneyId {
    fn from(s: String) -> Self {
        JourneyId(s)
    }
}

impl From<&str> for JourneyId {
    fn from(s: &str) -> Self {
        JourneyId(s.to_string())
    }
}

/// A network identifier as sent by the feed (e.g., `urn:ocn:polkadot:1000`).
///
/// Treated as opaque: two waypoints are on the same chain iff their identifiers
/// are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub String);

impl ChainId {
    pub fn new(s: impl Into<String>) -> Self {
        ChainId(s.into())
    }

    /// Returns the chain identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChainId {
    fn from(s: String) -> Self {
        ChainId(s)
    }
}

impl From<&str> for ChainId {
    fn from(s: &str) -> Self {
        ChainId(s.to_string())
    }
}

/// A block number, kept verbatim.
///
/// The feed reports block numbers as JSON numbers on some message variants and as
/// decimal strings on others. Both spellings survive a serde round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockNumber {
    Number(u64),
    Text(String),
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockNumber::Number(n) => write!(f, "{}", n),
            BlockNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for BlockNumber {
    fn from(n: u64) -> Self {
        BlockNumber::Number(n)
    }
}

impl From<&str> for BlockNumber {
    fn from(s: &str) -> Self {
        BlockNumber::Text(s.to_string())
    }
}
