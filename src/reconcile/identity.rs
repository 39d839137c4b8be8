//! Journey identity derivation.
//!
//! Every update message of one journey must map to the same key, even though the
//! feed only attaches protocol correlation identifiers to some message variants.

use crate::feed::UpdateMessage;
use crate::types::JourneyId;

/// Derives the journey identity of an update message.
///
/// Priority order:
/// 1. the forward identifier (bridged journeys)
/// 2. the message (topic) identifier
/// 3. `{origin chain}:{origin block}|{message hash}`
///
/// A block number or message hash missing from the fallback form renders as an
/// empty segment, so the key stays deterministic.
pub fn journey_id(message: &UpdateMessage) -> JourneyId {
    if let Some(forward_id) = &message.forward_id {
        return JourneyId::new(forward_id.as_str());
    }

    if let Some(message_id) = &message.message_id {
        return JourneyId::new(message_id.as_str());
    }

    let block = message
        .origin
        .block_number
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let hash = message
        .waypoint
        .report
        .message_hash
        .as_deref()
        .unwrap_or_default();

    JourneyId(format!("{}:{}|{}", message.origin.chain_id, block, hash))
}
