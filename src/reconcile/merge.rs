//! Incremental merge of update messages into a journey.
//!
//! The feed may drop, reorder or duplicate messages. Merging is therefore keyed by
//! `(leg index, chain)` rather than arrival order, and a stop that already has an
//! outcome is never overwritten.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::feed::UpdateMessage;
use crate::types::{ChainId, Journey};

use super::builder::build_journey;
use super::cascade::propagate_failure;
use super::timeout::apply_timeout;

/// An update message addressed a stop the journey does not have.
///
/// The builder lays out every stop from the first message's path metadata, so this
/// means the feed announced a different path later on. The merge is a no-op for the
/// stop; the journey's `updated` timestamp still advances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationWarning {
    /// The leg index is outside the journey's path.
    #[error("leg {leg_index} not found (journey has {leg_count} legs)")]
    MissingLeg { leg_index: usize, leg_count: usize },

    /// The leg exists but has no stop on the reported chain.
    #[error("no stop for chain {chain_id} in leg {leg_index}")]
    MissingStop { leg_index: usize, chain_id: ChainId },
}

/// What merging one update message did to the journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The journey did not exist yet and was built from this message.
    Created,

    /// The addressed stop was resolved by this message.
    Merged,

    /// The message was a timeout signal.
    TimedOut,

    /// The addressed stop already had an outcome; the message was stale or a
    /// duplicate.
    AlreadyResolved,

    /// The message carried no outcome for the addressed stop.
    NoOutcome,

    /// The message addressed a stop the journey does not have.
    Unresolvable(ReconciliationWarning),
}

impl MergeOutcome {
    /// Returns true if the addressed stop was left as it was.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            MergeOutcome::AlreadyResolved | MergeOutcome::NoOutcome | MergeOutcome::Unresolvable(_)
        )
    }

    pub fn warning(&self) -> Option<&ReconciliationWarning> {
        match self {
            MergeOutcome::Unresolvable(w) => Some(w),
            _ => None,
        }
    }
}

/// The merged journey together with what the merge did.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub journey: Journey,
    pub outcome: MergeOutcome,
}

/// Applies one update message to a journey, building the journey first if needed.
///
/// Steps, in order:
/// 1. a timeout message is handed to [`apply_timeout`] and nothing else happens
/// 2. a report on the origin chain replaces `origin` wholesale
/// 3. a resolved report on the destination chain replaces `destination` wholesale
/// 4. `updated` is bumped
/// 5. the addressed stop is shallow-merged with the report, but only if the stop
///    is unresolved and the report carries an outcome
/// 6. failures are propagated downstream
///
/// Once a stop has an outcome, replaying the same message changes nothing beyond
/// the `updated` timestamp.
pub fn merge_update(
    message: &UpdateMessage,
    journey: Option<Journey>,
    now: DateTime<Utc>,
) -> MergeResult {
    let (journey, fresh) = match journey {
        Some(j) => (j, false),
        None => (build_journey(message, now), true),
    };

    if message.kind.is_timeout() {
        return MergeResult {
            journey: apply_timeout(journey),
            outcome: MergeOutcome::TimedOut,
        };
    }

    let mut journey = journey;
    let report = &message.waypoint.report;

    if journey.origin.chain_id == report.chain_id {
        journey.origin = report.to_waypoint();
    }

    if journey.destination.chain_id == report.chain_id && report.outcome.is_some() {
        journey.destination = report.to_waypoint();
    }

    journey.updated = now.max(journey.created);

    let outcome = merge_stop(&mut journey, message);
    let outcome = match outcome {
        MergeOutcome::AlreadyResolved | MergeOutcome::NoOutcome if fresh => MergeOutcome::Created,
        other => other,
    };

    MergeResult {
        journey: propagate_failure(journey),
        outcome,
    }
}

fn merge_stop(journey: &mut Journey, message: &UpdateMessage) -> MergeOutcome {
    let leg_index = message.waypoint.leg_index;
    let report = &message.waypoint.report;
    let leg_count = journey.legs.len();

    let Some(leg) = journey.legs.get_mut(leg_index) else {
        return MergeOutcome::Unresolvable(ReconciliationWarning::MissingLeg {
            leg_index,
            leg_count,
        });
    };

    let Some(position) = leg.position_of(&report.chain_id) else {
        return MergeOutcome::Unresolvable(ReconciliationWarning::MissingStop {
            leg_index,
            chain_id: report.chain_id.clone(),
        });
    };

    let stop = &mut leg.stops[position];
    if stop.is_resolved() {
        return MergeOutcome::AlreadyResolved;
    }
    if report.outcome.is_none() {
        return MergeOutcome::NoOutcome;
    }

    *stop = stop.clone().overlay(report);
    MergeOutcome::Merged
}
