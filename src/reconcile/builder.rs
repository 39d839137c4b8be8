//! Initial journey construction.
//!
//! The first update message seen for an identity carries the whole path, so the
//! builder lays out every leg and stop up front. Later messages only ever fill in
//! stops that already exist.

use chrono::{DateTime, Utc};

use crate::feed::{LegSpec, UpdateMessage};
use crate::types::{Journey, Leg, Outcome, Waypoint};

use super::cascade::propagate_failure;
use super::identity::journey_id;

/// Builds a journey from the first update message observed for its identity.
///
/// - leg 0 starts at the full origin waypoint; other legs start at a bare
///   waypoint for their `from` chain
/// - a relay hop adds a bare relay waypoint
/// - every leg ends at a bare waypoint for its `to` chain
/// - the reported waypoint replaces the matching stop of the leg it addresses
///
/// A `received` message means routing already finished, so every stop the feed
/// never reported is taken as bypassed (`Skip` + `skipped`) rather than pending.
/// That decision depends on the message alone.
///
/// The result is passed through [`propagate_failure`], since the seeded waypoint
/// may already be a failure.
pub fn build_journey(message: &UpdateMessage, now: DateTime<Utc>) -> Journey {
    let legs = message
        .legs
        .iter()
        .enumerate()
        .map(|(index, spec)| build_leg(message, index, spec))
        .collect();

    let mut journey = Journey {
        id: journey_id(message),
        sender: message.sender.clone(),
        created: now,
        updated: now,
        instructions: message.waypoint.report.instructions.clone(),
        origin: message.origin.to_waypoint(),
        destination: message.destination.to_waypoint(),
        legs,
        topic_id: message.message_id.clone(),
        forward_id: message.forward_id.clone(),
    };

    if message.kind.is_received() {
        skip_unreported_stops(&mut journey);
    }

    propagate_failure(journey)
}

fn build_leg(message: &UpdateMessage, index: usize, spec: &LegSpec) -> Leg {
    let mut stops = Vec::with_capacity(3);

    if index == 0 {
        stops.push(message.origin.to_waypoint());
    } else {
        stops.push(Waypoint::bare(spec.from.clone()));
    }

    if let Some(relay) = &spec.relay {
        stops.push(Waypoint::bare(relay.clone()));
    }

    stops.push(Waypoint::bare(spec.to.clone()));

    if message.waypoint.leg_index == index {
        let reported = message.waypoint.chain_id();
        for stop in stops.iter_mut().filter(|s| &s.chain_id == reported) {
            *stop = message.waypoint.report.to_waypoint();
        }
    }

    Leg {
        stops,
        index,
        kind: spec.kind.clone(),
    }
}

fn skip_unreported_stops(journey: &mut Journey) {
    for stop in journey.legs.iter_mut().flat_map(|l| l.stops.iter_mut()) {
        if !stop.is_resolved() {
            stop.outcome = Some(Outcome::Skip);
            stop.skipped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::UpdateKind;
    use crate::test_utils::{at, relayed_leg_message, sent_message};
    use crate::types::{ChainId, InstructionPayload, StopStatus};
    use serde_json::json;

    #[test]
    fn lays_out_stops_per_leg() {
        let journey = build_journey(&sent_message(), at(0));

        assert_eq!(journey.legs.len(), 2);
        let chains: Vec<Vec<&str>> = journey
            .legs
            .iter()
            .map(|l| l.stops.iter().map(|s| s.chain_id.as_str()).collect())
            .collect();
        assert_eq!(chains, vec![vec!["A", "B"], vec!["B", "C"]]);
        assert_eq!(journey.legs[1].index, 1);
    }

    #[test]
    fn first_stop_of_first_leg_is_origin() {
        let journey = build_journey(&sent_message(), at(0));

        assert_eq!(journey.origin.chain_id, ChainId::from("A"));
        assert_eq!(journey.legs[0].stops[0].chain_id, journey.origin.chain_id);
        let last_leg = journey.legs.last().unwrap();
        assert_eq!(
            last_leg.stops.last().unwrap().chain_id,
            journey.destination.chain_id
        );
    }

    #[test]
    fn relay_stop_sits_between_endpoints() {
        let journey = build_journey(&relayed_leg_message(), at(0));

        let chains: Vec<&str> = journey.legs[0]
            .stops
            .iter()
            .map(|s| s.chain_id.as_str())
            .collect();
        assert_eq!(chains, vec!["A", "R", "B"]);
    }

    #[test]
    fn reported_waypoint_is_seeded() {
        let mut message = relayed_leg_message();
        message.waypoint.report.chain_id = ChainId::from("R");
        message.waypoint.report.outcome = Some(Outcome::Success);
        message.waypoint.report.event = Some(json!({ "eventId": "9-1" }));

        let journey = build_journey(&message, at(0));

        let relay = journey.stop(0, &ChainId::from("R")).unwrap();
        assert_eq!(relay.outcome, Some(Outcome::Success));
        assert_eq!(relay.event, Some(json!({ "eventId": "9-1" })));
    }

    #[test]
    fn timestamps_and_correlation_ids_are_captured() {
        let mut message = sent_message();
        message.message_id = Some("0xtopic".to_string());
        message.forward_id = Some("0xfwd".to_string());
        let instructions = InstructionPayload::new(json!({ "type": "V3", "value": [] }));
        message.waypoint.report.instructions = Some(instructions);

        let journey = build_journey(&message, at(42));

        assert_eq!(journey.created, at(42));
        assert_eq!(journey.updated, at(42));
        assert_eq!(journey.topic_id.as_deref(), Some("0xtopic"));
        assert_eq!(journey.forward_id.as_deref(), Some("0xfwd"));
        assert_eq!(journey.id.as_str(), "0xfwd");
        assert!(journey.instructions.is_some());
    }

    #[test]
    fn received_message_skips_unreported_stops() {
        let mut message = sent_message();
        message.kind = UpdateKind::Received;
        message.waypoint.leg_index = 1;
        message.waypoint.report.chain_id = ChainId::from("C");
        message.waypoint.report.outcome = Some(Outcome::Success);

        let journey = build_journey(&message, at(0));

        let c = journey.stop(1, &ChainId::from("C")).unwrap();
        assert_eq!(c.status(), StopStatus::Succeeded);
        let b = journey.stop(0, &ChainId::from("B")).unwrap();
        assert_eq!(b.outcome, Some(Outcome::Skip));
        assert!(b.skipped);
        assert!(journey.stops().all(|s| s.is_resolved()));
    }

    #[test]
    fn sent_message_leaves_unreported_stops_pending() {
        let journey = build_journey(&sent_message(), at(0));

        let b = journey.stop(0, &ChainId::from("B")).unwrap();
        assert_eq!(b.status(), StopStatus::Pending);
    }

    #[test]
    fn seeded_failure_is_propagated() {
        let mut message = sent_message();
        message.waypoint.report.outcome = Some(Outcome::Fail);

        let journey = build_journey(&message, at(0));

        assert_eq!(journey.destination.outcome, Some(Outcome::Fail));
        assert!(journey.destination.skipped);
        let c = journey.stop(1, &ChainId::from("C")).unwrap();
        assert_eq!(c.status(), StopStatus::Skipped);
    }
}
