//! Shared test fixtures and arbitrary generators for property-based testing.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use proptest::sample::Index;

use crate::feed::{LegSpec, MessageWaypoint, UpdateKind, UpdateMessage};
use crate::reconcile::build_journey;
use crate::types::{BlockNumber, ChainId, Journey, LegKind, Outcome, WaypointReport};

/// A fixed instant offset by `secs` seconds, so tests never depend on the clock.
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

/// `sent` message for the journey A -> B -> C, reporting a successful origin.
///
/// Identity falls back to `A:100|0xhash`.
pub fn sent_message() -> UpdateMessage {
    let mut origin = WaypointReport::new("A");
    origin.block_number = Some(BlockNumber::Number(100));

    let mut waypoint = WaypointReport::new("A");
    waypoint.message_hash = Some("0xhash".to_string());
    waypoint.outcome = Some(Outcome::Success);

    UpdateMessage {
        kind: UpdateKind::Sent,
        origin,
        destination: WaypointReport::new("C"),
        legs: vec![
            LegSpec::new("A", "B", LegKind::Hrmp),
            LegSpec::new("B", "C", LegKind::Hrmp),
        ],
        waypoint: MessageWaypoint {
            leg_index: 0,
            report: waypoint,
        },
        sender: None,
        message_id: None,
        forward_id: None,
    }
}

/// A message for the same journey as [`sent_message`], reporting on `chain` in
/// leg `leg_index`.
pub fn report_on(leg_index: usize, chain: &str, outcome: Option<Outcome>) -> UpdateMessage {
    let mut report = WaypointReport::new(chain);
    report.message_hash = Some("0xhash".to_string());
    report.outcome = outcome;

    UpdateMessage {
        kind: UpdateKind::Hop,
        waypoint: MessageWaypoint { leg_index, report },
        ..sent_message()
    }
}

/// `sent` message for a single leg A -> B relayed through R.
pub fn relayed_leg_message() -> UpdateMessage {
    UpdateMessage {
        destination: WaypointReport::new("B"),
        legs: vec![LegSpec::new("A", "B", LegKind::Hrmp).via("R")],
        ..sent_message()
    }
}

/// Journey A -> B -> C with every stop pending.
pub fn two_leg_journey() -> Journey {
    let mut message = sent_message();
    message.waypoint.report.outcome = None;
    build_journey(&message, at(0))
}

/// Journey A -> B -> C -> D with every stop pending.
pub fn three_leg_journey() -> Journey {
    let mut message = sent_message();
    message.waypoint.report.outcome = None;
    message.destination = WaypointReport::new("D");
    message.legs.push(LegSpec::new("C", "D", LegKind::Bridge));
    build_journey(&message, at(0))
}

/// An update message with only a correlation id, used to key store tests.
pub fn message_for(id: &str) -> UpdateMessage {
    UpdateMessage {
        message_id: Some(id.to_string()),
        ..sent_message()
    }
}

/// A pending journey keyed by `id`.
pub fn journey_for(id: &str) -> Journey {
    build_journey(&message_for(id), at(0))
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

pub fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![Just(Outcome::Success), Just(Outcome::Fail), Just(Outcome::Skip)]
}

pub fn arb_leg_kind() -> impl Strategy<Value = LegKind> {
    prop_oneof![
        Just(LegKind::Hrmp),
        Just(LegKind::Vmp),
        Just(LegKind::Hop),
        Just(LegKind::Bridge),
    ]
}

pub fn arb_update_kind() -> impl Strategy<Value = UpdateKind> {
    prop_oneof![
        4 => Just(UpdateKind::Sent),
        4 => Just(UpdateKind::Hop),
        4 => Just(UpdateKind::Relayed),
        2 => Just(UpdateKind::Received),
        1 => Just(UpdateKind::Timeout),
    ]
}

/// A linear path `c0 -> c1 -> ... -> cn`, each leg optionally relayed.
pub fn arb_legs() -> impl Strategy<Value = Vec<LegSpec>> {
    prop::collection::vec((any::<bool>(), arb_leg_kind()), 1..5).prop_map(|hops| {
        hops.into_iter()
            .enumerate()
            .map(|(i, (relayed, kind))| {
                let spec = LegSpec::new(format!("c{}", i), format!("c{}", i + 1), kind);
                if relayed { spec.via("relay") } else { spec }
            })
            .collect()
    })
}

/// The chains a leg stops at, in path order.
fn leg_chains(spec: &LegSpec) -> Vec<ChainId> {
    let mut chains = vec![spec.from.clone()];
    chains.extend(spec.relay.clone());
    chains.push(spec.to.clone());
    chains
}

/// Resolves random picks into a `(leg, stop)` position on `legs`.
fn pick(legs: &[LegSpec], leg: Index, stop: Index) -> (usize, usize) {
    let leg_index = leg.index(legs.len());
    let stop_index = stop.index(leg_chains(&legs[leg_index]).len());
    (leg_index, stop_index)
}

/// A message on `legs`, addressing stop `stop_index` of leg `leg_index`.
fn message_on(
    legs: &[LegSpec],
    (leg_index, stop_index): (usize, usize),
    outcome: Option<Outcome>,
    kind: UpdateKind,
) -> UpdateMessage {
    let chain = leg_chains(&legs[leg_index])[stop_index].clone();

    let mut origin = WaypointReport::new(legs[0].from.clone());
    origin.block_number = Some(BlockNumber::Number(1));

    let mut report = WaypointReport::new(chain);
    report.message_hash = Some("0xfixed".to_string());
    report.outcome = outcome;

    UpdateMessage {
        kind,
        origin,
        destination: WaypointReport::new(legs[legs.len() - 1].to.clone()),
        legs: legs.to_vec(),
        waypoint: MessageWaypoint { leg_index, report },
        sender: None,
        message_id: None,
        forward_id: None,
    }
}

pub fn arb_update_message() -> impl Strategy<Value = UpdateMessage> {
    (
        arb_legs(),
        any::<Index>(),
        any::<Index>(),
        prop::option::of(arb_outcome()),
        arb_update_kind(),
        prop::option::of("0x[0-9a-f]{8}"),
        prop::option::of("0x[0-9a-f]{8}"),
        0u64..1_000_000,
        "0x[0-9a-f]{16}",
    )
        .prop_map(
            |(legs, leg, stop, outcome, kind, message_id, forward_id, block, hash)| {
                let mut message = message_on(&legs, pick(&legs, leg, stop), outcome, kind);
                message.origin.block_number = Some(BlockNumber::Number(block));
                message.waypoint.report.message_hash = Some(hash);
                message.message_id = message_id;
                message.forward_id = forward_id;
                message
            },
        )
}

/// A sequence of messages that all belong to one journey with a fixed path.
pub fn arb_message_sequence() -> impl Strategy<Value = Vec<UpdateMessage>> {
    arb_legs().prop_flat_map(|legs| {
        prop::collection::vec(
            (
                any::<Index>(),
                any::<Index>(),
                prop::option::of(arb_outcome()),
                arb_update_kind(),
            ),
            1..12,
        )
        .prop_map(move |picks| {
            picks
                .into_iter()
                .map(|(leg, stop, outcome, kind)| {
                    message_on(&legs, pick(&legs, leg, stop), outcome, kind)
                })
                .collect()
        })
    })
}

/// A journey with a random path and random stop outcomes.
pub fn arb_journey() -> impl Strategy<Value = Journey> {
    (arb_legs(), prop::collection::vec(prop::option::of(arb_outcome()), 16)).prop_map(
        |(legs, outcomes)| {
            let mut journey =
                build_journey(&message_on(&legs, (0, 0), None, UpdateKind::Sent), at(0));
            let stops = journey.legs.iter_mut().flat_map(|l| l.stops.iter_mut());
            for (stop, outcome) in stops.zip(outcomes) {
                // Only successes and skips; failures are placed explicitly.
                stop.outcome = outcome.filter(|o| *o != Outcome::Fail);
            }
            journey
        },
    )
}

/// A journey with at least one failed stop, before any propagation.
pub fn arb_journey_with_failure() -> impl Strategy<Value = Journey> {
    (arb_journey(), any::<Index>(), any::<Index>()).prop_map(|(mut journey, leg, stop)| {
        let leg = leg.index(journey.legs.len());
        let stops = &mut journey.legs[leg].stops;
        let stop = stop.index(stops.len());
        stops[stop].outcome = Some(Outcome::Fail);
        journey
    })
}
