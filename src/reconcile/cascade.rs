//! Failure propagation along a journey's path.
//!
//! A message that fails on one chain cannot have reached anything after it. Once a
//! failure is known, every downstream stop is foreclosed: forced to `Fail` and
//! marked `skipped` so it can be told apart from the stop that actually failed.

use crate::types::{Journey, Outcome};

/// Propagates the first failure on the path to the destination and downstream stops.
///
/// - No failed stop: the journey is returned unchanged.
/// - Failure in leg *k*: the destination outcome becomes `Fail`.
/// - If *k* is not the last leg, additionally: the destination is marked skipped,
///   every stop after the first failed stop in leg *k* is foreclosed, and every
///   stop of legs after *k* is foreclosed. Stops at or before the failure keep
///   their state.
pub fn propagate_failure(mut journey: Journey) -> Journey {
    let failure = journey
        .legs
        .iter()
        .enumerate()
        .find_map(|(leg, l)| l.first_failure().map(|stop| (leg, stop)));

    let Some((failed_leg, failed_stop)) = failure else {
        return journey;
    };

    journey.destination.outcome = Some(Outcome::Fail);

    if failed_leg + 1 < journey.legs.len() {
        journey.destination.skipped = true;

        for stop in journey.legs[failed_leg]
            .stops
            .iter_mut()
            .skip(failed_stop + 1)
        {
            stop.foreclose();
        }

        for leg in journey.legs.iter_mut().skip(failed_leg + 1) {
            for stop in &mut leg.stops {
                stop.foreclose();
            }
        }
    }

    journey
}
