//! Timeout handling.

use crate::types::Journey;

/// Marks the destination and every still-pending stop as timed out.
///
/// Timeout is advisory: outcomes stay absent on pending stops and resolved stops
/// are left untouched.
pub fn apply_timeout(mut journey: Journey) -> Journey {
    journey.destination.timeout = true;

    for stop in journey.legs.iter_mut().flat_map(|l| l.stops.iter_mut()) {
        if !stop.is_resolved() {
            stop.timeout = true;
        }
    }

    journey
}
