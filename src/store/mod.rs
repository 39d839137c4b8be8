//! In-memory journey storage.
//!
//! Two stores share one surface:
//!
//! - [`BoundedJourneyCache`]: the working set, capped at a fixed capacity and
//!   evicting the oldest-inserted journey on overflow
//! - [`PinnedJourneys`]: journeys a user asked to keep, never evicted
//!
//! [`JourneyTracker`] owns one of each and routes every update message to the
//! store that currently holds its journey.
//!
//! # Key Invariants
//!
//! 1. **Single owner**: a journey lives in at most one store at a time.
//!
//! 2. **Bounded working set**: the cache never holds more than its capacity;
//!    pinned journeys do not count against it.

pub mod bounded;
pub mod pinned;
pub mod tracker;

pub use bounded::BoundedJourneyCache;
pub use pinned::PinnedJourneys;
pub use tracker::{Applied, JourneyTracker, TrackerError};

use crate::types::{Journey, JourneyId};

/// Keyed storage for journeys.
pub trait JourneyStore {
    /// Inserts or overwrites a journey.
    ///
    /// Returns the entry pushed out to make room, if the store had to evict one.
    fn put(&mut self, id: JourneyId, journey: Journey) -> Option<(JourneyId, Journey)>;

    fn get(&self, id: &JourneyId) -> Option<&Journey>;

    /// Removes a journey, returning it if it was present.
    fn delete(&mut self, id: &JourneyId) -> Option<Journey>;

    /// All stored entries. Ordering is up to the implementation.
    fn entries(&self) -> impl Iterator<Item = (&JourneyId, &Journey)>;

    fn size(&self) -> usize;

    fn clear(&mut self);

    fn contains(&self, id: &JourneyId) -> bool {
        self.get(id).is_some()
    }
}
