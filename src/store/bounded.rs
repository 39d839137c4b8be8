//! Fixed-capacity journey cache with first-in, first-out eviction.

use std::num::NonZeroUsize;

use indexmap::IndexMap;

use super::JourneyStore;
use crate::types::{Journey, JourneyId};

/// Journey cache holding at most `capacity` entries.
///
/// Entries keep the position of their first insertion; overwriting a key does not
/// refresh it. When an insert of a new key overflows the capacity, the
/// oldest-inserted entry is evicted.
#[derive(Debug, Clone)]
pub struct BoundedJourneyCache {
    capacity: NonZeroUsize,
    entries: IndexMap<JourneyId, Journey>,
}

impl BoundedJourneyCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        BoundedJourneyCache {
            capacity,
            entries: IndexMap::with_capacity(capacity.get()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Hands the journey under `id` (or `None`) to `f` by value and stores the
    /// journey it returns.
    ///
    /// An existing journey is written back into its original slot. A new one is
    /// inserted as the newest entry, which may evict the oldest.
    pub fn upsert_with<R>(
        &mut self,
        id: JourneyId,
        f: impl FnOnce(Option<Journey>) -> (Journey, R),
    ) -> (R, Option<(JourneyId, Journey)>) {
        match self.entries.shift_remove_full(&id) {
            Some((index, key, journey)) => {
                let (journey, output) = f(Some(journey));
                self.entries.shift_insert(index, key, journey);
                (output, None)
            }
            None => {
                let (journey, output) = f(None);
                let evicted = self.put(id, journey);
                (output, evicted)
            }
        }
    }
}

impl JourneyStore for BoundedJourneyCache {
    fn put(&mut self, id: JourneyId, journey: Journey) -> Option<(JourneyId, Journey)> {
        // IndexMap::insert keeps the slot of an existing key.
        self.entries.insert(id, journey);

        if self.entries.len() > self.capacity.get() {
            self.entries.shift_remove_index(0)
        } else {
            None
        }
    }

    fn get(&self, id: &JourneyId) -> Option<&Journey> {
        self.entries.get(id)
    }

    fn delete(&mut self, id: &JourneyId) -> Option<Journey> {
        self.entries.shift_remove(id)
    }

    /// Entries in first-insertion order.
    fn entries(&self) -> impl Iterator<Item = (&JourneyId, &Journey)> {
        self.entries.iter()
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
