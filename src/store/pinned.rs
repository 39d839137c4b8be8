//! Unbounded store for pinned journeys.

use std::collections::HashMap;

use super::JourneyStore;
use crate::types::{Journey, JourneyId};

/// Journeys kept regardless of cache pressure. Never evicts.
#[derive(Debug, Clone, Default)]
pub struct PinnedJourneys {
    entries: HashMap<JourneyId, Journey>,
}

impl PinnedJourneys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JourneyStore for PinnedJourneys {
    fn put(&mut self, id: JourneyId, journey: Journey) -> Option<(JourneyId, Journey)> {
        self.entries.insert(id, journey);
        None
    }

    fn get(&self, id: &JourneyId) -> Option<&Journey> {
        self.entries.get(id)
    }

    fn delete(&mut self, id: &JourneyId) -> Option<Journey> {
        self.entries.remove(id)
    }

    /// Entries in no particular order.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::journey_for;

    #[test]
    fn never_evicts() {
        let mut pinned = PinnedJourneys::new();
        for i in 0..200 {
            let id = format!("j{}", i);
            assert!(pinned.put(JourneyId::from(id.as_str()), journey_for(&id)).is_none());
        }
        assert_eq!(pinned.size(), 200);
    }

    #[test]
    fn put_get_delete() {
        let mut pinned = PinnedJourneys::new();
        let id = JourneyId::from("j1");
        pinned.put(id.clone(), journey_for("j1"));

        assert_eq!(pinned.get(&id).map(|j| &j.id), Some(&id));
        assert_eq!(pinned.entries().count(), 1);
        assert!(pinned.delete(&id).is_some());
        assert!(pinned.get(&id).is_none());
        assert!(pinned.delete(&id).is_none());
    }
}
