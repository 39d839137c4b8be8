//! Sequential routing of update messages to journey stores.
//!
//! The tracker is the only stateful piece of the pipeline. It derives each
//! message's identity, finds the journey in whichever store holds it, runs the
//! merge and writes the result back to the same store.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{BoundedJourneyCache, JourneyStore, PinnedJourneys};
use crate::config::{ConfigError, TrackerConfig};
use crate::feed::UpdateMessage;
use crate::reconcile::{MergeOutcome, journey_id, merge_update};
use crate::types::{Journey, JourneyId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("journey {0} is not in the cache")]
    NotFound(JourneyId),

    #[error("journey {0} is already pinned")]
    AlreadyPinned(JourneyId),

    #[error("journey {0} is not pinned")]
    NotPinned(JourneyId),
}

/// The result of applying one update message.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub id: JourneyId,
    pub outcome: MergeOutcome,

    /// A journey pushed out of the cache to make room, if any.
    pub evicted: Option<Journey>,
}

/// Owns the journey cache and the pinned set.
#[derive(Debug, Clone)]
pub struct JourneyTracker {
    cache: BoundedJourneyCache,
    pinned: PinnedJourneys,
}

impl JourneyTracker {
    pub fn new(config: &TrackerConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_capacity(config.validate()?))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        JourneyTracker {
            cache: BoundedJourneyCache::new(capacity),
            pinned: PinnedJourneys::new(),
        }
    }

    /// Merges one update message into its journey.
    ///
    /// A pinned journey is updated in place in the pinned set. Otherwise the
    /// cached journey (or a new one) is merged and put back into the cache, which
    /// may evict the oldest cached journey.
    pub fn apply(&mut self, message: &UpdateMessage, now: DateTime<Utc>) -> Applied {
        let id = journey_id(message);

        if let Some(journey) = self.pinned.delete(&id) {
            let result = merge_update(message, Some(journey), now);
            log_outcome(&id, &result.outcome);
            self.pinned.put(id.clone(), result.journey);
            return Applied {
                id,
                outcome: result.outcome,
                evicted: None,
            };
        }

        let (outcome, evicted) = self.cache.upsert_with(id.clone(), |existing| {
            let result = merge_update(message, existing, now);
            (result.journey, result.outcome)
        });
        log_outcome(&id, &outcome);

        if let Some((evicted_id, _)) = &evicted {
            debug!(journey_id = %evicted_id, "Evicted oldest journey from cache");
        }

        Applied {
            id,
            outcome,
            evicted: evicted.map(|(_, journey)| journey),
        }
    }

    /// Moves a cached journey into the pinned set.
    pub fn pin(&mut self, id: &JourneyId) -> Result<(), TrackerError> {
        if self.pinned.contains(id) {
            return Err(TrackerError::AlreadyPinned(id.clone()));
        }

        let journey = self
            .cache
            .delete(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        self.pinned.put(id.clone(), journey);

        debug!(journey_id = %id, "Pinned journey");
        Ok(())
    }

    /// Moves a pinned journey back into the cache.
    ///
    /// The journey re-enters the cache as its newest entry, so this can evict
    /// the oldest cached journey, which is returned.
    pub fn unpin(&mut self, id: &JourneyId) -> Result<Option<Journey>, TrackerError> {
        let journey = self
            .pinned
            .delete(id)
            .ok_or_else(|| TrackerError::NotPinned(id.clone()))?;

        let evicted = self.cache.put(id.clone(), journey);
        debug!(journey_id = %id, "Unpinned journey");
        if let Some((evicted_id, _)) = &evicted {
            debug!(journey_id = %evicted_id, "Evicted oldest journey from cache");
        }

        Ok(evicted.map(|(_, journey)| journey))
    }

    /// Drops every journey, pinned or not.
    pub fn reset(&mut self) {
        info!(
            cached = self.cache.size(),
            pinned = self.pinned.size(),
            "Resetting journey tracker"
        );
        self.cache.clear();
        self.pinned.clear();
    }

    pub fn get(&self, id: &JourneyId) -> Option<&Journey> {
        self.pinned.get(id).or_else(|| self.cache.get(id))
    }

    pub fn is_pinned(&self, id: &JourneyId) -> bool {
        self.pinned.contains(id)
    }

    pub fn pinned(&self) -> impl Iterator<Item = &Journey> {
        self.pinned.entries().map(|(_, journey)| journey)
    }

    /// Cached journeys in first-insertion order.
    pub fn journeys(&self) -> impl Iterator<Item = &Journey> {
        self.cache.entries().map(|(_, journey)| journey)
    }

    /// Every journey: pinned ones first (ordered by id), then cached ones in
    /// insertion order.
    pub fn snapshot(&self) -> Vec<&Journey> {
        let mut pinned: Vec<&Journey> = self.pinned().collect();
        pinned.sort_by(|a, b| a.id.cmp(&b.id));
        pinned.extend(self.journeys());
        pinned
    }
}

fn log_outcome(id: &JourneyId, outcome: &MergeOutcome) {
    match outcome {
        MergeOutcome::Unresolvable(warning) => {
            warn!(journey_id = %id, warning = %warning, "Update addressed an unknown stop");
        }
        MergeOutcome::Created => {
            debug!(journey_id = %id, "Created journey");
        }
        other => {
            debug!(journey_id = %id, outcome = ?other, "Merged update");
        }
    }
}
