//! Tracker configuration.
//!
//! # Knobs
//!
//! - **Cache capacity**: how many unpinned journeys are kept before the oldest is
//!   evicted. 50 by default (configurable via `XCM_JOURNEYS_CACHE_CAPACITY`).
//!
//! Pinned journeys do not count against the capacity.

use std::num::NonZeroUsize;

use thiserror::Error;

/// Environment variable overriding [`TrackerConfig::cache_capacity`].
pub const CACHE_CAPACITY_VAR: &str = "XCM_JOURNEYS_CACHE_CAPACITY";

/// Default number of unpinned journeys kept in memory.
const DEFAULT_CACHE_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,
}

/// Configuration for a [`JourneyTracker`](crate::store::JourneyTracker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Maximum number of unpinned journeys.
    ///
    /// Default: 50. Configure via `XCM_JOURNEYS_CACHE_CAPACITY`.
    pub cache_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerConfig {
    /// Creates a `TrackerConfig` with default values.
    pub fn new() -> Self {
        TrackerConfig {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Creates a `TrackerConfig` from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults. A value of zero is
    /// kept so that [`validate`](Self::validate) can report it.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let cache_capacity = lookup(CACHE_CAPACITY_VAR)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_CACHE_CAPACITY);

        TrackerConfig { cache_capacity }
    }

    /// Checks the configuration, returning the capacity as a non-zero value.
    pub fn validate(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.cache_capacity).ok_or(ConfigError::ZeroCapacity)
    }
}
