//! Journey reconciliation engine.
//!
//! This module is the functional core: pure functions that turn a stream of
//! partial, out-of-order update messages into journey aggregates. Nothing here
//! performs I/O or logs; storage and routing live in [`crate::store`].
//!
//! # Pipeline
//!
//! - [`journey_id`] correlates a message with its journey
//! - [`build_journey`] lays out a new journey from its first message
//! - [`merge_update`] folds one message into a journey
//! - [`propagate_failure`] forecloses everything downstream of a failure
//! - [`apply_timeout`] marks pending stops as timed out
//!
//! # Key Invariants
//!
//! 1. **Settled stops are final**: a stop with an outcome is never overwritten by a
//!    later message, so duplicates and stale replays are harmless.
//!
//! 2. **Failure is terminal downstream**: after any merge, a failure in leg *k*
//!    leaves the destination failed and every stop in later legs foreclosed.
//!
//! 3. **Timeouts are advisory**: timing out never touches a resolved stop.

pub mod builder;
pub mod cascade;
pub mod identity;
pub mod merge;
pub mod timeout;


pub use builder::build_journey;
pub use cascade::propagate_failure;
pub use identity::journey_id;
pub use merge::{MergeOutcome, MergeResult, ReconciliationWarning, merge_update};
pub use timeout::apply_timeout;
