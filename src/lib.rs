//! XCM Journeys - reconciles cross-chain message updates into journeys.
//!
//! A journey is one cross-consensus message followed from its origin chain,
//! through any relay or bridge hops, to its destination. The feed reports each
//! hop separately and may drop, reorder or duplicate reports; this library folds
//! them back into one aggregate per journey.
//!
//! - [`feed`]: wire model and parsing of update messages
//! - [`reconcile`]: pure identity, build, merge, failure and timeout logic
//! - [`store`]: the bounded journey cache, the pinned set and the tracker
//! - [`replay`]: applying a line-delimited feed to a tracker
//! - [`config`]: tracker configuration

pub mod config;
pub mod feed;
pub mod reconcile;
pub mod replay;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_utils;
