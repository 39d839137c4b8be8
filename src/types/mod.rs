//! Core domain types for journey tracking.
//!
//! This module contains the passive data shapes the reconciler works on: waypoints,
//! legs and the journey aggregate, plus the identifier newtypes that key them.

pub mod ids;
pub mod instructions;
pub mod journey;
pub mod waypoint;

// Re-export commonly used types at the module level
pub use ids::{BlockNumber, ChainId, JourneyId};
pub use instructions::{InstructionPayload, XcmVersion};
pub use journey::{Journey, JourneyStatus, Leg, LegKind};
pub use waypoint::{Outcome, StopStatus, Waypoint, WaypointReport};
