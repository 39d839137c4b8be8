//! Update messages from the subscription feed.
//!
//! The transport that delivers these messages lives outside this crate; this
//! module only defines the message shape and decodes raw payloads into it.

pub mod message;
pub mod parser;

pub use message::{LegSpec, MessageWaypoint, UpdateKind, UpdateMessage};
pub use parser::{ParseError, parse_update};
