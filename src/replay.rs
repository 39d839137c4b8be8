//! Line-by-line replay of an NDJSON update feed.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::feed::{ParseError, parse_update};
use crate::store::{Applied, JourneyTracker};

/// What replaying one feed line did.
#[derive(Debug)]
pub enum Replayed {
    /// The line was empty or whitespace.
    Blank,

    Applied(Applied),

    /// The line could not be parsed and was skipped.
    Skipped(ParseError),
}

/// Parses one feed line and applies it to the tracker.
///
/// A line that fails to parse is logged and skipped; the tracker is left as it
/// was.
pub fn replay_line(
    tracker: &mut JourneyTracker,
    line_number: usize,
    line: &str,
    now: DateTime<Utc>,
) -> Replayed {
    if line.trim().is_empty() {
        return Replayed::Blank;
    }

    match parse_update(line.as_bytes()) {
        Ok(message) => Replayed::Applied(tracker.apply(&message, now)),
        Err(e) => {
            warn!(line = line_number, error = %e, "Skipping unparseable update");
            Replayed::Skipped(e)
        }
    }
}
