// Feed version model
// One stored snapshot of the calendar feed with its change metadata

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::event::CalendarFeed;

/// A recorded revision of the calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineVersion {
    pub feed: CalendarFeed,
    pub recorded_at: DateTime<Local>,
    /// Number of events that differ from the previously stored feed.
    pub changes: usize,
    /// `auto-fetch` for the first load, `refresh` for explicit updates.
    pub source: String,
}
