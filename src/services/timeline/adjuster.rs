//! Normalizes a raw feed before layout.
//!
//! Zero-duration events (same start and end day) are widened into a 7-day
//! lead-in span so they render as a visible bar instead of a zero-width
//! block. All surviving dates are re-rendered as display strings.

use chrono::Duration;

use crate::models::event::{CalendarEvent, SkippedEvent};
use crate::services::date::DateParser;

/// Days of lead-in given to a zero-duration event.
pub const ZERO_DURATION_LEAD_DAYS: i64 = 7;

/// Result of normalizing a raw feed.
#[derive(Debug, Clone, Default)]
pub struct AdjustedEvents {
    /// Events with resolvable dates, input order preserved.
    pub events: Vec<CalendarEvent>,
    /// Events dropped because a date failed to parse.
    pub skipped: Vec<SkippedEvent>,
}

/// Adjusts every event in `events`, skipping (and reporting) entries whose
/// dates cannot be parsed so one bad record never aborts the rest.
pub fn adjust_events(parser: &DateParser, events: &[CalendarEvent]) -> AdjustedEvents {
    let mut adjusted = AdjustedEvents::default();

    for event in events {
        let start = match parser.parse(&event.start, Some(&event.end)) {
            Ok(date) => date,
            Err(err) => {
                log::warn!(
                    "Skipping event '{}': start date '{}' did not parse: {}",
                    event.activity,
                    event.start,
                    err
                );
                adjusted.skipped.push(SkippedEvent {
                    activity: event.activity.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let end = match parser.parse(&event.end, None) {
            Ok(date) => date,
            Err(err) => {
                log::warn!(
                    "Skipping event '{}': end date '{}' did not parse: {}",
                    event.activity,
                    event.end,
                    err
                );
                adjusted.skipped.push(SkippedEvent {
                    activity: event.activity.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let mut event = event.clone();
        if start == end {
            // Point-in-time event: widen backwards, keep the end string as-is.
            event.start = parser.format_display(end - Duration::days(ZERO_DURATION_LEAD_DAYS));
        } else {
            event.start = parser.format_display(start);
            event.end = parser.format_display(end);
        }
        adjusted.events.push(event);
    }

    adjusted
}
