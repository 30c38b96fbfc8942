//! Builds the immutable timeline snapshot: adjusted events, the visible date
//! range, day enumeration grouped by month, and lane assignments.

use chrono::{Duration, NaiveDate};

use crate::models::event::CalendarEvent;
use crate::models::timeline::{MonthGroup, TimelineLayout};
use crate::services::date::DateParser;
use crate::services::timeline::{adjuster, lanes};
use crate::utils::date::start_of_month;

/// Trailing buffer after the latest event so the final bar never sits flush
/// against the right edge of the visualization.
pub const TRAILING_BUFFER_DAYS: i64 = 27;

/// Computes the layout for `events` as of `today`.
///
/// `today` only matters for the degenerate empty snapshot; it is explicit so
/// the processor stays a pure function of its inputs. An empty feed (or one
/// where every event failed to parse) yields the degenerate layout, never an
/// error.
pub fn build_layout(
    parser: &DateParser,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> TimelineLayout {
    if events.is_empty() {
        return TimelineLayout::degenerate(today);
    }

    let adjusted = adjuster::adjust_events(parser, events);
    if !adjusted.skipped.is_empty() {
        log::warn!(
            "{} of {} calendar events were skipped during layout",
            adjusted.skipped.len(),
            events.len()
        );
    }

    let mut earliest: Option<NaiveDate> = None;
    let mut latest: Option<NaiveDate> = None;
    for event in &adjusted.events {
        if let Ok(start) = parser.parse(&event.start, Some(&event.end)) {
            earliest = Some(earliest.map_or(start, |e| e.min(start)));
        }
        if let Ok(end) = parser.parse(&event.end, None) {
            latest = Some(latest.map_or(end, |l| l.max(end)));
        }
    }

    let (Some(earliest_start), Some(latest_end)) = (earliest, latest) else {
        let mut layout = TimelineLayout::degenerate(today);
        layout.skipped = adjusted.skipped;
        return layout;
    };

    let display_start = start_of_month(earliest_start);
    let display_end = latest_end + Duration::days(TRAILING_BUFFER_DAYS);

    let mut all_dates = Vec::new();
    let mut date = display_start;
    while date <= display_end {
        all_dates.push(date);
        date += Duration::days(1);
    }

    // Enumeration order is chronological, so first-seen month order is too.
    let mut months: Vec<MonthGroup> = Vec::new();
    for &date in &all_dates {
        let key = date.format("%Y-%m").to_string();
        match months.last_mut() {
            Some(group) if group.key == key => group.dates.push(date),
            _ => months.push(MonthGroup {
                key,
                dates: vec![date],
            }),
        }
    }

    let (event_positions, max_lane) = lanes::assign_lanes(parser, &adjusted.events);

    TimelineLayout {
        adjusted_events: adjusted.events,
        skipped: adjusted.skipped,
        earliest_start,
        latest_end,
        display_start,
        display_end,
        all_dates,
        months,
        event_positions,
        max_lane,
    }
}
