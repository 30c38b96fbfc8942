//! Greedy lane allocation for the horizontal timeline.
//!
//! Each event goes to the first lane whose accumulated interval contains
//! neither of the event's endpoints; the chosen lane then grows to the union
//! of the two intervals. First-fit over the lane array keeps the assignment
//! deterministic for a stable input order. Adversarial orders may use more
//! lanes than an optimal interval coloring; that tradeoff is intentional and
//! keeps the scan at O(events x lanes).

use chrono::NaiveDate;

use crate::models::event::CalendarEvent;
use crate::models::timeline::PositionedEvent;
use crate::services::date::DateParser;

#[derive(Debug, Clone, Copy)]
struct LaneInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl LaneInterval {
    fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Tags each event with a lane index. Events whose dates fail to parse are
/// left out (the adjuster has already reported them). Returns the positioned
/// events plus the highest lane index used (0 when empty).
pub fn assign_lanes(parser: &DateParser, events: &[CalendarEvent]) -> (Vec<PositionedEvent>, usize) {
    let mut lanes: Vec<LaneInterval> = Vec::new();
    let mut positioned = Vec::with_capacity(events.len());

    for event in events {
        let Ok(start) = parser.parse(&event.start, Some(&event.end)) else {
            continue;
        };
        let Ok(end) = parser.parse(&event.end, None) else {
            continue;
        };

        let found = lanes
            .iter()
            .position(|lane| !lane.contains(start) && !lane.contains(end));

        let lane = match found {
            Some(index) => {
                let slot = &mut lanes[index];
                slot.start = slot.start.min(start);
                slot.end = slot.end.max(end);
                index
            }
            None => {
                lanes.push(LaneInterval { start, end });
                lanes.len() - 1
            }
        };

        positioned.push(PositionedEvent {
            event: event.clone(),
            start,
            end,
            lane,
        });
    }

    let max_lane = positioned.iter().map(|p| p.lane).max().unwrap_or(0);
    (positioned, max_lane)
}
