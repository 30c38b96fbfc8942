// Property-based tests for the timeline core
// Random event sets exercise the lane, range, and status invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use ug_pulse::models::event::CalendarEvent;
use ug_pulse::models::timeline::{EventPhase, PositionedEvent};
use ug_pulse::services::date::DateParser;
use ug_pulse::services::timeline::{adjuster, lanes, layout, status::StatusEngine};
use ug_pulse::utils::date::local_midnight;

fn date(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
}

fn display_event(parser: &DateParser, index: usize, start: NaiveDate, end: NaiveDate) -> CalendarEvent {
    CalendarEvent {
        activity: format!("Kegiatan {}", index),
        date_range: String::new(),
        start: parser.format_display(start),
        end: parser.format_display(end),
    }
}

/// `(start_offset, duration_days)` pairs within one academic year.
fn interval_strategy() -> impl Strategy<Value = (i64, i64)> {
    (0i64..365, 0i64..60)
}

proptest! {
    /// Any two events sharing a lane are either disjoint or nested. Partial
    /// overlap (one endpoint strictly inside the other interval) never
    /// shares a lane; full containment can, because the greedy scan accepts
    /// an event whose endpoints both clear the lane's accumulated interval.
    #[test]
    fn same_lane_events_never_partially_overlap(raw in prop::collection::vec(interval_strategy(), 0..25)) {
        let parser = DateParser::default();
        let events: Vec<CalendarEvent> = raw
            .iter()
            .enumerate()
            .map(|(i, &(offset, len))| display_event(&parser, i, date(offset), date(offset + len)))
            .collect();

        let (positioned, max_lane) = lanes::assign_lanes(&parser, &events);

        for (i, a) in positioned.iter().enumerate() {
            for b in positioned.iter().skip(i + 1) {
                if a.lane != b.lane {
                    continue;
                }
                let disjoint = a.end < b.start || b.end < a.start;
                let nested = (a.start <= b.start && b.end <= a.end)
                    || (b.start <= a.start && a.end <= b.end);
                prop_assert!(
                    disjoint || nested,
                    "lane {} holds partially overlapping [{}, {}] and [{}, {}]",
                    a.lane, a.start, a.end, b.start, b.end
                );
            }
        }

        // Trivial upper bound on lane usage.
        if !positioned.is_empty() {
            prop_assert!(max_lane + 1 <= positioned.len());
        }
    }

    /// Chronologically ordered disjoint events all land in lane 0.
    #[test]
    fn ordered_disjoint_events_stay_in_lane_zero(gaps in prop::collection::vec((1i64..20, 0i64..10), 1..15)) {
        let parser = DateParser::default();
        let mut cursor = 0i64;
        let mut events = Vec::new();
        for (i, &(gap, len)) in gaps.iter().enumerate() {
            let start = cursor + gap;
            let end = start + len;
            events.push(display_event(&parser, i, date(start), date(end)));
            cursor = end + 1;
        }

        let (positioned, max_lane) = lanes::assign_lanes(&parser, &events);

        prop_assert_eq!(positioned.len(), events.len());
        prop_assert!(positioned.iter().all(|p| p.lane == 0));
        prop_assert_eq!(max_lane, 0);
    }

    /// The enumerated date range has no gaps, no duplicates, and spans
    /// exactly `[display_start, display_end]`.
    #[test]
    fn all_dates_are_gapless_and_ascending(raw in prop::collection::vec(interval_strategy(), 1..15)) {
        let parser = DateParser::default();
        let events: Vec<CalendarEvent> = raw
            .iter()
            .enumerate()
            .map(|(i, &(offset, len))| display_event(&parser, i, date(offset), date(offset + len)))
            .collect();

        let built = layout::build_layout(&parser, &events, date(0));

        prop_assert_eq!(built.all_dates.first(), Some(&built.display_start));
        prop_assert_eq!(built.all_dates.last(), Some(&built.display_end));
        for pair in built.all_dates.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        prop_assert_eq!(
            built.display_end - built.latest_end,
            Duration::days(layout::TRAILING_BUFFER_DAYS)
        );
    }

    /// A zero-duration event always widens into a 7-day lead-in.
    #[test]
    fn zero_duration_events_widen_by_seven_days(offset in 10i64..365) {
        let parser = DateParser::default();
        let day = date(offset);
        let events = [display_event(&parser, 0, day, day)];

        let adjusted = adjuster::adjust_events(&parser, &events);

        prop_assert_eq!(adjusted.events.len(), 1);
        let start = parser.parse(&adjusted.events[0].start, None).unwrap();
        let end = parser.parse(&adjusted.events[0].end, None).unwrap();
        prop_assert_eq!(start, end - Duration::days(7));
    }

    /// A start date without a year borrows the year of the end date.
    #[test]
    fn start_year_is_inferred_from_end(month in 1u32..=12, day in 1u32..=28, year in 2020i32..2030) {
        let parser = DateParser::default();
        let end = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let start_without_year = format!("{} {}", day, parser.format_month(end).split(' ').next().unwrap());

        let parsed = parser.parse(&start_without_year, Some(&parser.format_display(end))).unwrap();

        prop_assert_eq!(parsed, end);
    }

    /// As `now` advances, an event's phase never moves backwards.
    #[test]
    fn status_phases_are_monotonic(start_offset in 0i64..100, len in 0i64..30, steps in prop::collection::vec(1i64..200_000, 1..40)) {
        let parser = DateParser::default();
        let start = date(start_offset);
        let end = start + Duration::days(len);
        let positioned = PositionedEvent {
            event: display_event(&parser, 0, start, end),
            start,
            end,
            lane: 0,
        };

        let mut engine = StatusEngine::default();
        // Walk from shortly before the event until well past it.
        let mut now = local_midnight(start) - Duration::days(2);

        let mut previous = EventPhase::Upcoming;
        for &step in &steps {
            now += Duration::seconds(step);
            let phase = engine.status(&positioned, now).phase;
            prop_assert!(previous <= phase, "{:?} regressed to {:?}", previous, phase);
            previous = phase;
        }
    }
}
