// Timeline layout models
// Snapshot and status types produced by the timeline services

use chrono::{DateTime, Local, NaiveDate};

use crate::models::event::{CalendarEvent, SkippedEvent};

/// An adjusted event with its resolved dates and assigned lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedEvent {
    pub event: CalendarEvent,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Row in the visualization; events sharing a lane never visually overlap.
    pub lane: usize,
}

impl PositionedEvent {
    pub fn identity(&self) -> String {
        self.event.identity()
    }
}

/// All days of one calendar month inside the display range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// `yyyy-MM` key; groups appear in chronological order.
    pub key: String,
    pub dates: Vec<NaiveDate>,
}

/// Immutable layout snapshot for one event list on one calendar day.
///
/// Consumers receive shared references and must treat the snapshot as
/// read-only; the layout cache is the sole writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineLayout {
    pub adjusted_events: Vec<CalendarEvent>,
    /// Events excluded because their dates failed to parse.
    pub skipped: Vec<SkippedEvent>,
    pub earliest_start: NaiveDate,
    pub latest_end: NaiveDate,
    /// First day of the month containing the earliest start.
    pub display_start: NaiveDate,
    /// Latest end plus the trailing buffer.
    pub display_end: NaiveDate,
    /// Every calendar day in `[display_start, display_end]`, ascending.
    pub all_dates: Vec<NaiveDate>,
    pub months: Vec<MonthGroup>,
    pub event_positions: Vec<PositionedEvent>,
    pub max_lane: usize,
}

impl TimelineLayout {
    /// Layout for an empty feed: today everywhere, empty collections.
    pub fn degenerate(today: NaiveDate) -> Self {
        Self {
            adjusted_events: Vec::new(),
            skipped: Vec::new(),
            earliest_start: today,
            latest_end: today,
            display_start: today,
            display_end: today,
            all_dates: Vec::new(),
            months: Vec::new(),
            event_positions: Vec::new(),
            max_lane: 0,
        }
    }

    /// Number of lanes the visualization needs.
    pub fn lane_count(&self) -> usize {
        if self.event_positions.is_empty() {
            0
        } else {
            self.max_lane + 1
        }
    }
}

/// Where an event sits relative to the current time.
///
/// As wall-clock time advances the phase only moves forward: upcoming,
/// then active, then finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventPhase {
    Upcoming,
    Active,
    Finished,
}

/// Which end of the event bar a status chip attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAnchor {
    Start,
    End,
}

/// Live status of one event: phase classification plus countdown material.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStatus {
    pub phase: EventPhase,
    /// Compact chip text, e.g. `12h`.
    pub short_label: String,
    /// Full phrasing, e.g. `Dimulai dlm 12 hari`.
    pub full_label: String,
    pub anchor: StatusAnchor,
    /// Exact seconds until the anchored endpoint; zero once finished.
    pub seconds_left: i64,
    /// When this status was computed; cached entries expire after a second.
    pub computed_at: DateTime<Local>,
}
