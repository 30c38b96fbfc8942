//! Live event status: upcoming / active / finished classification with a
//! per-second countdown.
//!
//! Classification is a pure function of `(now, start, end)`; the engine only
//! caches results, one entry per event, each valid for a second. A consumer
//! polling on every render therefore recomputes at most once per event per
//! second. Day counts use whole-day differencing so they roll over at
//! midnight, while `seconds_left` ticks every second.

use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::models::timeline::{EventPhase, EventStatus, PositionedEvent, StatusAnchor};
use crate::utils::date::local_midnight;

/// Display strings for event statuses. Defaults are Indonesian, matching the
/// feed locale.
#[derive(Debug, Clone)]
pub struct StatusLabels {
    /// Prefix for upcoming events, e.g. `Dimulai dlm`.
    pub starts_in: String,
    /// Prefix for active events, e.g. `Berakhir dlm`.
    pub ends_in: String,
    /// Day word in full labels.
    pub day_unit: String,
    /// Suffix in compact labels, e.g. the `h` of `12h`.
    pub day_suffix: String,
    pub finished: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            starts_in: "Dimulai dlm".to_string(),
            ends_in: "Berakhir dlm".to_string(),
            day_unit: "hari".to_string(),
            day_suffix: "h".to_string(),
            finished: "Selesai".to_string(),
        }
    }
}

/// Computes and caches live event statuses.
pub struct StatusEngine {
    labels: StatusLabels,
    cache: HashMap<String, EventStatus>,
}

impl Default for StatusEngine {
    fn default() -> Self {
        Self::new(StatusLabels::default())
    }
}

impl StatusEngine {
    pub fn new(labels: StatusLabels) -> Self {
        Self {
            labels,
            cache: HashMap::new(),
        }
    }

    /// Status of `event` at `now`. A cached value is served while it is less
    /// than one second old.
    pub fn status(&mut self, event: &PositionedEvent, now: DateTime<Local>) -> EventStatus {
        let key = event.identity();

        if let Some(cached) = self.cache.get(&key) {
            let age_ms = now.signed_duration_since(cached.computed_at).num_milliseconds();
            if (0..1000).contains(&age_ms) {
                return cached.clone();
            }
        }

        let status = self.compute(event, now);
        self.cache.insert(key, status.clone());
        status
    }

    fn compute(&self, event: &PositionedEvent, now: DateTime<Local>) -> EventStatus {
        let start = local_midnight(event.start);
        let end = local_midnight(event.end);
        let today = now.date_naive();

        if now < start {
            let days = (event.start - today).num_days();
            EventStatus {
                phase: EventPhase::Upcoming,
                short_label: format!("{}{}", days, self.labels.day_suffix),
                full_label: format!("{} {} {}", self.labels.starts_in, days, self.labels.day_unit),
                anchor: StatusAnchor::Start,
                seconds_left: (start - now).num_seconds().max(0),
                computed_at: now,
            }
        } else if now > end {
            EventStatus {
                phase: EventPhase::Finished,
                short_label: self.labels.finished.clone(),
                full_label: self.labels.finished.clone(),
                anchor: StatusAnchor::End,
                seconds_left: 0,
                computed_at: now,
            }
        } else {
            let days = (event.end - today).num_days();
            EventStatus {
                phase: EventPhase::Active,
                short_label: format!("{}{}", days, self.labels.day_suffix),
                full_label: format!("{} {} {}", self.labels.ends_in, days, self.labels.day_unit),
                anchor: StatusAnchor::End,
                seconds_left: (end - now).num_seconds().max(0),
                computed_at: now,
            }
        }
    }
}

/// Renders a countdown as `HH:MM:SS`, hours wrapped at a day to pair with
/// the day-count labels.
pub fn format_time_left(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
