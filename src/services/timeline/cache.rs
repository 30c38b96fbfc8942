//! Memoizes layout computation so repeated renders within one calendar day
//! reuse a single snapshot.
//!
//! The key combines the event count, the boundary events' raw dates, and the
//! current day, so the cache rotates automatically at midnight and whenever
//! the list's size or edges change. Two same-day lists that agree on all
//! three share an entry even if they differ in the middle; the daily
//! rotation bounds how long that approximation can live.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::event::CalendarEvent;
use crate::models::timeline::TimelineLayout;
use crate::services::date::DateParser;
use crate::services::timeline::layout;

/// How many distinct day/list keys are retained.
pub const DEFAULT_CAPACITY: usize = 7;

/// Bounded LRU cache of layout snapshots, owned by the composition root and
/// passed to whoever renders the timeline. Single writer; consumers get
/// shared read-only snapshots.
pub struct LayoutCache {
    /// Most recently used entry last.
    entries: Vec<(String, Arc<TimelineLayout>)>,
    capacity: usize,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Cache key for `events` on `today`. The empty feed keys as
    /// `empty-<day>` so its degenerate snapshot rotates daily too.
    pub fn key(events: &[CalendarEvent], today: NaiveDate) -> String {
        match (events.first(), events.last()) {
            (Some(first), Some(last)) => format!(
                "{}-{}-{}-{}",
                events.len(),
                first.start,
                last.end,
                today.format("%Y-%m-%d")
            ),
            _ => format!("empty-{}", today.format("%Y-%m-%d")),
        }
    }

    /// Returns the memoized layout for `events` on `today`, computing and
    /// storing it on a miss.
    pub fn layout(
        &mut self,
        parser: &DateParser,
        events: &[CalendarEvent],
        today: NaiveDate,
    ) -> Arc<TimelineLayout> {
        let key = Self::key(events, today);

        if let Some(index) = self.entries.iter().position(|(k, _)| *k == key) {
            let entry = self.entries.remove(index);
            let snapshot = Arc::clone(&entry.1);
            self.entries.push(entry);
            return snapshot;
        }

        log::debug!("Layout cache miss for key '{}'", key);
        let snapshot = Arc::new(layout::build_layout(parser, events, today));
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push((key, Arc::clone(&snapshot)));
        snapshot
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
