//! Version history for the calendar feed.
//!
//! The store keeps a singleton current-feed row plus a list of recorded
//! versions. A version is appended only when the feed actually changed, and
//! the list is trimmed to the newest entries.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::event::CalendarFeed;
use crate::models::version::TimelineVersion;
use crate::services::date::DateParser;

/// How many feed versions survive a trim.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Outcome of recording a fetched feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Set-difference event count against the previous feed.
    pub changes: usize,
    pub version_stored: bool,
}

/// SQLite-backed store for the current feed and its version history.
pub struct VersionStore<'a> {
    conn: &'a Connection,
    history_limit: usize,
}

impl<'a> VersionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(conn: &'a Connection, history_limit: usize) -> Self {
        Self {
            conn,
            history_limit: history_limit.max(1),
        }
    }

    /// The feed most recently recorded, with its fetch time.
    pub fn latest_feed(&self) -> Result<Option<(CalendarFeed, DateTime<Local>)>> {
        let row = self
            .conn
            .query_row(
                "SELECT payload, fetched_at FROM current_feed WHERE id = 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .context("Failed to load current feed")?;

        let Some((payload, fetched_at)) = row else {
            return Ok(None);
        };

        let feed: CalendarFeed =
            serde_json::from_str(&payload).context("Stored feed payload is not valid JSON")?;
        let fetched_at = DateTime::parse_from_rfc3339(&fetched_at)
            .map(|dt| dt.with_timezone(&Local))
            .context("Stored fetch timestamp is not RFC 3339")?;

        Ok(Some((feed, fetched_at)))
    }

    pub fn last_fetched(&self) -> Result<Option<DateTime<Local>>> {
        Ok(self.latest_feed()?.map(|(_, fetched_at)| fetched_at))
    }

    /// Stores `feed` as current and appends a version entry when the feed
    /// actually changed (or on first record).
    pub fn record(
        &self,
        feed: &CalendarFeed,
        now: DateTime<Local>,
        source: &str,
    ) -> Result<RecordOutcome> {
        let previous = self.latest_feed()?;

        let changes = match &previous {
            Some((old, _)) => count_changes(old, feed),
            None => feed.data.len(),
        };

        let payload = serde_json::to_string(feed).context("Failed to serialize feed")?;

        self.conn
            .execute(
                "INSERT INTO current_feed (id, payload, fetched_at) VALUES (1, ?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET payload = ?1, fetched_at = ?2",
                params![payload, now.to_rfc3339()],
            )
            .context("Failed to store current feed")?;

        let version_stored = changes > 0 || previous.is_none();
        if version_stored {
            self.conn
                .execute(
                    "INSERT INTO timeline_versions (payload, recorded_at, changes, source)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![payload, now.to_rfc3339(), changes as i64, source],
                )
                .context("Failed to store timeline version")?;

            self.trim()?;
            log::info!(
                "Recorded calendar feed version ({} changes, source '{}')",
                changes,
                source
            );
        }

        Ok(RecordOutcome {
            changes,
            version_stored,
        })
    }

    fn trim(&self) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM timeline_versions WHERE id NOT IN (
                     SELECT id FROM timeline_versions ORDER BY id DESC LIMIT ?1
                 )",
                [self.history_limit as i64],
            )
            .context("Failed to trim timeline versions")?;

        Ok(())
    }

    /// Stored versions, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<TimelineVersion>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload, recorded_at, changes, source FROM timeline_versions
             ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch timeline versions")?;

        rows.into_iter()
            .map(|(payload, recorded_at, changes, source)| {
                let feed = serde_json::from_str(&payload)
                    .context("Stored version payload is not valid JSON")?;
                let recorded_at = DateTime::parse_from_rfc3339(&recorded_at)
                    .map(|dt| dt.with_timezone(&Local))
                    .context("Stored version timestamp is not RFC 3339")?;

                Ok(TimelineVersion {
                    feed,
                    recorded_at,
                    changes: changes.max(0) as usize,
                    source,
                })
            })
            .collect()
    }
}

/// Size delta between the two feeds plus one per event new in `new`.
fn count_changes(old: &CalendarFeed, new: &CalendarFeed) -> usize {
    let old_events: HashSet<String> = old
        .data
        .iter()
        .filter_map(|event| serde_json::to_string(event).ok())
        .collect();
    let new_events: HashSet<String> = new
        .data
        .iter()
        .filter_map(|event| serde_json::to_string(event).ok())
        .collect();

    let mut changes = new_events.len().abs_diff(old_events.len());
    for event in &new_events {
        if !old_events.contains(event) {
            changes += 1;
        }
    }

    changes
}

/// Formats a fetch time the way the dashboard shows it: relative phrasing
/// under 24 hours, the full display date otherwise.
pub fn format_last_fetched(
    parser: &DateParser,
    fetched_at: Option<DateTime<Local>>,
    now: DateTime<Local>,
) -> String {
    let Some(fetched_at) = fetched_at else {
        return "Belum pernah".to_string();
    };

    let minutes = (now - fetched_at).num_minutes().abs();
    if minutes < 60 {
        return format!("{} menit yang lalu", minutes);
    }

    let hours = (minutes as f64 / 60.0).round() as i64;
    if hours < 24 {
        return format!("{} jam yang lalu", hours);
    }

    format!(
        "{} {}",
        parser.format_display(fetched_at.date_naive()),
        fetched_at.format("%H:%M")
    )
}
