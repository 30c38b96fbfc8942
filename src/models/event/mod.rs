// Calendar feed models
// Wire shapes for the BAAK academic calendar API

use serde::{Deserialize, Serialize};

/// One academic calendar entry as the feed delivers it.
///
/// `start` and `end` are localized date strings (`"1 Januari 2024"`). The
/// year is sometimes omitted on `start`, in which case it is inferred from
/// the year of `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event label.
    #[serde(rename = "kegiatan")]
    pub activity: String,
    /// Raw display date range, shown verbatim in event detail.
    #[serde(rename = "tanggal")]
    pub date_range: String,
    pub start: String,
    pub end: String,
}

impl CalendarEvent {
    /// Stable identity used for status caching.
    pub fn identity(&self) -> String {
        format!("{}|{}|{}", self.activity, self.start, self.end)
    }
}

/// The `GET /kalender` response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeed {
    pub status: String,
    pub data: Vec<CalendarEvent>,
}

/// An event excluded from layout because its dates failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    pub activity: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "status": "success",
            "data": [
                {
                    "kegiatan": "Ujian Akhir Semester",
                    "tanggal": "1 Januari 2024",
                    "start": "1 Januari 2024",
                    "end": "1 Januari 2024"
                }
            ]
        }"#
    }

    #[test]
    fn deserializes_feed_with_renamed_fields() {
        let feed: CalendarFeed = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(feed.status, "success");
        assert_eq!(feed.data.len(), 1);
        assert_eq!(feed.data[0].activity, "Ujian Akhir Semester");
        assert_eq!(feed.data[0].date_range, "1 Januari 2024");
    }

    #[test]
    fn serializes_back_to_feed_field_names() {
        let feed: CalendarFeed = serde_json::from_str(sample_json()).unwrap();
        let json = serde_json::to_string(&feed).unwrap();

        assert!(json.contains("\"kegiatan\""));
        assert!(json.contains("\"tanggal\""));
        assert!(!json.contains("\"activity\""));
    }

    #[test]
    fn identity_distinguishes_events_by_label_and_dates() {
        let feed: CalendarFeed = serde_json::from_str(sample_json()).unwrap();
        let mut other = feed.data[0].clone();
        other.end = "2 Januari 2024".to_string();

        assert_ne!(feed.data[0].identity(), other.identity());
    }
}
