//! Localized date parsing and formatting.
//!
//! The upstream feed renders dates as `"<day> <MonthName> [<year>]"` with
//! Indonesian month names, sometimes dropping the year on the start date.
//! The month table is injectable so the parser stays usable for any locale
//! with full month names.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors produced while parsing a localized date string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseDateError {
    #[error("date string '{0}' is empty")]
    MissingDay(String),
    #[error("day '{0}' is not a number between 1 and 31")]
    InvalidDay(String),
    #[error("date string '{0}' has no month token")]
    MissingMonth(String),
    #[error("unknown month name '{0}'")]
    UnknownMonth(String),
    #[error("date string '{0}' has no year and none could be inferred")]
    MissingYear(String),
    #[error("year '{0}' is not a number")]
    InvalidYear(String),
    #[error("{year}-{month:02}-{day:02} is not a real calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// Month-name table for one locale. Index 0 is January.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    names: [String; 12],
}

impl MonthNames {
    pub fn new(names: [&str; 12]) -> Self {
        Self {
            names: names.map(str::to_string),
        }
    }

    /// Month names as the BAAK feed spells them.
    pub fn indonesian() -> Self {
        Self::new([
            "Januari",
            "Februari",
            "Maret",
            "April",
            "Mei",
            "Juni",
            "Juli",
            "Agustus",
            "September",
            "Oktober",
            "November",
            "Desember",
        ])
    }

    /// Month number (1-12) for an exact full-name match.
    pub fn number(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| index as u32 + 1)
    }

    /// Name for a month number (1-12).
    pub fn name(&self, month: u32) -> Option<&str> {
        self.names.get(month.checked_sub(1)? as usize).map(String::as_str)
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::indonesian()
    }
}

/// Parses and formats feed date strings against an injected month table.
#[derive(Debug, Clone, Default)]
pub struct DateParser {
    months: MonthNames,
}

impl DateParser {
    pub fn new(months: MonthNames) -> Self {
        Self { months }
    }

    /// Parses `"<day> <MonthName> [<year>]"` into a calendar date.
    ///
    /// A missing year is inferred from the third whitespace token of
    /// `year_fallback` (in the feed, the event's own end date). Rather than
    /// produce a plausible-looking wrong date, every malformed input is an
    /// error so callers can skip the event.
    pub fn parse(
        &self,
        date_str: &str,
        year_fallback: Option<&str>,
    ) -> Result<NaiveDate, ParseDateError> {
        let mut tokens = date_str.split_whitespace();

        let day_token = tokens
            .next()
            .ok_or_else(|| ParseDateError::MissingDay(date_str.to_string()))?;
        let day: u32 = day_token
            .parse()
            .map_err(|_| ParseDateError::InvalidDay(day_token.to_string()))?;
        if !(1..=31).contains(&day) {
            return Err(ParseDateError::InvalidDay(day_token.to_string()));
        }

        let month_token = tokens
            .next()
            .ok_or_else(|| ParseDateError::MissingMonth(date_str.to_string()))?;
        let month = self
            .months
            .number(month_token)
            .ok_or_else(|| ParseDateError::UnknownMonth(month_token.to_string()))?;

        let year_token = match tokens.next() {
            Some(year) => year.to_string(),
            None => year_fallback
                .and_then(|fallback| fallback.split_whitespace().nth(2))
                .map(str::to_string)
                .ok_or_else(|| ParseDateError::MissingYear(date_str.to_string()))?,
        };
        let year: i32 = year_token
            .parse()
            .map_err(|_| ParseDateError::InvalidYear(year_token.clone()))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ParseDateError::InvalidDate { year, month, day })
    }

    /// Renders a date back into the feed's display form, e.g. `1 Januari 2024`.
    pub fn format_display(&self, date: NaiveDate) -> String {
        let name = self.months.name(date.month()).unwrap_or_default();
        format!("{} {} {}", date.day(), name, date.year())
    }

    /// Month heading form, e.g. `Januari 2024`.
    pub fn format_month(&self, date: NaiveDate) -> String {
        let name = self.months.name(date.month()).unwrap_or_default();
        format!("{} {}", name, date.year())
    }
}
