//! Fetches the academic calendar feed from the BAAK API.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::models::event::CalendarFeed;

/// Default base URL of the BAAK academic API.
pub const DEFAULT_BASE_URL: &str = "https://baak-api.vercel.app";

pub struct FeedFetcher {
    client: Client,
    base_url: String,
    max_response_bytes: usize,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl FeedFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("Failed to build calendar fetch HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            max_response_bytes: 2 * 1024 * 1024,
            max_retries: 2,
            retry_delay_ms: 400,
        })
    }

    fn kalender_url(&self) -> String {
        format!("{}/kalender", self.base_url.trim_end_matches('/'))
    }

    /// Fetches the calendar feed, retrying transient failures.
    pub fn fetch_calendar(&self) -> Result<CalendarFeed> {
        let url = self.kalender_url();
        if !url.starts_with("https://") {
            return Err(anyhow!("Calendar API URL must use HTTPS"));
        }

        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..=self.max_retries {
            match self.fetch_once(&url) {
                Ok(feed) => return Ok(feed),
                Err(err) => {
                    let is_last_attempt = attempt == self.max_retries;
                    if is_last_attempt {
                        last_error = Some(err.context(format!(
                            "Failed to fetch calendar from {} after {} attempts",
                            url,
                            attempt + 1
                        )));
                    } else {
                        log::warn!(
                            "Calendar fetch attempt {} failed for {}: {}",
                            attempt + 1,
                            url,
                            err
                        );
                        thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Unknown calendar fetch error")))
    }

    fn fetch_once(&self, url: &str) -> Result<CalendarFeed> {
        let response = self
            .client
            .get(url)
            .send()
            .context("Network error during calendar fetch")?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Calendar fetch failed with HTTP status {}", status));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(anyhow!(
                    "Calendar response too large ({} bytes > {} bytes)",
                    content_length,
                    self.max_response_bytes
                ));
            }
        }

        let bytes = response
            .bytes()
            .context("Failed to read calendar response body")?;

        if bytes.len() > self.max_response_bytes {
            return Err(anyhow!(
                "Calendar response too large ({} bytes > {} bytes)",
                bytes.len(),
                self.max_response_bytes
            ));
        }

        let feed: CalendarFeed =
            serde_json::from_slice(&bytes).context("Calendar response is not valid JSON")?;

        if feed.status.is_empty() {
            return Err(anyhow!("Calendar response carries no status field"));
        }

        Ok(feed)
    }
}
