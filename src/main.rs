// UG Pulse timeline CLI
// Main entry point

use std::fs;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;

use ug_pulse::models::event::CalendarFeed;
use ug_pulse::models::timeline::EventPhase;
use ug_pulse::services::baak::FeedFetcher;
use ug_pulse::services::database::Database;
use ug_pulse::services::date::DateParser;
use ug_pulse::services::history::{self, VersionStore};
use ug_pulse::services::settings::AppSettings;
use ug_pulse::services::timeline::cache::LayoutCache;
use ug_pulse::services::timeline::status::{format_time_left, StatusEngine};
use ug_pulse::services::timeline::ticker::Ticker;

#[derive(Debug, Default)]
struct CliArgs {
    refresh: bool,
    history: bool,
    watch: bool,
}

fn parse_args() -> CliArgs {
    let mut args = CliArgs::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--refresh" => args.refresh = true,
            "--history" => args.history = true,
            "--watch" => args.watch = true,
            other => log::warn!("Ignoring unknown argument '{}'", other),
        }
    }
    args
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting UG Pulse timeline");

    let args = parse_args();
    let settings = AppSettings::load()?;

    let db_path = settings.resolve_database_path();
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create data directory {}", parent.display()))?;
    }

    let db = Database::new(&db_path.to_string_lossy())?;
    db.initialize_schema()?;

    let store = VersionStore::with_history_limit(db.connection(), settings.history_limit);
    let parser = DateParser::default();

    if args.history {
        return print_history(&store);
    }

    let feed = load_feed(&settings, &store, args.refresh)?;

    let now = Local::now();
    let mut cache = LayoutCache::new();
    let layout = cache.layout(&parser, &feed.data, now.date_naive());

    println!(
        "Kalender Akademik: {} kegiatan dalam {} lajur",
        layout.event_positions.len(),
        layout.lane_count()
    );
    println!(
        "Terakhir diupdate: {}",
        history::format_last_fetched(&parser, store.last_fetched()?, now)
    );

    for skipped in &layout.skipped {
        println!("  ! '{}' dilewati: {}", skipped.activity, skipped.reason);
    }

    println!();
    for group in &layout.months {
        let Some(first) = group.dates.first() else {
            continue;
        };
        println!("  {:<20} {} hari", parser.format_month(*first), group.dates.len());
    }

    let mut statuses = StatusEngine::default();
    println!();
    for positioned in &layout.event_positions {
        let status = statuses.status(positioned, now);
        println!(
            "  [lajur {}] {:<40} {} s/d {}  ({})",
            positioned.lane,
            positioned.event.activity,
            positioned.event.start,
            positioned.event.end,
            status.full_label
        );
    }

    if args.watch {
        watch_next_event(&layout, statuses)?;
    }

    Ok(())
}

/// Serves the stored feed, fetching from the API on first run or when a
/// refresh was requested.
fn load_feed(
    settings: &AppSettings,
    store: &VersionStore<'_>,
    refresh: bool,
) -> Result<CalendarFeed> {
    if !refresh {
        if let Some((feed, _)) = store.latest_feed()? {
            log::info!("Serving stored calendar feed ({} events)", feed.data.len());
            return Ok(feed);
        }
        log::info!("No stored calendar feed; fetching from the API");
    }

    let fetcher = FeedFetcher::new(settings.api_base_url.clone())?;
    let feed = fetcher.fetch_calendar()?;

    let source = if refresh { "refresh" } else { "auto-fetch" };
    let outcome = store.record(&feed, Local::now(), source)?;
    log::info!(
        "Recorded calendar feed: {} changes, version stored: {}",
        outcome.changes,
        outcome.version_stored
    );

    Ok(feed)
}

fn print_history(store: &VersionStore<'_>) -> Result<()> {
    let versions = store.recent(history::DEFAULT_HISTORY_LIMIT)?;
    if versions.is_empty() {
        println!("Belum ada riwayat kalender.");
        return Ok(());
    }

    for version in versions {
        println!(
            "{}  {} kegiatan, {} perubahan ({})",
            version.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            version.feed.data.len(),
            version.changes,
            version.source
        );
    }

    Ok(())
}

/// Live countdown for the first event that has not finished yet.
fn watch_next_event(
    layout: &ug_pulse::models::timeline::TimelineLayout,
    mut statuses: StatusEngine,
) -> Result<()> {
    let now = Local::now();
    let focused = layout
        .event_positions
        .iter()
        .find(|positioned| statuses.status(positioned, now).phase != EventPhase::Finished)
        .cloned();

    let Some(focused) = focused else {
        println!("Semua kegiatan sudah selesai.");
        return Ok(());
    };

    println!(
        "\nMemantau '{}' (Ctrl-C untuk berhenti)",
        focused.event.activity
    );

    let engine = Mutex::new(statuses);
    let _ticker = Ticker::start(Duration::from_secs(1), move || {
        let Ok(mut engine) = engine.lock() else {
            return;
        };
        let status = engine.status(&focused, Local::now());
        println!("  {} {}", status.full_label, format_time_left(status.seconds_left));
    });

    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
