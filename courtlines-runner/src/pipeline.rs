//! The two scrape pipelines: odds lines per date, box scores per event.
//!
//! Both walk the configured dates in order and append to one CSV sink.
//! A date or event that fails to fetch or extract is logged, counted and
//! skipped. Sink errors end the run.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use courtlines_core::domain::BoxScoreRecord;
use courtlines_core::enumerate::{event_urls, SourceUrls};
use courtlines_core::extract::{extract_box_score, extract_games, ExtractError, PageGame};
use courtlines_core::fetch::{FetchError, PageFetcher};
use courtlines_core::format::{League, SportFormat};
use thiserror::Error;

use crate::back_to_back::BackToBack;
use crate::config::RunConfig;
use crate::layout::{box_score_header, box_score_row, lines_header, lines_row};
use crate::progress::ScrapeProgress;
use crate::sink::CsvSink;

/// Why one date or event produced no rows.
#[derive(Debug, Error)]
pub enum DateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dates: usize,
    pub dates_skipped: usize,
    pub events: usize,
    pub events_skipped: usize,
    /// Scoreboards that failed to fetch or decode.
    pub boards_failed: usize,
    pub rows_written: usize,
}

// ── Lines ───────────────────────────────────────────────────────────

/// Scrape one odds listing per configured date into `config.output`.
pub fn run_lines(
    config: &RunConfig,
    fetcher: &dyn PageFetcher,
    progress: &dyn ScrapeProgress,
) -> anyhow::Result<RunSummary> {
    let format = config.sport_format();
    let header = lines_header(&format);
    let mut sink = CsvSink::open(&config.output, &header)
        .with_context(|| format!("opening {}", config.output.display()))?;
    if sink.columns() != header.as_slice() {
        tracing::warn!(
            path = %config.output.display(),
            "existing header differs from the {} layout; rows are positional",
            config.league
        );
    }

    let books = config.books.preferred_books();
    let days = config.days();
    let mut tracker = BackToBack::new();
    let mut summary = RunSummary::default();

    tracing::info!(league = %config.league, dates = days.len(), fetcher = fetcher.name(), "lines run starting");

    for (index, &date) in days.iter().enumerate() {
        progress.on_date_start(date, index, days.len());
        summary.dates += 1;

        let games = match fetch_games(fetcher, &config.sources, config.league, date, &format) {
            Ok(games) => games,
            Err(e) => {
                tracing::warn!(date = %date, error = %e, "skipping date");
                summary.dates_skipped += 1;
                tracker.record_day(date, Vec::<String>::new());
                progress.on_date_complete(date, 0, &Err(e.to_string()));
                continue;
            }
        };

        let mut played = Vec::new();
        let rows_before = sink.rows_written();
        for game in games {
            played.extend(game.team_names().map(str::to_string));
            let away_b2b = game
                .away
                .name
                .as_deref()
                .is_some_and(|name| tracker.played_day_before(name, date));
            let record = game.into_record(date, &config.books.roster, &books, away_b2b);
            if !record.selection.has_quotes() {
                tracing::debug!(date = %date, "game has no parseable quotes");
            }
            let row = lines_row(&record, &format);
            sink.append(&row)
                .with_context(|| format!("writing {}", config.output.display()))?;
            progress.on_row(&row);
        }
        sink.flush()?;

        let rows = sink.rows_written() - rows_before;
        tracker.record_day(date, played);
        summary.rows_written += rows;
        progress.on_date_complete(date, rows, &Ok(()));
    }

    tracing::info!(rows = summary.rows_written, skipped = summary.dates_skipped, "lines run complete");
    progress.on_run_complete(&summary);
    Ok(summary)
}

fn fetch_games(
    fetcher: &dyn PageFetcher,
    sources: &SourceUrls,
    league: League,
    date: NaiveDate,
    format: &SportFormat,
) -> Result<Vec<PageGame>, DateError> {
    let html = fetcher.fetch(&sources.odds_page(league, date))?;
    Ok(extract_games(&html, format)?)
}

// ── Box scores ──────────────────────────────────────────────────────

/// Scrape every event on every configured date into `config.output`.
///
/// The sink is opened on the first valid event so a fresh file's header can
/// be built from that event's statistic labels.
pub fn run_box_scores(
    config: &RunConfig,
    fetcher: &dyn PageFetcher,
    progress: &dyn ScrapeProgress,
) -> anyhow::Result<RunSummary> {
    let format = config.sport_format();
    let days = config.days();
    let mut sink: Option<CsvSink> = None;
    let mut summary = RunSummary::default();

    tracing::info!(league = %config.league, dates = days.len(), fetcher = fetcher.name(), "box-score run starting");

    for (index, &date) in days.iter().enumerate() {
        progress.on_date_start(date, index, days.len());
        summary.dates += 1;

        let listing = event_urls(fetcher, &config.sources, config.league, date);
        summary.boards_failed += listing.failures.len();
        if listing.all_failed() {
            tracing::warn!(date = %date, "no scoreboard could be read; skipping date");
            summary.dates_skipped += 1;
            progress.on_date_complete(date, 0, &Err(listing.failures.join("; ")));
            continue;
        }

        let mut rows = 0;
        for url in listing.urls {
            summary.events += 1;
            let record = match fetch_box_score(fetcher, &url, &format) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(date = %date, url = %url, error = %e, "skipping event");
                    summary.events_skipped += 1;
                    continue;
                }
            };

            if sink.is_none() {
                sink = Some(open_box_score_sink(&config.output, &record)?);
            }
            if let Some(sink) = sink.as_mut() {
                let row = box_score_row(&record, sink.columns());
                sink.append(&row)
                    .with_context(|| format!("writing {}", config.output.display()))?;
                progress.on_row(&row);
                rows += 1;
            }
        }
        if let Some(sink) = sink.as_mut() {
            sink.flush()?;
        }

        summary.rows_written += rows;
        progress.on_date_complete(date, rows, &Ok(()));
    }

    tracing::info!(
        rows = summary.rows_written,
        events_skipped = summary.events_skipped,
        dates_skipped = summary.dates_skipped,
        "box-score run complete"
    );
    progress.on_run_complete(&summary);
    Ok(summary)
}

fn fetch_box_score(
    fetcher: &dyn PageFetcher,
    url: &str,
    format: &SportFormat,
) -> Result<BoxScoreRecord, DateError> {
    let json = fetcher.fetch(url)?;
    Ok(extract_box_score(&json, format)?)
}

fn open_box_score_sink(path: &Path, sample: &BoxScoreRecord) -> anyhow::Result<CsvSink> {
    let header = box_score_header(&sample.home.stat_columns());
    CsvSink::open(path, &header).with_context(|| format!("opening {}", path.display()))
}

/// Fetch one event summary and append its row to `out`.
pub fn scrape_event(
    event_id: &str,
    league: League,
    sources: &SourceUrls,
    out: &Path,
    fetcher: &dyn PageFetcher,
) -> anyhow::Result<BoxScoreRecord> {
    let url = sources.summary(league, event_id);
    let record = fetch_box_score(fetcher, &url, &league.format())
        .with_context(|| format!("event {event_id}"))?;

    let mut sink = open_box_score_sink(out, &record)?;
    let row = box_score_row(&record, sink.columns());
    sink.append(&row)?;
    sink.flush()?;
    Ok(record)
}
