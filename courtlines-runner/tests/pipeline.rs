//! Integration tests for the lines and box-score pipelines.
//!
//! Pages are served from memory by a map-backed fetcher using the saved
//! fixtures in courtlines-core's test directory; output goes to temp dirs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use courtlines_core::enumerate::{DateWindow, SourceUrls};
use courtlines_core::fetch::{FetchError, PageFetcher};
use courtlines_core::format::League;
use courtlines_runner::{run_box_scores, run_lines, scrape_event, NoProgress, RunConfig};

// ── Helpers ──────────────────────────────────────────────────────────

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("courtlines-core/tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

/// Serves fixed bodies by URL; anything else is a 404.
#[derive(Default)]
struct MapFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    fn serve(&mut self, url: String, body: String) {
        self.pages.insert(url, body);
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for MapFetcher {
    fn name(&self) -> &str {
        "map"
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn config(league: League, output: &Path, windows: Vec<DateWindow>) -> RunConfig {
    let mut config = RunConfig::template(league);
    config.output = output.to_path_buf();
    config.windows = windows;
    config
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

fn column(header: &[String], row: &[String], name: &str) -> String {
    let idx = header.iter().position(|h| h == name).unwrap();
    row[idx].clone()
}

// ── Lines ───────────────────────────────────────────────────────────

fn nba_fetcher(days: &[NaiveDate]) -> MapFetcher {
    let urls = SourceUrls::default();
    let page = fixture("odds_nba.html");
    let mut fetcher = MapFetcher::default();
    for &day in days {
        fetcher.serve(urls.odds_page(League::Nba, day), page.clone());
    }
    fetcher
}

#[test]
fn lines_rows_round_trip_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("lines.csv");
    let fetcher = nba_fetcher(&[d(2017, 12, 3)]);
    let cfg = config(
        League::Nba,
        &out,
        vec![DateWindow::new(d(2017, 12, 3), d(2017, 12, 3))],
    );

    let summary = run_lines(&cfg, &fetcher, &NoProgress).unwrap();
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.dates_skipped, 0);

    let (header, rows) = read_rows(&out);
    assert_eq!(header.len(), 20);
    assert_eq!(rows.len(), 2);

    let boston = &rows[0];
    assert_eq!(boston.len(), header.len());
    assert_eq!(column(&header, boston, "Date"), "12-03-2017");
    assert_eq!(column(&header, boston, "Away-Name"), "Boston");
    assert_eq!(column(&header, boston, "Home-FinalScore"), "101");
    assert_eq!(column(&header, boston, "OptLine"), "-3");
    assert_eq!(column(&header, boston, "OptPayout"), "1.95");
    assert_eq!(column(&header, boston, "BovLine"), "-4");
    assert_eq!(column(&header, boston, "PesLine"), "-4");
    assert_eq!(column(&header, boston, "PesPayout"), "1.91");
    assert_eq!(column(&header, boston, "Away-B2B-Indicator"), "0");

    let denver = &rows[1];
    assert_eq!(column(&header, denver, "Away-FinalScore"), "-1");
    assert_eq!(column(&header, denver, "Away-4thQuarter"), "-1");
    assert_eq!(column(&header, denver, "BovLine"), "2");
    assert_eq!(column(&header, denver, "BovPayout"), "-105");
}

#[test]
fn consecutive_days_flag_back_to_back_and_failed_dates_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("lines.csv");
    // Dec 5 is not served.
    let fetcher = nba_fetcher(&[d(2017, 12, 3), d(2017, 12, 4)]);
    let cfg = config(
        League::Nba,
        &out,
        vec![DateWindow::new(d(2017, 12, 3), d(2017, 12, 5))],
    );

    let summary = run_lines(&cfg, &fetcher, &NoProgress).unwrap();
    assert_eq!(summary.dates, 3);
    assert_eq!(summary.dates_skipped, 1);
    assert_eq!(summary.rows_written, 4);
    assert_eq!(fetcher.requested().len(), 3);

    let (header, rows) = read_rows(&out);
    let flags: Vec<String> = rows
        .iter()
        .map(|r| column(&header, r, "Away-B2B-Indicator"))
        .collect();
    assert_eq!(flags, vec!["0", "0", "1", "1"]);
}

#[test]
fn gap_between_windows_clears_back_to_back() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("lines.csv");
    let fetcher = nba_fetcher(&[d(2017, 12, 3), d(2017, 12, 5)]);
    let cfg = config(
        League::Nba,
        &out,
        vec![
            DateWindow::new(d(2017, 12, 3), d(2017, 12, 3)),
            DateWindow::new(d(2017, 12, 5), d(2017, 12, 5)),
        ],
    );

    run_lines(&cfg, &fetcher, &NoProgress).unwrap();
    let (header, rows) = read_rows(&out);
    assert!(rows
        .iter()
        .all(|r| column(&header, r, "Away-B2B-Indicator") == "0"));
}

#[test]
fn second_run_never_duplicates_header() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("lines.csv");
    let fetcher = nba_fetcher(&[d(2017, 12, 3)]);
    let cfg = config(
        League::Nba,
        &out,
        vec![DateWindow::new(d(2017, 12, 3), d(2017, 12, 3))],
    );

    run_lines(&cfg, &fetcher, &NoProgress).unwrap();
    run_lines(&cfg, &fetcher, &NoProgress).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().filter(|l| l.starts_with("Date,")).count(), 1);
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn college_lines_carry_rank_columns() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ncaab.csv");
    let day = d(2018, 1, 2);
    let mut fetcher = MapFetcher::default();
    fetcher.serve(
        SourceUrls::default().odds_page(League::Ncaab, day),
        fixture("odds_ncaab.html"),
    );
    let cfg = config(League::Ncaab, &out, vec![DateWindow::new(day, day)]);

    run_lines(&cfg, &fetcher, &NoProgress).unwrap();
    let (header, rows) = read_rows(&out);
    assert_eq!(column(&header, &rows[0], "Away-APRank"), "12");
    assert_eq!(column(&header, &rows[0], "Home-APRank"), "0");
    assert_eq!(column(&header, &rows[0], "Home-2ndHalf"), "32");
    assert_eq!(column(&header, &rows[0], "BovLine"), "NaN");
    assert_eq!(column(&header, &rows[0], "OptLine"), "3");
}

// ── Box scores ──────────────────────────────────────────────────────

fn scoreboard(ids: &[&str]) -> String {
    let events: Vec<String> = ids.iter().map(|id| format!(r#"{{"id": "{id}"}}"#)).collect();
    format!(r#"{{"events": [{}]}}"#, events.join(","))
}

/// Tournament-month date: regular board lists two events, tournament board one.
fn tournament_fetcher(day: NaiveDate) -> MapFetcher {
    let urls = SourceUrls::default();
    let boards = urls.scoreboards(League::Ncaab, day);
    assert_eq!(boards.len(), 2);

    let summary = fixture("summary.json");
    let mut fetcher = MapFetcher::default();
    fetcher.serve(boards[0].clone(), scoreboard(&["400947324", "401025814"]));
    fetcher.serve(boards[1].clone(), scoreboard(&["401025815"]));
    fetcher.serve(urls.summary(League::Ncaab, "400947324"), summary.clone());
    fetcher.serve(
        urls.summary(League::Ncaab, "401025814"),
        r#"{"header": {"id": "401025814"}, "boxscore": {}}"#.to_string(),
    );
    fetcher.serve(
        urls.summary(League::Ncaab, "401025815"),
        summary.replace("400947324", "401025815"),
    );
    fetcher
}

#[test]
fn box_scores_concatenate_boards_and_skip_invalid_events() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("box.csv");
    let day = d(2018, 3, 15);
    let fetcher = tournament_fetcher(day);
    let cfg = config(League::Ncaab, &out, vec![DateWindow::new(day, day)]);

    let summary = run_box_scores(&cfg, &fetcher, &NoProgress).unwrap();
    assert_eq!(summary.events, 3);
    assert_eq!(summary.events_skipped, 1);
    assert_eq!(summary.boards_failed, 0);
    assert_eq!(summary.rows_written, 2);

    let (header, rows) = read_rows(&out);
    assert_eq!(header[0], "GameID");
    assert_eq!(header.last().map(String::as_str), Some("Referees"));
    let ids: Vec<String> = rows.iter().map(|r| r[0].clone()).collect();
    assert_eq!(ids, vec!["400947324", "401025815"]);

    let row = &rows[0];
    assert_eq!(column(&header, row, "Home-Name"), "UNC");
    assert_eq!(column(&header, row, "Away-FinalScore"), "81");
    assert_eq!(column(&header, row, "Home-FG-Made"), "31");
    assert_eq!(column(&header, row, "Away-3PT-Attempted"), "21");
    assert_eq!(column(&header, row, "Venue"), "Dean Smith Center");
    assert_eq!(column(&header, row, "AttendanceRatio"), "1.0000");
    assert_eq!(
        column(&header, row, "Referees"),
        "Roger Ayers-Ted Valentine-Mike Eades"
    );
}

#[test]
fn box_scores_follow_existing_header_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("box.csv");
    std::fs::write(&out, "GameID,Referees,Away-FinalScore,Home-Steals\n").unwrap();
    let day = d(2018, 3, 15);
    let fetcher = tournament_fetcher(day);
    let cfg = config(League::Ncaab, &out, vec![DateWindow::new(day, day)]);

    run_box_scores(&cfg, &fetcher, &NoProgress).unwrap();
    let (header, rows) = read_rows(&out);
    assert_eq!(header.len(), 4);
    assert_eq!(
        rows[0],
        vec![
            "400947324",
            "Roger Ayers-Ted Valentine-Mike Eades",
            "81",
            "NaN"
        ]
    );
}

#[test]
fn missing_scoreboard_yields_no_events() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("box.csv");
    let day = d(2018, 2, 10);
    let fetcher = MapFetcher::default();
    let cfg = config(League::Ncaab, &out, vec![DateWindow::new(day, day)]);

    let summary = run_box_scores(&cfg, &fetcher, &NoProgress).unwrap();
    assert_eq!(summary.events, 0);
    assert_eq!(summary.rows_written, 0);
    assert_eq!(summary.boards_failed, 1);
    assert_eq!(summary.dates_skipped, 1);
    assert_eq!(fetcher.requested().len(), 1);
    assert!(!out.exists());
}

#[test]
fn one_readable_board_keeps_the_date() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("box.csv");
    let day = d(2018, 3, 15);
    let urls = SourceUrls::default();
    let boards = urls.scoreboards(League::Ncaab, day);
    let mut fetcher = MapFetcher::default();
    fetcher.serve(boards[0].clone(), scoreboard(&["400947324"]));
    fetcher.serve(urls.summary(League::Ncaab, "400947324"), fixture("summary.json"));
    let cfg = config(League::Ncaab, &out, vec![DateWindow::new(day, day)]);

    let summary = run_box_scores(&cfg, &fetcher, &NoProgress).unwrap();
    assert_eq!(summary.boards_failed, 1);
    assert_eq!(summary.dates_skipped, 0);
    assert_eq!(summary.rows_written, 1);
}

#[test]
fn header_comes_from_first_event_with_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("box.csv");
    let day = d(2018, 2, 10);
    let urls = SourceUrls::default();
    let summary = fixture("summary.json");
    let postponed = r#"{
        "header": {"id": "401000001"},
        "boxscore": {"teams": [
            {"homeAway": "away", "team": {"id": "150", "shortDisplayName": "Duke"}, "statistics": []},
            {"homeAway": "home", "team": {"id": "153", "shortDisplayName": "UNC"}, "statistics": []}
        ]}
    }"#;

    let mut fetcher = MapFetcher::default();
    fetcher.serve(
        urls.scoreboards(League::Ncaab, day)[0].clone(),
        scoreboard(&["401000001", "400947324"]),
    );
    fetcher.serve(urls.summary(League::Ncaab, "401000001"), postponed.to_string());
    fetcher.serve(urls.summary(League::Ncaab, "400947324"), summary);
    let cfg = config(League::Ncaab, &out, vec![DateWindow::new(day, day)]);

    let run = run_box_scores(&cfg, &fetcher, &NoProgress).unwrap();
    assert_eq!(run.events, 2);
    assert_eq!(run.events_skipped, 1);

    let (header, rows) = read_rows(&out);
    assert!(header.iter().any(|h| h == "Home-FG-Made"));
    assert_eq!(rows.len(), 1);
    assert_eq!(column(&header, &rows[0], "Home-FG-Made"), "31");
}

#[test]
fn single_event_scrape_writes_header_and_row() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("event.csv");
    let fetcher = tournament_fetcher(d(2018, 3, 15));

    let record = scrape_event(
        "400947324",
        League::Ncaab,
        &SourceUrls::default(),
        &out,
        &fetcher,
    )
    .unwrap();
    assert_eq!(record.home.final_score, Some(83));

    let (header, rows) = read_rows(&out);
    assert_eq!(rows.len(), 1);
    assert_eq!(column(&header, &rows[0], "Home-FinalScore"), "83");
}

#[test]
fn single_event_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("event.csv");
    let err = scrape_event(
        "999",
        League::Nba,
        &SourceUrls::default(),
        &out,
        &MapFetcher::default(),
    );
    assert!(err.is_err());
    assert!(!out.exists());
}
