//! Progress reporting for scrape runs.

use chrono::NaiveDate;

use crate::pipeline::RunSummary;

/// Progress callback for multi-date runs.
pub trait ScrapeProgress: Send {
    /// Called before a date's pages are fetched.
    fn on_date_start(&self, date: NaiveDate, index: usize, total: usize);

    /// Called after a date is processed; `rows` is how many rows it wrote.
    fn on_date_complete(&self, date: NaiveDate, rows: usize, result: &Result<(), String>);

    /// Called for every row appended to the sink.
    fn on_row(&self, row: &[String]);

    /// Called once when the run is done.
    fn on_run_complete(&self, summary: &RunSummary);
}

/// Prints progress to stdout. With `show_rows`, each written row is echoed.
pub struct StdoutProgress {
    pub show_rows: bool,
}

impl ScrapeProgress for StdoutProgress {
    fn on_date_start(&self, date: NaiveDate, index: usize, total: usize) {
        println!("[{}/{}] {date}", index + 1, total);
    }

    fn on_date_complete(&self, date: NaiveDate, rows: usize, result: &Result<(), String>) {
        match result {
            Ok(()) => println!("  {date}: {rows} rows"),
            Err(e) => println!("  {date}: skipped ({e})"),
        }
    }

    fn on_row(&self, row: &[String]) {
        if self.show_rows {
            println!("{}", row.join(","));
        }
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        println!(
            "\nDone: {} dates, {} rows written, {} dates skipped, {} events skipped",
            summary.dates, summary.rows_written, summary.dates_skipped, summary.events_skipped
        );
        if summary.boards_failed > 0 {
            println!("{} scoreboards could not be read", summary.boards_failed);
        }
    }
}

/// Discards all progress events.
pub struct NoProgress;

impl ScrapeProgress for NoProgress {
    fn on_date_start(&self, _date: NaiveDate, _index: usize, _total: usize) {}
    fn on_date_complete(&self, _date: NaiveDate, _rows: usize, _result: &Result<(), String>) {}
    fn on_row(&self, _row: &[String]) {}
    fn on_run_complete(&self, _summary: &RunSummary) {}
}
