//! Date enumeration — dates to source URLs.
//!
//! The lines pipeline needs one listing page per date. The box-score
//! pipeline needs a scoreboard per date (two during tournament months) and
//! then one summary URL per listed event.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::extract::event_ids;
use crate::fetch::PageFetcher;
use crate::format::League;

/// Inclusive range of dates to process, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Every date in the window, ascending. Empty if the window is inverted.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// All dates across a list of windows, window by window.
pub fn enumerate_days(windows: &[DateWindow]) -> Vec<NaiveDate> {
    windows.iter().flat_map(|w| w.days()).collect()
}

/// `MM-DD-YYYY`, the date column format.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%m-%d-%Y").to_string()
}

fn url_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Base URLs and scoreboard grouping parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceUrls {
    /// Odds listing root; the league market and `?date=` are appended.
    pub odds_base: String,
    /// Scoreboard/summary API root; the league sport path is appended.
    pub api_base: String,
    /// Scoreboard `groups` value for the regular season listing.
    pub regular_group: String,
    /// Scoreboard `groups` value for the tournament listing.
    pub tournament_group: String,
    /// Months (1-12) in which the tournament listing is also queried.
    pub tournament_months: Vec<u32>,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            odds_base: "https://www.sportsbookreview.com/betting-odds".into(),
            api_base: "https://site.api.espn.com/apis/site/v2/sports/basketball".into(),
            regular_group: "50".into(),
            tournament_group: "100".into(),
            tournament_months: vec![3, 4],
        }
    }
}

impl SourceUrls {
    /// Listing page for one date.
    pub fn odds_page(&self, league: League, date: NaiveDate) -> String {
        format!(
            "{}/{}/?date={}",
            self.odds_base.trim_end_matches('/'),
            league.odds_market(),
            url_date(date)
        )
    }

    /// Scoreboard URLs for one date: the regular grouping, plus the
    /// tournament grouping during tournament months.
    pub fn scoreboards(&self, league: League, date: NaiveDate) -> Vec<String> {
        let mut groups = vec![self.regular_group.as_str()];
        if self.tournament_months.contains(&date.month()) {
            groups.push(self.tournament_group.as_str());
        }
        groups
            .into_iter()
            .map(|group| {
                format!(
                    "{}/{}/scoreboard?dates={}&groups={group}&limit=400",
                    self.api_base.trim_end_matches('/'),
                    league.api_sport(),
                    url_date(date)
                )
            })
            .collect()
    }

    /// Summary URL for one event.
    pub fn summary(&self, league: League, event_id: &str) -> String {
        format!(
            "{}/{}/summary?event={event_id}",
            self.api_base.trim_end_matches('/'),
            league.api_sport()
        )
    }
}

/// Summary URLs for one date, plus the scoreboards that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListing {
    pub urls: Vec<String>,
    /// Number of scoreboards queried.
    pub boards: usize,
    /// One message per scoreboard that failed to fetch or decode.
    pub failures: Vec<String>,
}

impl EventListing {
    /// True when every queried scoreboard failed.
    pub fn all_failed(&self) -> bool {
        self.boards > 0 && self.failures.len() == self.boards
    }
}

/// Summary URLs for every event on one date.
///
/// Each scoreboard is fetched in turn and the id lists are concatenated. A
/// scoreboard that fails to fetch or decode contributes nothing; the error is
/// logged and recorded in [`EventListing::failures`].
pub fn event_urls(
    fetcher: &dyn PageFetcher,
    urls: &SourceUrls,
    league: League,
    date: NaiveDate,
) -> EventListing {
    let mut listing = EventListing::default();
    for scoreboard in urls.scoreboards(league, date) {
        listing.boards += 1;
        let ids = match fetcher.fetch(&scoreboard) {
            Ok(body) => match event_ids(&body) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!(date = %date, url = %scoreboard, error = %e, "undecodable scoreboard");
                    listing.failures.push(e.to_string());
                    continue;
                }
            },
            Err(e) => {
                tracing::warn!(date = %date, error = %e, "scoreboard fetch failed");
                listing.failures.push(e.to_string());
                continue;
            }
        };
        listing
            .urls
            .extend(ids.iter().map(|id| urls.summary(league, id)));
    }
    listing
}
