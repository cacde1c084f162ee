//! Back-to-back tracking across consecutive dates.

use std::collections::HashSet;

use chrono::NaiveDate;

/// Remembers which teams played on the most recently recorded date.
///
/// A team is on a back-to-back only when that date is the calendar day
/// immediately before the one being asked about. A gap in the enumerated
/// dates (or the first date of a run) never produces a flag.
#[derive(Debug, Default)]
pub struct BackToBack {
    last_date: Option<NaiveDate>,
    teams: HashSet<String>,
}

impl BackToBack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played_day_before(&self, team: &str, date: NaiveDate) -> bool {
        match self.last_date {
            Some(last) => last.succ_opt() == Some(date) && self.teams.contains(team),
            None => false,
        }
    }

    /// Replace the remembered date and its teams.
    pub fn record_day<I, S>(&mut self, date: NaiveDate, teams: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.last_date = Some(date);
        self.teams = teams.into_iter().map(Into::into).collect();
    }
}
