//! Extracted game records for the two pipelines.
//!
//! Records are built once per event and never mutated afterwards. Fields the
//! source did not provide are `None`; rendering them to text markers is the
//! sink's concern.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quote::QuoteSet;
use crate::select::LineSelection;

// ── Lines pipeline ──────────────────────────────────────────────────

/// One team's row on the odds page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLine {
    /// `None` when the team block is missing from the page.
    pub name: Option<String>,
    /// Poll rank for ranked formats; `None` means unranked.
    pub rank: Option<u32>,
    /// Exactly `period_count` markers, or `None` on a format error.
    pub periods: Option<Vec<String>>,
}

impl TeamLine {
    pub fn missing() -> Self {
        Self {
            name: None,
            rank: None,
            periods: None,
        }
    }
}

/// One game from the odds listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub date: NaiveDate,
    pub away: TeamLine,
    pub home: TeamLine,
    pub quotes: QuoteSet,
    pub selection: LineSelection,
    /// Whether the away team played on the previous calendar day.
    pub away_back_to_back: bool,
}

// ── Box-score pipeline ──────────────────────────────────────────────

/// A single team statistic column, already split into `-Made` / `-Attempted`
/// where the source reports a combined value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub column: String,
    pub value: Option<String>,
}

/// One team's box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBox {
    pub name: Option<String>,
    pub team_id: Option<String>,
    pub final_score: Option<i64>,
    pub stats: Vec<Statistic>,
}

impl TeamBox {
    /// Value of a statistic column, if present and parsed.
    pub fn stat(&self, column: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.column == column)
            .and_then(|s| s.value.as_deref())
    }

    /// Statistic column names in source order.
    pub fn stat_columns(&self) -> Vec<String> {
        self.stats.iter().map(|s| s.column.clone()).collect()
    }
}

/// Venue and crowd metadata for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub capacity: Option<u64>,
    pub attendance: Option<u64>,
    pub attendance_ratio: Option<f64>,
    pub officials: Option<Vec<String>>,
}

/// One game from the event summary API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScoreRecord {
    pub game_id: Option<String>,
    pub home: TeamBox,
    pub away: TeamBox,
    pub venue: Venue,
}
