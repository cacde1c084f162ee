//! League and game-format parameters.
//!
//! One extractor serves every league; everything that differs between a
//! half-based college game and a quarter-based pro game lives here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported leagues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nba,
    Ncaab,
}

impl League {
    /// Market path segment on the odds site.
    pub fn odds_market(&self) -> &'static str {
        match self {
            League::Nba => "nba-basketball/1st-half",
            League::Ncaab => "ncaa-basketball",
        }
    }

    /// Sport path segment on the scoreboard/summary API.
    pub fn api_sport(&self) -> &'static str {
        match self {
            League::Nba => "nba",
            League::Ncaab => "mens-college-basketball",
        }
    }

    pub fn format(&self) -> SportFormat {
        match self {
            League::Nba => SportFormat::quarters(),
            League::Ncaab => SportFormat::halves(),
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            League::Nba => write!(f, "nba"),
            League::Ncaab => write!(f, "ncaab"),
        }
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nba" => Ok(League::Nba),
            "ncaab" | "ncaa" => Ok(League::Ncaab),
            other => Err(format!("unknown league '{other}' (expected nba or ncaab)")),
        }
    }
}

/// Box-score labels whose `-Made` counts feed score derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotLabels {
    pub field_goals: String,
    pub three_pointers: String,
    pub free_throws: String,
}

impl Default for ShotLabels {
    fn default() -> Self {
        Self {
            field_goals: "FG".into(),
            three_pointers: "3PT".into(),
            free_throws: "FT".into(),
        }
    }
}

/// Format-specific extraction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportFormat {
    /// Period markers per team, including the final/total slot.
    pub period_count: usize,
    /// Column suffixes for each period marker, in page order.
    pub period_labels: Vec<String>,
    /// Split a leading `(N)` poll rank off team names.
    pub ranked: bool,
    /// Derive a final score from made-basket counts when no running score exists.
    pub derive_score: bool,
    #[serde(default)]
    pub shots: ShotLabels,
}

impl SportFormat {
    /// Four quarters plus the final slot.
    pub fn quarters() -> Self {
        Self {
            period_count: 5,
            period_labels: ["FinalScore", "1stQuarter", "2ndQuarter", "3rdQuarter", "4thQuarter"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ranked: false,
            derive_score: true,
            shots: ShotLabels::default(),
        }
    }

    /// Two halves plus the final slot, with poll ranks.
    pub fn halves() -> Self {
        Self {
            period_count: 3,
            period_labels: ["FinalScore", "1stHalf", "2ndHalf"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ranked: true,
            derive_score: true,
            shots: ShotLabels::default(),
        }
    }

    /// Check the label list matches the period count.
    pub fn validate(&self) -> Result<(), String> {
        if self.period_count == 0 {
            return Err("period_count must be at least 1".into());
        }
        if self.period_labels.len() != self.period_count {
            return Err(format!(
                "period_labels has {} entries but period_count is {}",
                self.period_labels.len(),
                self.period_count
            ));
        }
        Ok(())
    }
}
