//! Run configuration, loaded once from TOML and immutable afterwards.
//!
//! ```toml
//! league = "ncaab"
//! output = "GameSpreads1718.csv"
//!
//! [[windows]]
//! start = "2017-11-10"
//! end = "2017-11-30"
//!
//! [books]
//! preferred = "Bovada"
//! fallback = "BetOnline"
//! ```
//!
//! `[books]`, `[sources]` and `[format]` are optional; `format` defaults to
//! the league's standard game format.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use courtlines_core::enumerate::{enumerate_days, DateWindow, SourceUrls};
use courtlines_core::format::{League, SportFormat};
use courtlines_core::select::PreferredBooks;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config has no date windows")]
    EmptyWindows,

    #[error("date window {start}..{end} ends before it starts")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("book '{0}' is not in the book roster")]
    UnknownBook(String),

    #[error("invalid game format: {0}")]
    Format(String),
}

/// Book column order on the odds page plus the preferred/fallback pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub roster: Vec<String>,
    pub preferred: String,
    pub fallback: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        let preferred = PreferredBooks::default();
        Self {
            roster: [
                "Pinnacle",
                "5Dimes",
                "Bookmaker",
                "BetOnline",
                "Bovada",
                "Heritage",
                "Intertops",
                "YouWager",
                "JustBet",
                "SportsBetting",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            preferred: preferred.preferred,
            fallback: preferred.fallback,
        }
    }
}

impl BookConfig {
    pub fn preferred_books(&self) -> PreferredBooks {
        PreferredBooks {
            preferred: self.preferred.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub league: League,
    /// CSV file rows are appended to.
    pub output: PathBuf,
    /// Echo each written row to stdout.
    #[serde(default)]
    pub show: bool,
    pub windows: Vec<DateWindow>,
    #[serde(default)]
    pub books: BookConfig,
    #[serde(default)]
    pub sources: SourceUrls,
    /// Overrides the league's default game format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SportFormat>,
}

impl RunConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A one-season starting point for `league`.
    pub fn template(league: League) -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let (windows, output) = match league {
            League::Nba => (
                vec![
                    DateWindow::new(date(2017, 10, 17), date(2017, 12, 31)),
                    DateWindow::new(date(2018, 1, 1), date(2018, 4, 11)),
                ],
                "nba_lines_1718.csv",
            ),
            League::Ncaab => (
                vec![
                    DateWindow::new(date(2017, 11, 10), date(2017, 12, 31)),
                    DateWindow::new(date(2018, 1, 1), date(2018, 4, 2)),
                ],
                "ncaab_lines_1718.csv",
            ),
        };
        Self {
            league,
            output: PathBuf::from(output),
            show: false,
            windows,
            books: BookConfig::default(),
            sources: SourceUrls::default(),
            format: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.windows.is_empty() {
            return Err(ConfigError::EmptyWindows);
        }
        if let Some(w) = self.windows.iter().find(|w| !w.is_valid()) {
            return Err(ConfigError::InvalidWindow {
                start: w.start,
                end: w.end,
            });
        }
        for book in [&self.books.preferred, &self.books.fallback] {
            if !self
                .books
                .roster
                .iter()
                .any(|b| b.eq_ignore_ascii_case(book))
            {
                return Err(ConfigError::UnknownBook(book.clone()));
            }
        }
        self.sport_format().validate().map_err(ConfigError::Format)
    }

    /// The effective game format.
    pub fn sport_format(&self) -> SportFormat {
        self.format.clone().unwrap_or_else(|| self.league.format())
    }

    /// Every date the run will visit, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        enumerate_days(&self.windows)
    }
}
