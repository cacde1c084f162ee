//! Record extraction from raw page and API content.
//!
//! Extraction degrades field by field. Only two conditions reject a whole
//! unit: a listing page with no event table (the date is skipped) and an
//! event summary with no statistics block (the event is skipped).

pub mod boxscore;
pub mod cells;
pub mod odds_page;
pub mod scoreboard;

pub use boxscore::extract_box_score;
pub use odds_page::{extract_games, PageGame};
pub use scoreboard::event_ids;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no event table on page")]
    NoEventTable,

    #[error("statistics block missing for game {}", game_id.as_deref().unwrap_or("<unknown>"))]
    MissingStatistics { game_id: Option<String> },

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("invalid CSS selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}
