//! courtlines core — quotes, line selection, record extraction, date enumeration.
//!
//! This crate holds everything that does not touch the filesystem:
//! - Domain types (quotes, quote sets, line and box-score records)
//! - Best / preferred / worst line selection
//! - Odds-page (HTML) and event-summary (JSON) extractors
//! - League formats and date → URL enumeration
//! - The `PageFetcher` trait and its blocking HTTP implementation

pub mod domain;
pub mod enumerate;
pub mod extract;
pub mod fetch;
pub mod format;
pub mod select;

pub use domain::{BoxScoreRecord, LineRecord, Quote, QuoteSet, TeamBox, TeamLine, Venue};
pub use enumerate::{DateWindow, EventListing, SourceUrls};
pub use extract::ExtractError;
pub use fetch::{FetchError, HttpFetcher, PageFetcher};
pub use format::{League, SportFormat};
pub use select::{select_lines, LineSelection, PreferredBooks};
