//! Domain types for courtlines

pub mod quote;
pub mod record;

pub use quote::{BookQuote, Quote, QuoteSet};
pub use record::{BoxScoreRecord, LineRecord, Statistic, TeamBox, TeamLine, Venue};
