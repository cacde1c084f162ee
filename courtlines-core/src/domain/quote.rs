//! Quotes and quote sets — one book's price for the home side of a market.

use serde::{Deserialize, Serialize};

/// A single book's (line, payout) pair, expressed for the home team.
///
/// `line` is the spread applied to the home team: a more positive (less
/// negative) line favors the home bettor. `payout` is the quoted odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub line: f64,
    pub payout: f64,
}

impl Quote {
    /// Unreachable floor for best-for-home selection ("no valid quote").
    pub const FLOOR: Quote = Quote {
        line: -999.0,
        payout: -999.0,
    };

    /// Unreachable ceiling for worst-for-home selection ("no valid quote").
    pub const CEILING: Quote = Quote {
        line: 999.0,
        payout: 999.0,
    };

    pub fn new(line: f64, payout: f64) -> Self {
        Self { line, payout }
    }

    /// True for the selector's floor/ceiling markers.
    pub fn is_unreachable(&self) -> bool {
        *self == Self::FLOOR || *self == Self::CEILING
    }
}

/// One book column on the odds page: its name and the parsed quote, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookQuote {
    pub book: String,
    pub quote: Option<Quote>,
}

/// All books' quotes for one game and market, in page column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSet {
    entries: Vec<BookQuote>,
}

impl QuoteSet {
    /// Pair raw quotes with book names by position.
    ///
    /// Columns beyond the roster are named `book-<index>`.
    pub fn from_columns(roster: &[String], quotes: Vec<Option<Quote>>) -> Self {
        let entries = quotes
            .into_iter()
            .enumerate()
            .map(|(i, quote)| BookQuote {
                book: roster
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("book-{i}")),
                quote,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[BookQuote] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parsed quotes only, in column order.
    pub fn present(&self) -> impl Iterator<Item = &Quote> {
        self.entries.iter().filter_map(|e| e.quote.as_ref())
    }

    /// Look up a book by name (case-insensitive).
    ///
    /// Returns `None` if the book has no column; `Some(None)` if the column
    /// exists but its cell could not be parsed.
    pub fn book(&self, name: &str) -> Option<Option<Quote>> {
        self.entries
            .iter()
            .find(|e| e.book.eq_ignore_ascii_case(name))
            .map(|e| e.quote)
    }
}
