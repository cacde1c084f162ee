//! Best / preferred / worst line selection over a quote set.
//!
//! "Best" and "worst" are from the home bettor's point of view: the larger
//! the home line, the better (-3 beats -3.5, +3 beats +2.5). Payout breaks
//! ties. Unparsed cells never take part.

use serde::{Deserialize, Serialize};

use crate::domain::{Quote, QuoteSet};

/// Which books supply the "preferred" quote.
///
/// The preferred book is looked up by name; if its cell is missing or
/// unparsed the fallback book is used as-is, with no further fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredBooks {
    pub preferred: String,
    pub fallback: String,
}

impl Default for PreferredBooks {
    fn default() -> Self {
        Self {
            preferred: "Bovada".into(),
            fallback: "BetOnline".into(),
        }
    }
}

/// Result of selecting over one quote set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSelection {
    /// Most home-favorable quote, or [`Quote::FLOOR`] if none parsed.
    pub best: Quote,
    /// Preferred book's quote (after one fallback), `None` if unparsed.
    pub preferred: Option<Quote>,
    /// Least home-favorable quote, or [`Quote::CEILING`] if none parsed.
    pub worst: Quote,
}

impl LineSelection {
    /// False when no book in the set had a parseable quote.
    pub fn has_quotes(&self) -> bool {
        self.best != Quote::FLOOR
    }
}

/// Most home-favorable quote: largest line, then larger payout.
pub fn best_for_home(quotes: &QuoteSet) -> Quote {
    quotes.present().fold(Quote::FLOOR, |best, q| {
        if q.line > best.line || (q.line == best.line && q.payout > best.payout) {
            *q
        } else {
            best
        }
    })
}

/// Least home-favorable quote: smallest line, then smaller payout.
pub fn worst_for_home(quotes: &QuoteSet) -> Quote {
    quotes.present().fold(Quote::CEILING, |worst, q| {
        if q.line < worst.line || (q.line == worst.line && q.payout < worst.payout) {
            *q
        } else {
            worst
        }
    })
}

/// The preferred book's quote, falling back once to the alternate book.
pub fn preferred_quote(quotes: &QuoteSet, books: &PreferredBooks) -> Option<Quote> {
    match quotes.book(&books.preferred).flatten() {
        Some(q) => Some(q),
        None => quotes.book(&books.fallback).flatten(),
    }
}

/// Run all three selections.
pub fn select_lines(quotes: &QuoteSet, books: &PreferredBooks) -> LineSelection {
    LineSelection {
        best: best_for_home(quotes),
        preferred: preferred_quote(quotes, books),
        worst: worst_for_home(quotes),
    }
}
