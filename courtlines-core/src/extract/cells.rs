//! Text-level parsing of single page cells: quotes, team names, period markers.

use crate::domain::Quote;

/// Compatibility-normalise cell text before splitting.
///
/// Non-breaking spaces become spaces and half-point fractions (`½`, or its
/// decomposed form `1⁄2`) become `.5`, so `-3½ -110` reads as `-3.5 -110`.
pub fn normalize_cell_text(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .replace('½', "1\u{2044}2")
        .replace("1\u{2044}2", ".5")
}

/// Parse a book cell's home text into a quote.
///
/// The first whitespace token is the line, the second the payout. Missing
/// tokens or non-finite numbers mean the cell is unparseable.
pub fn parse_quote(text: &str) -> Option<Quote> {
    let normalized = normalize_cell_text(text);
    let mut tokens = normalized.split_whitespace();
    let line = tokens.next()?.parse::<f64>().ok()?;
    let payout = tokens.next()?.parse::<f64>().ok()?;
    if !line.is_finite() || !payout.is_finite() {
        return None;
    }
    Some(Quote::new(line, payout))
}

/// Split a team cell into (name, rank).
///
/// For ranked formats a leading `(N)` token is the poll rank:
/// `"(12) Kansas"` → (`Kansas`, `Some(12)`). Anything else is unranked and
/// the whole text is the name.
pub fn parse_team(text: &str, ranked: bool) -> (String, Option<u32>) {
    let text = collapse_whitespace(text);
    if !ranked {
        return (text, None);
    }

    let first = text.split(' ').next().unwrap_or("");
    let (Some(open), Some(close)) = (first.find('('), first.find(')')) else {
        return (text, None);
    };
    if close < open {
        return (text, None);
    }

    let rank = first[open + 1..close].trim().parse::<u32>().ok();
    let name = text[close + 1..].trim().to_string();
    (name, rank)
}

/// Keep the first `count` period markers.
///
/// Fewer markers than expected is a format error and yields `None`.
pub fn take_periods(markers: Vec<String>, count: usize) -> Option<Vec<String>> {
    if markers.len() < count {
        return None;
    }
    Some(markers.into_iter().take(count).collect())
}

/// Collapse runs of whitespace (including newlines from nested markup) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
