//! Odds listing page extraction.
//!
//! Class names below are the page's wire contract:
//!
//! ```text
//! div.eventLines                          (first one only)
//!   div.event-holder.holder-complete      one per finished game
//!     div.scorebox.odd | div.scorebox
//!       div.score-periods  ×2             away, home; spans are period markers
//!     div.el-div.eventLine-team
//!       div.eventLine-value ×2            away, home
//!     div.el-div.eventLine-book  ×N       one per book, two inner divs (away, home)
//! ```

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use super::cells::{collapse_whitespace, parse_quote, parse_team, take_periods};
use super::ExtractError;
use crate::domain::{LineRecord, Quote, QuoteSet, TeamLine};
use crate::format::SportFormat;
use crate::select::{select_lines, PreferredBooks};

/// One game as it appears on the page, before selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGame {
    pub away: TeamLine,
    pub home: TeamLine,
    /// Home quotes in book column order; `None` for unparseable cells.
    pub quotes: Vec<Option<Quote>>,
}

impl PageGame {
    /// Team names present on the page.
    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        [&self.away, &self.home]
            .into_iter()
            .filter_map(|t| t.name.as_deref())
    }

    /// Attach book names, run line selection, and stamp the date.
    pub fn into_record(
        self,
        date: NaiveDate,
        roster: &[String],
        books: &PreferredBooks,
        away_back_to_back: bool,
    ) -> LineRecord {
        let quotes = QuoteSet::from_columns(roster, self.quotes);
        let selection = select_lines(&quotes, books);
        LineRecord {
            date,
            away: self.away,
            home: self.home,
            quotes,
            selection,
            away_back_to_back,
        }
    }
}

struct PageSelectors {
    event_lines: Selector,
    game: Selector,
    scorebox_odd: Selector,
    scorebox: Selector,
    score_periods: Selector,
    span: Selector,
    team_cell: Selector,
    team_value: Selector,
    book_cell: Selector,
    div: Selector,
}

impl PageSelectors {
    fn compile() -> Result<Self, ExtractError> {
        Ok(Self {
            event_lines: selector("div.eventLines")?,
            game: selector("div.event-holder.holder-complete")?,
            scorebox_odd: selector("div.scorebox.odd")?,
            scorebox: selector("div.scorebox")?,
            score_periods: selector("div.score-periods")?,
            span: selector("span")?,
            team_cell: selector("div.el-div.eventLine-team")?,
            team_value: selector("div.eventLine-value")?,
            book_cell: selector("div.el-div.eventLine-book")?,
            div: selector("div")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Extract every finished game from an odds listing page.
///
/// Returns [`ExtractError::NoEventTable`] when the page has no event table;
/// otherwise each game is extracted with per-field degradation.
pub fn extract_games(html: &str, format: &SportFormat) -> Result<Vec<PageGame>, ExtractError> {
    let sel = PageSelectors::compile()?;
    let doc = Html::parse_document(html);

    let table = doc
        .select(&sel.event_lines)
        .next()
        .ok_or(ExtractError::NoEventTable)?;

    Ok(table
        .select(&sel.game)
        .map(|game| extract_game(game, &sel, format))
        .collect())
}

fn extract_game(game: ElementRef<'_>, sel: &PageSelectors, format: &SportFormat) -> PageGame {
    let (away_periods, home_periods) = extract_periods(game, sel, format);
    let (mut away, mut home) = extract_teams(game, sel, format);
    away.periods = away_periods;
    home.periods = home_periods;

    let quotes = game
        .select(&sel.book_cell)
        .map(|cell| extract_book(cell, sel))
        .collect();

    PageGame { away, home, quotes }
}

fn extract_periods(
    game: ElementRef<'_>,
    sel: &PageSelectors,
    format: &SportFormat,
) -> (Option<Vec<String>>, Option<Vec<String>>) {
    let scorebox = game
        .select(&sel.scorebox_odd)
        .next()
        .or_else(|| game.select(&sel.scorebox).next());

    let Some(scorebox) = scorebox else {
        tracing::warn!("game has no score box");
        return (None, None);
    };

    let columns: Vec<ElementRef<'_>> = scorebox.select(&sel.score_periods).collect();
    if columns.len() < 2 {
        tracing::warn!(found = columns.len(), "expected two score-period rows");
        return (None, None);
    }

    let periods = |col: ElementRef<'_>| {
        let markers: Vec<String> = col
            .select(&sel.span)
            .map(|s| collapse_whitespace(&element_text(s)))
            .collect();
        let found = markers.len();
        let periods = take_periods(markers, format.period_count);
        if periods.is_none() {
            tracing::warn!(
                found,
                expected = format.period_count,
                "incorrect number of period scores"
            );
        }
        periods
    };

    (periods(columns[0]), periods(columns[1]))
}

fn extract_teams(
    game: ElementRef<'_>,
    sel: &PageSelectors,
    format: &SportFormat,
) -> (TeamLine, TeamLine) {
    let values: Vec<String> = match game.select(&sel.team_cell).next() {
        Some(cell) => cell.select(&sel.team_value).map(element_text).collect(),
        None => Vec::new(),
    };

    if values.len() < 2 {
        tracing::warn!(found = values.len(), "team names missing");
        return (TeamLine::missing(), TeamLine::missing());
    }

    let team = |text: &str| {
        let (name, rank) = parse_team(text, format.ranked);
        TeamLine {
            name: Some(name),
            rank,
            periods: None,
        }
    };
    (team(&values[0]), team(&values[1]))
}

fn extract_book(cell: ElementRef<'_>, sel: &PageSelectors) -> Option<Quote> {
    let sides: Vec<ElementRef<'_>> = cell.select(&sel.div).collect();
    if sides.len() != 2 {
        tracing::debug!(found = sides.len(), "line parse error: expected two sides");
        return None;
    }
    let text = element_text(sides[1]);
    let quote = parse_quote(&text);
    if quote.is_none() {
        tracing::debug!(text = %text.trim(), "unparseable home line");
    }
    quote
}
