//! CSV column layouts and record → row rendering.
//!
//! This is the only place absent values turn into text markers:
//! `NaN` for text and quotes, `-1` for numbers and period scores.

use std::collections::HashMap;

use courtlines_core::domain::{BoxScoreRecord, LineRecord, Quote, TeamBox, TeamLine};
use courtlines_core::enumerate::display_date;
use courtlines_core::format::SportFormat;

/// Leading column token of a lines file header.
pub const LINES_LEADING: &str = "Date";
/// Leading column token of a box-score file header.
pub const BOX_SCORE_LEADING: &str = "GameID";

pub const MISSING_TEXT: &str = "NaN";
pub const MISSING_NUMBER: &str = "-1";

const VENUE_COLUMNS: [&str; 8] = [
    "Venue",
    "City",
    "State",
    "Zip",
    "Capacity",
    "Attendance",
    "AttendanceRatio",
    "Referees",
];

// ── Lines ───────────────────────────────────────────────────────────

pub fn lines_header(format: &SportFormat) -> Vec<String> {
    let mut header = vec![LINES_LEADING.to_string()];
    for side in ["Away", "Home"] {
        header.push(format!("{side}-Name"));
        if format.ranked {
            header.push(format!("{side}-APRank"));
        }
        header.extend(format.period_labels.iter().map(|l| format!("{side}-{l}")));
    }
    header.extend(
        [
            "OptLine",
            "OptPayout",
            "BovLine",
            "BovPayout",
            "PesLine",
            "PesPayout",
            "Away-B2B-Indicator",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    header
}

pub fn lines_row(record: &LineRecord, format: &SportFormat) -> Vec<String> {
    let mut row = vec![display_date(record.date)];
    push_team_line(&mut row, &record.away, format);
    push_team_line(&mut row, &record.home, format);

    let sel = &record.selection;
    push_quote(&mut row, Some(sel.best));
    push_quote(&mut row, sel.preferred);
    push_quote(&mut row, Some(sel.worst));
    row.push(if record.away_back_to_back { "1" } else { "0" }.to_string());
    row
}

fn push_team_line(row: &mut Vec<String>, team: &TeamLine, format: &SportFormat) {
    row.push(text_or_missing(team.name.as_deref()));
    if format.ranked {
        // Unranked teams render 0; a missing team block has no rank at all.
        row.push(match (&team.name, team.rank) {
            (None, _) => MISSING_TEXT.to_string(),
            (Some(_), rank) => rank.unwrap_or(0).to_string(),
        });
    }
    match &team.periods {
        Some(periods) => row.extend(periods.iter().cloned()),
        None => row.extend((0..format.period_count).map(|_| MISSING_NUMBER.to_string())),
    }
}

fn push_quote(row: &mut Vec<String>, quote: Option<Quote>) {
    match quote {
        Some(q) => {
            row.push(q.line.to_string());
            row.push(q.payout.to_string());
        }
        None => {
            row.push(MISSING_TEXT.to_string());
            row.push(MISSING_TEXT.to_string());
        }
    }
}

// ── Box scores ──────────────────────────────────────────────────────

/// Header derived from one sample event's statistic columns.
pub fn box_score_header(stat_columns: &[String]) -> Vec<String> {
    let mut header = vec![BOX_SCORE_LEADING.to_string()];
    for side in ["Home", "Away"] {
        for col in ["Name", "id", "FinalScore"]
            .iter()
            .map(|s| s.to_string())
            .chain(stat_columns.iter().cloned())
        {
            header.push(format!("{side}-{col}"));
        }
    }
    header.extend(VENUE_COLUMNS.iter().map(|s| s.to_string()));
    header
}

/// Render a record against an existing column order.
///
/// Columns the record does not have render as `NaN`; record values with no
/// column are dropped.
pub fn box_score_row(record: &BoxScoreRecord, columns: &[String]) -> Vec<String> {
    let values = box_score_values(record);
    columns
        .iter()
        .map(|c| {
            values
                .get(c.as_str())
                .cloned()
                .unwrap_or_else(|| MISSING_TEXT.to_string())
        })
        .collect()
}

fn box_score_values(record: &BoxScoreRecord) -> HashMap<String, String> {
    let mut values = HashMap::new();
    values.insert(
        BOX_SCORE_LEADING.to_string(),
        text_or_missing(record.game_id.as_deref()),
    );
    insert_team(&mut values, "Home", &record.home);
    insert_team(&mut values, "Away", &record.away);

    let v = &record.venue;
    let fields = [
        text_or_missing(v.name.as_deref()),
        text_or_missing(v.city.as_deref()),
        text_or_missing(v.state.as_deref()),
        text_or_missing(v.zip.as_deref()),
        number_or_missing(v.capacity),
        number_or_missing(v.attendance),
        v.attendance_ratio
            .map(|r| format!("{r:.4}"))
            .unwrap_or_else(|| MISSING_NUMBER.to_string()),
        v.officials
            .as_ref()
            .map(|o| o.join("-"))
            .unwrap_or_else(|| MISSING_TEXT.to_string()),
    ];
    for (col, value) in VENUE_COLUMNS.iter().zip(fields) {
        values.insert(col.to_string(), value);
    }
    values
}

fn insert_team(values: &mut HashMap<String, String>, side: &str, team: &TeamBox) {
    values.insert(format!("{side}-Name"), text_or_missing(team.name.as_deref()));
    values.insert(format!("{side}-id"), text_or_missing(team.team_id.as_deref()));
    values.insert(format!("{side}-FinalScore"), number_or_missing(team.final_score));
    for stat in &team.stats {
        values.insert(
            format!("{side}-{}", stat.column),
            text_or_missing(stat.value.as_deref()),
        );
    }
}

fn text_or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING_TEXT).to_string()
}

fn number_or_missing<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_NUMBER.to_string())
}
