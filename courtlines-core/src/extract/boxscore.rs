//! Event summary (box score) extraction.
//!
//! Key paths are the API's wire contract:
//!
//! - `header.id`
//! - `boxscore.teams[]` — `homeAway`, `team.shortDisplayName`, `team.id`,
//!   `statistics[].label`, `statistics[].displayValue`
//! - `plays[-1].homeScore`, `plays[-1].awayScore`
//! - `gameInfo.venue.{shortName,fullName,capacity}`,
//!   `gameInfo.venue.address.{city,state,zipCode}`, `gameInfo.attendance`,
//!   `gameInfo.officials[].displayName`

use serde_json::Value;

use super::ExtractError;
use crate::domain::{BoxScoreRecord, Statistic, TeamBox, Venue};
use crate::format::{ShotLabels, SportFormat};

const MADE_ATTEMPTED: &str = "Made-Attempted";

/// Extract one game's box score from an event summary document.
///
/// A missing or empty statistics block rejects the record; every other
/// missing key degrades only its own field.
pub fn extract_box_score(json: &str, format: &SportFormat) -> Result<BoxScoreRecord, ExtractError> {
    let doc: Value =
        serde_json::from_str(json).map_err(|e| ExtractError::MalformedJson(e.to_string()))?;

    let game_id = doc.pointer("/header/id").and_then(as_text);

    let teams = doc
        .pointer("/boxscore/teams")
        .and_then(Value::as_array)
        .filter(|t| t.len() >= 2 && t.iter().all(has_statistics))
        .ok_or_else(|| ExtractError::MissingStatistics {
            game_id: game_id.clone(),
        })?;

    let (home_json, away_json) = home_and_away(teams);
    let mut home = team_box(home_json);
    let mut away = team_box(away_json);

    let last_play = doc
        .get("plays")
        .and_then(Value::as_array)
        .and_then(|plays| plays.last());
    home.final_score = last_play
        .and_then(|p| p.get("homeScore"))
        .and_then(as_integer);
    away.final_score = last_play
        .and_then(|p| p.get("awayScore"))
        .and_then(as_integer);

    if format.derive_score {
        for team in [&mut home, &mut away] {
            if team.final_score.is_none() {
                let derived = derive_score(team, &format.shots);
                tracing::debug!(
                    game = game_id.as_deref().unwrap_or("?"),
                    team = team.name.as_deref().unwrap_or("?"),
                    derived,
                    "no running score; derived from made baskets"
                );
                team.final_score = Some(derived);
            }
        }
    }

    Ok(BoxScoreRecord {
        game_id,
        home,
        away,
        venue: venue(doc.get("gameInfo")),
    })
}

fn has_statistics(team: &Value) -> bool {
    team.get("statistics")
        .and_then(Value::as_array)
        .is_some_and(|stats| !stats.is_empty())
}

/// Pick (home, away) by `homeAway`, falling back to position (1 = home, 0 = away).
fn home_and_away(teams: &[Value]) -> (&Value, &Value) {
    let side = |want: &str| {
        teams
            .iter()
            .find(|t| t.get("homeAway").and_then(Value::as_str) == Some(want))
    };
    match (side("home"), side("away")) {
        (Some(home), Some(away)) => (home, away),
        _ => (&teams[1], &teams[0]),
    }
}

fn team_box(team: &Value) -> TeamBox {
    let info = team.get("team");
    TeamBox {
        name: info
            .and_then(|t| t.get("shortDisplayName"))
            .and_then(as_text),
        team_id: info.and_then(|t| t.get("id")).and_then(as_text),
        final_score: None,
        stats: team
            .get("statistics")
            .and_then(Value::as_array)
            .map(|stats| split_statistics(stats))
            .unwrap_or_default(),
    }
}

/// Flatten the statistics list into columns.
///
/// `"FG Made-Attempted": "25-60"` becomes `FG-Made = 25`, `FG-Attempted = 60`.
pub fn split_statistics(stats: &[Value]) -> Vec<Statistic> {
    let mut out = Vec::with_capacity(stats.len() + 4);
    for stat in stats {
        let Some(label) = stat.get("label").and_then(Value::as_str) else {
            tracing::warn!("statistic without a label skipped");
            continue;
        };
        let display = stat.get("displayValue").and_then(as_text);

        if label.contains(MADE_ATTEMPTED) {
            let prefix = label.split(' ').next().unwrap_or(label);
            let (made, attempted) = match display.as_deref().and_then(|d| d.split_once('-')) {
                Some((m, a)) => (Some(m.trim().to_string()), Some(a.trim().to_string())),
                None => (None, None),
            };
            out.push(Statistic {
                column: format!("{prefix}-Made"),
                value: made,
            });
            out.push(Statistic {
                column: format!("{prefix}-Attempted"),
                value: attempted,
            });
        } else {
            out.push(Statistic {
                column: label.to_string(),
                value: display,
            });
        }
    }
    out
}

/// `3PT × 3 + (FG − 3PT) × 2 + FT`; 0 if any made count is missing or the
/// total does not fit.
pub fn derive_score(team: &TeamBox, shots: &ShotLabels) -> i64 {
    let made = |label: &str| {
        team.stat(&format!("{label}-Made"))
            .and_then(|v| v.trim().parse::<i64>().ok())
    };
    match (
        made(&shots.field_goals),
        made(&shots.three_pointers),
        made(&shots.free_throws),
    ) {
        (Some(fg), Some(three), Some(ft)) => three
            .checked_mul(3)
            .and_then(|t| fg.checked_sub(three)?.checked_mul(2)?.checked_add(t))
            .and_then(|t| t.checked_add(ft))
            .unwrap_or(0),
        _ => 0,
    }
}

fn venue(info: Option<&Value>) -> Venue {
    let Some(info) = info else {
        return Venue::default();
    };
    let venue = info.get("venue");
    let address = venue.and_then(|v| v.get("address"));
    let field = |obj: Option<&Value>, key: &str| obj.and_then(|o| o.get(key)).and_then(as_text);

    let capacity = venue.and_then(|v| v.get("capacity")).and_then(as_count);
    let attendance = info.get("attendance").and_then(as_count);
    let attendance_ratio = match (attendance, capacity) {
        (Some(a), Some(c)) if c > 0 => Some(a as f64 / c as f64),
        _ => None,
    };

    Venue {
        name: field(venue, "shortName").or_else(|| field(venue, "fullName")),
        city: field(address, "city"),
        state: field(address, "state"),
        zip: field(address, "zipCode"),
        capacity,
        attendance,
        attendance_ratio,
        officials: info.get("officials").and_then(Value::as_array).map(|list| {
            list.iter()
                .filter_map(|o| o.get("displayName").and_then(as_text))
                .collect()
        }),
    }
}

fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_count(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}
