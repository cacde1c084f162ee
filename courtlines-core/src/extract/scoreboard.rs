//! Scoreboard response parsing — one date's event ids.

use serde::Deserialize;

use super::ExtractError;

#[derive(Debug, Deserialize)]
struct ScoreboardResponse {
    events: Vec<ScoreboardEvent>,
}

#[derive(Debug, Deserialize)]
struct ScoreboardEvent {
    id: String,
}

/// Event ids listed on a scoreboard response, in response order.
pub fn event_ids(json: &str) -> Result<Vec<String>, ExtractError> {
    let resp: ScoreboardResponse =
        serde_json::from_str(json).map_err(|e| ExtractError::MalformedJson(e.to_string()))?;
    Ok(resp.events.into_iter().map(|e| e.id).collect())
}
