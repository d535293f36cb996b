use serde::{Deserialize, Serialize};
use sql_middleware::middleware::{CustomDbRow, RowValues};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Golfer {
    pub ghin_number: String,
    pub player_name: String,
    pub handicap_index: Option<f64>,
    pub ph_blue: Option<f64>,
    pub ph_gold: Option<f64>,
    pub ph_black: Option<f64>,
    pub ph_white: Option<f64>,
    pub ph_green: Option<f64>,
    pub is_regular: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub game_id: i64,
    pub game_name: String,
    pub game_type: String,
    pub num_balls: Option<i64>,
    pub players_per_team: Option<i64>,
    pub advantage_reduction: Option<f64>,
    pub game_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGame {
    pub game_name: String,
    pub game_type: String,
    pub num_balls: Option<i64>,
    pub players_per_team: Option<i64>,
    pub advantage_reduction: Option<f64>,
    pub game_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRound {
    #[serde(rename = "roundName")]
    pub round_name: String,
    #[serde(rename = "gameFormat")]
    pub game_format: Option<String>,
    #[serde(rename = "numBalls")]
    pub num_balls: Option<i64>,
    pub teams: Vec<NewRoundTeam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoundTeam {
    pub name: String,
    pub players: Vec<RoundPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundPlayer {
    pub ghin_number: String,
}

/// One score slot joined with player name, team name, and round metadata;
/// the shape returned by round detail.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSlotDetail {
    pub round_id: i64,
    pub player_ghin: String,
    pub player_name: Option<String>,
    pub team_name: Option<String>,
    pub hole_number: i64,
    pub score: Option<i64>,
    pub game_format: Option<String>,
    pub num_balls: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub(crate) fn get_string(row: &CustomDbRow, field: &str) -> String {
    row.get(field)
        .and_then(|v| v.as_text())
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn get_opt_string(row: &CustomDbRow, field: &str) -> Option<String> {
    row.get(field)
        .and_then(|v| v.as_text())
        .map(|v| v.to_string())
}

pub(crate) fn get_int(row: &CustomDbRow, field: &str) -> i64 {
    row.get(field).and_then(|v| v.as_int()).map_or(0, |&v| v)
}

pub(crate) fn get_opt_int(row: &CustomDbRow, field: &str) -> Option<i64> {
    row.get(field).and_then(|v| v.as_int()).copied()
}

pub(crate) fn get_opt_float(row: &CustomDbRow, field: &str) -> Option<f64> {
    row.get(field).and_then(|v| {
        v.as_float()
            .or_else(|| v.as_int().map(|&i| i as f64))
    })
}

// Sqlite hands booleans back as integers, postgres as real booleans.
pub(crate) fn get_bool(row: &CustomDbRow, field: &str) -> bool {
    row.get(field).is_some_and(|v| {
        v.as_bool()
            .copied()
            .unwrap_or_else(|| v.as_int().is_some_and(|&i| i != 0))
    })
}

pub(crate) fn opt_float_value(value: Option<f64>) -> RowValues {
    value.map_or(RowValues::Null, RowValues::Float)
}

pub(crate) fn opt_int_value(value: Option<i64>) -> RowValues {
    value.map_or(RowValues::Null, RowValues::Int)
}

pub(crate) fn opt_text_value(value: Option<String>) -> RowValues {
    value.map_or(RowValues::Null, RowValues::Text)
}
