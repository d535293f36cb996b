use actix_web::web::{self, Data};
use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::json;
use sql_middleware::middleware::ConfigAndPool;

use crate::model::{self, NewGame};

#[derive(Deserialize)]
pub struct GameRequest {
    #[serde(rename = "gameName")]
    pub game_name: Option<String>,
    #[serde(rename = "gameType")]
    pub game_type: Option<String>,
    #[serde(rename = "numBalls")]
    pub num_balls: Option<i64>,
    #[serde(rename = "playersPerTeam")]
    pub players_per_team: Option<i64>,
    #[serde(rename = "advantageReduction")]
    pub advantage_reduction: Option<f64>,
    pub date: Option<String>,
}

pub async fn create_game(body: web::Json<GameRequest>, abc: Data<ConfigAndPool>) -> HttpResponse {
    let name = body
        .game_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let game_type = body
        .game_type
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let (Some(name), Some(game_type)) = (name, game_type) else {
        return HttpResponse::BadRequest()
            .json(json!({"message": "Game name and game type are required."}));
    };

    // The date is stored as given; the column takes whatever the client sent.
    let game_date = body
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let new_game = NewGame {
        game_name: name.to_string(),
        game_type: game_type.to_string(),
        num_balls: body.num_balls,
        players_per_team: body.players_per_team,
        advantage_reduction: body.advantage_reduction,
        game_date,
    };

    match model::create_game(abc.get_ref(), &new_game).await {
        Ok(game) => HttpResponse::Created().json(game),
        Err(e) => {
            eprintln!("Error creating game: {e}");
            HttpResponse::InternalServerError().json(json!({"message": "Failed to create game."}))
        }
    }
}
