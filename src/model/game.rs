use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{AsyncDatabaseExecutor, ConfigAndPool, MiddlewarePoolConnection};

use crate::model::types::{
    get_int, get_opt_float, get_opt_int, get_opt_string, get_string, opt_float_value,
    opt_int_value, opt_text_value, Game, NewGame,
};
use sql_middleware::middleware::RowValues;

/// Creates a game and returns the stored record. `created_at` is filled by
/// the column default.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn create_game(
    config_and_pool: &ConfigAndPool,
    new_game: &NewGame,
) -> Result<Game, SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;
    let query = match &conn {
        MiddlewarePoolConnection::Postgres(_) => {
            "INSERT INTO games (game_name, game_type, num_balls, players_per_team, advantage_reduction, game_date)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING game_id, game_name, game_type, num_balls, players_per_team, advantage_reduction, game_date"
        }
        _ => {
            "INSERT INTO games (game_name, game_type, num_balls, players_per_team, advantage_reduction, game_date)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
RETURNING game_id, game_name, game_type, num_balls, players_per_team, advantage_reduction, game_date"
        }
    };

    let result = conn
        .execute_select(
            query,
            &[
                RowValues::Text(new_game.game_name.clone()),
                RowValues::Text(new_game.game_type.clone()),
                opt_int_value(new_game.num_balls),
                opt_int_value(new_game.players_per_team),
                opt_float_value(new_game.advantage_reduction),
                opt_text_value(new_game.game_date.clone()),
            ],
        )
        .await?;

    result
        .results
        .first()
        .map(|row| Game {
            game_id: get_int(row, "game_id"),
            game_name: get_string(row, "game_name"),
            game_type: get_string(row, "game_type"),
            num_balls: get_opt_int(row, "num_balls"),
            players_per_team: get_opt_int(row, "players_per_team"),
            advantage_reduction: get_opt_float(row, "advantage_reduction"),
            game_date: get_opt_string(row, "game_date"),
        })
        .ok_or_else(|| SqlMiddlewareDbError::Other("Inserted game not found".to_string()))
}
