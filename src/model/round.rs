use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{
    AnyConnWrapper, AsyncDatabaseExecutor, ConfigAndPool, MiddlewarePoolConnection, RowValues,
};
use sql_middleware::sqlite_convert_params_for_execute;
use sql_middleware::PostgresParams;

use crate::model::types::{
    get_int, get_opt_int, get_opt_string, get_string, opt_int_value, opt_text_value, NewRound,
    ScoreSlotDetail,
};

pub const HOLES_PER_ROUND: i64 = 18;

/// Creates a round with its teams and one empty score slot per player per
/// hole, all inside a single transaction. Returns the new round id; any
/// nested insert failure rolls the whole round back.
///
/// # Errors
///
/// Will return `Err` if any insert in the transaction fails
pub async fn create_round(
    config_and_pool: &ConfigAndPool,
    new_round: NewRound,
) -> Result<i64, SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;

    if let MiddlewarePoolConnection::Postgres(pg_handle) = &mut conn {
        let tx = pg_handle.transaction().await?;

        let round_params = vec![
            RowValues::Text(new_round.round_name.clone()),
            opt_text_value(new_round.game_format.clone()),
            opt_int_value(new_round.num_balls),
        ];
        let postgres_params = PostgresParams::convert(&round_params)?;
        let row = tx
            .query_one(
                "INSERT INTO rounds (round_name, game_format, num_balls) VALUES ($1, $2, $3) RETURNING round_id",
                &postgres_params.as_refs(),
            )
            .await?;
        let round_id: i64 = row.get(0);

        for team in &new_round.teams {
            let team_params = vec![RowValues::Int(round_id), RowValues::Text(team.name.clone())];
            let postgres_params = PostgresParams::convert(&team_params)?;
            let row = tx
                .query_one(
                    "INSERT INTO round_teams (round_id, team_name) VALUES ($1, $2) RETURNING round_team_id",
                    &postgres_params.as_refs(),
                )
                .await?;
            let team_id: i64 = row.get(0);

            for player in &team.players {
                for hole in 1..=HOLES_PER_ROUND {
                    let slot_params = vec![
                        RowValues::Int(round_id),
                        RowValues::Text(player.ghin_number.clone()),
                        RowValues::Int(hole),
                        RowValues::Int(team_id),
                    ];
                    let postgres_params = PostgresParams::convert(&slot_params)?;
                    tx.execute(
                        "INSERT INTO scores (round_id, player_ghin, hole_number, team_id) VALUES ($1, $2, $3, $4)",
                        &postgres_params.as_refs(),
                    )
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(round_id)
    } else {
        conn.interact_sync(move |wrapper| match wrapper {
            AnyConnWrapper::Sqlite(sql_conn) => {
                let tx = sql_conn.transaction()?;

                let round_params = sqlite_convert_params_for_execute(vec![
                    RowValues::Text(new_round.round_name.clone()),
                    opt_text_value(new_round.game_format.clone()),
                    opt_int_value(new_round.num_balls),
                ])?;
                tx.execute(
                    "INSERT INTO rounds (round_name, game_format, num_balls) VALUES (?1, ?2, ?3)",
                    round_params,
                )?;
                let round_id = tx.last_insert_rowid();

                for team in &new_round.teams {
                    let team_params = sqlite_convert_params_for_execute(vec![
                        RowValues::Int(round_id),
                        RowValues::Text(team.name.clone()),
                    ])?;
                    tx.execute(
                        "INSERT INTO round_teams (round_id, team_name) VALUES (?1, ?2)",
                        team_params,
                    )?;
                    let team_id = tx.last_insert_rowid();

                    for player in &team.players {
                        for hole in 1..=HOLES_PER_ROUND {
                            let slot_params = sqlite_convert_params_for_execute(vec![
                                RowValues::Int(round_id),
                                RowValues::Text(player.ghin_number.clone()),
                                RowValues::Int(hole),
                                RowValues::Int(team_id),
                            ])?;
                            tx.execute(
                                "INSERT INTO scores (round_id, player_ghin, hole_number, team_id) VALUES (?1, ?2, ?3, ?4)",
                                slot_params,
                            )?;
                        }
                    }
                }

                tx.commit()?;
                Ok(round_id)
            }
            _ => Err(SqlMiddlewareDbError::Other(
                "Unexpected database type".to_string(),
            )),
        })
        .await?
    }
}

/// Sets (or clears, for `None`) the score of one existing slot. Returns
/// `false` when no slot matches the (round, player, hole) triple.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn update_score(
    config_and_pool: &ConfigAndPool,
    round_id: i64,
    player_ghin: &str,
    hole_number: i64,
    score: Option<i64>,
) -> Result<bool, SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;
    let (select, update) = match &conn {
        MiddlewarePoolConnection::Postgres(_) => (
            "SELECT score_id FROM scores WHERE round_id = $1 AND player_ghin = $2 AND hole_number = $3",
            "UPDATE scores SET score = $1 WHERE round_id = $2 AND player_ghin = $3 AND hole_number = $4",
        ),
        _ => (
            "SELECT score_id FROM scores WHERE round_id = ?1 AND player_ghin = ?2 AND hole_number = ?3",
            "UPDATE scores SET score = ?1 WHERE round_id = ?2 AND player_ghin = ?3 AND hole_number = ?4",
        ),
    };

    let result = conn
        .execute_select(
            select,
            &[
                RowValues::Int(round_id),
                RowValues::Text(player_ghin.to_string()),
                RowValues::Int(hole_number),
            ],
        )
        .await?;
    if result.results.is_empty() {
        return Ok(false);
    }

    conn.execute_dml(
        update,
        &[
            opt_int_value(score),
            RowValues::Int(round_id),
            RowValues::Text(player_ghin.to_string()),
            RowValues::Int(hole_number),
        ],
    )
    .await?;
    Ok(true)
}

/// Every score slot of a round joined with player name, team name, and the
/// round's format metadata, ordered by team name, player name, then hole.
/// An empty result means the round was never materialized.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_round_detail(
    config_and_pool: &ConfigAndPool,
    round_id: i64,
) -> Result<Vec<ScoreSlotDetail>, SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;
    let query = match &conn {
        MiddlewarePoolConnection::Postgres(_) => {
            "SELECT s.round_id, s.player_ghin, s.player_name, s.team_name, s.hole_number, s.score, r.game_format, r.num_balls
FROM full_scores_view s
JOIN rounds r ON s.round_id = r.round_id
WHERE s.round_id = $1
ORDER BY s.team_name, s.player_name, s.hole_number ASC"
        }
        _ => {
            "SELECT s.round_id, s.player_ghin, s.player_name, s.team_name, s.hole_number, s.score, r.game_format, r.num_balls
FROM full_scores_view s
JOIN rounds r ON s.round_id = r.round_id
WHERE s.round_id = ?1
ORDER BY s.team_name, s.player_name, s.hole_number ASC"
        }
    };

    let result = conn
        .execute_select(query, &[RowValues::Int(round_id)])
        .await?;
    Ok(result
        .results
        .iter()
        .map(|row| ScoreSlotDetail {
            round_id: get_int(row, "round_id"),
            player_ghin: get_string(row, "player_ghin"),
            player_name: get_opt_string(row, "player_name"),
            team_name: get_opt_string(row, "team_name"),
            hole_number: get_int(row, "hole_number"),
            score: get_opt_int(row, "score"),
            game_format: get_opt_string(row, "game_format"),
            num_balls: get_opt_int(row, "num_balls"),
        })
        .collect())
}
