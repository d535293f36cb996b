use std::collections::HashMap;

use rand::Rng;
use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{
    AnyConnWrapper, AsyncDatabaseExecutor, ConfigAndPool, CustomDbRow, MiddlewarePoolConnection,
    RowValues,
};
use sql_middleware::sqlite_convert_params_for_execute;
use sql_middleware::PostgresParams;

use crate::handicap::normalize_handicap;
use crate::model::types::{
    get_bool, get_opt_float, get_string, opt_float_value, Golfer, ImportSummary,
};

const UPSERT_GOLFER_POSTGRES: &str = "INSERT INTO golfers (ghin_number, player_name, handicap_index, ph_blue, ph_gold, ph_black, ph_white, ph_green)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
ON CONFLICT (ghin_number) DO UPDATE SET
    player_name = EXCLUDED.player_name,
    handicap_index = EXCLUDED.handicap_index,
    ph_blue = EXCLUDED.ph_blue,
    ph_gold = EXCLUDED.ph_gold,
    ph_black = EXCLUDED.ph_black,
    ph_white = EXCLUDED.ph_white,
    ph_green = EXCLUDED.ph_green;";

const UPSERT_GOLFER_SQLITE: &str = "INSERT INTO golfers (ghin_number, player_name, handicap_index, ph_blue, ph_gold, ph_black, ph_white, ph_green)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT (ghin_number) DO UPDATE SET
    player_name = excluded.player_name,
    handicap_index = excluded.handicap_index,
    ph_blue = excluded.ph_blue,
    ph_gold = excluded.ph_gold,
    ph_black = excluded.ph_black,
    ph_white = excluded.ph_white,
    ph_green = excluded.ph_green;";

fn golfer_from_row(row: &CustomDbRow) -> Golfer {
    Golfer {
        ghin_number: get_string(row, "ghin_number"),
        player_name: get_string(row, "player_name"),
        handicap_index: get_opt_float(row, "handicap_index"),
        ph_blue: get_opt_float(row, "ph_blue"),
        ph_gold: get_opt_float(row, "ph_gold"),
        ph_black: get_opt_float(row, "ph_black"),
        ph_white: get_opt_float(row, "ph_white"),
        ph_green: get_opt_float(row, "ph_green"),
        is_regular: get_bool(row, "is_regular"),
    }
}

/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_golfers(
    config_and_pool: &ConfigAndPool,
) -> Result<Vec<Golfer>, SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;
    let query = match &conn {
        MiddlewarePoolConnection::Postgres(_) => {
            "SELECT ghin_number, player_name, handicap_index, ph_blue, ph_gold, ph_black, ph_white, ph_green, COALESCE(is_regular, FALSE) AS is_regular FROM golfers ORDER BY player_name ASC"
        }
        _ => {
            "SELECT ghin_number, player_name, handicap_index, ph_blue, ph_gold, ph_black, ph_white, ph_green, COALESCE(is_regular, 0) AS is_regular FROM golfers ORDER BY player_name ASC"
        }
    };
    let result = conn.execute_select(query, &[]).await?;
    Ok(result.results.iter().map(golfer_from_row).collect())
}

/// Inserts a guest golfer under a synthetic `GUEST-xxxx` key and returns the
/// created record. Guests bypass the spreadsheet import path, so the raw
/// parsed handicap is stored without the plus-handicap negation.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn insert_guest_golfer(
    config_and_pool: &ConfigAndPool,
    player_name: &str,
    handicap_index: f64,
) -> Result<Golfer, SqlMiddlewareDbError> {
    let ghin_number = format!("GUEST-{:04x}", rand::thread_rng().gen::<u16>());

    let mut conn = config_and_pool.get_connection().await?;
    let insert = match &conn {
        MiddlewarePoolConnection::Postgres(_) => {
            "INSERT INTO golfers (ghin_number, player_name, handicap_index) VALUES ($1, $2, $3)"
        }
        _ => "INSERT INTO golfers (ghin_number, player_name, handicap_index) VALUES (?1, ?2, ?3)",
    };
    conn.execute_dml(
        insert,
        &[
            RowValues::Text(ghin_number.clone()),
            RowValues::Text(player_name.to_string()),
            RowValues::Float(handicap_index),
        ],
    )
    .await?;

    let select = match &conn {
        MiddlewarePoolConnection::Postgres(_) => {
            "SELECT ghin_number, player_name, handicap_index, ph_blue, ph_gold, ph_black, ph_white, ph_green, COALESCE(is_regular, FALSE) AS is_regular FROM golfers WHERE ghin_number = $1"
        }
        _ => {
            "SELECT ghin_number, player_name, handicap_index, ph_blue, ph_gold, ph_black, ph_white, ph_green, COALESCE(is_regular, 0) AS is_regular FROM golfers WHERE ghin_number = ?1"
        }
    };
    let result = conn
        .execute_select(select, &[RowValues::Text(ghin_number)])
        .await?;
    result
        .results
        .first()
        .map(golfer_from_row)
        .ok_or_else(|| SqlMiddlewareDbError::Other("Inserted golfer not found".to_string()))
}

/// Flips a golfer's regular flag, returning the new value, or `None` when the
/// key is unknown.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn toggle_regular(
    config_and_pool: &ConfigAndPool,
    ghin_number: &str,
) -> Result<Option<bool>, SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;
    let (select, update) = match &conn {
        MiddlewarePoolConnection::Postgres(_) => (
            "SELECT COALESCE(is_regular, FALSE) AS is_regular FROM golfers WHERE ghin_number = $1",
            "UPDATE golfers SET is_regular = $1 WHERE ghin_number = $2",
        ),
        _ => (
            "SELECT COALESCE(is_regular, 0) AS is_regular FROM golfers WHERE ghin_number = ?1",
            "UPDATE golfers SET is_regular = ?1 WHERE ghin_number = ?2",
        ),
    };

    let result = conn
        .execute_select(select, &[RowValues::Text(ghin_number.to_string())])
        .await?;
    let Some(row) = result.results.first() else {
        return Ok(None);
    };
    let new_flag = !get_bool(row, "is_regular");

    conn.execute_dml(
        update,
        &[
            RowValues::Bool(new_flag),
            RowValues::Text(ghin_number.to_string()),
        ],
    )
    .await?;
    Ok(Some(new_flag))
}

/// Validates one decoded spreadsheet row and turns it into upsert parameters.
/// Rows missing a GHIN or name, or whose handicap index is not numeric, are
/// rejected.
fn prepare_golfer_row(row: &HashMap<String, String>) -> Option<Vec<RowValues>> {
    let ghin = row.get("GHIN").map(|s| s.trim()).filter(|s| !s.is_empty())?;
    let name = row.get("Name").map(|s| s.trim()).filter(|s| !s.is_empty())?;
    let hi_raw = row.get("HI")?;
    let hi = normalize_handicap(hi_raw)?;

    let tee = |column: &str| {
        opt_float_value(
            row.get(column)
                .and_then(|value| normalize_handicap(value)),
        )
    };

    Some(vec![
        RowValues::Text(ghin.to_string()),
        RowValues::Text(name.to_string()),
        RowValues::Float(hi),
        tee("Blue"),
        tee("Gold"),
        tee("Black"),
        tee("White"),
        tee("Green"),
    ])
}

/// Applies a batch of decoded spreadsheet rows as golfer upserts inside one
/// transaction. Individual row failures are counted and skipped; only a
/// failure of the transaction itself aborts the batch.
///
/// # Errors
///
/// Will return `Err` if the transaction cannot be started or committed
pub async fn import_golfers(
    config_and_pool: &ConfigAndPool,
    rows: Vec<HashMap<String, String>>,
) -> Result<ImportSummary, SqlMiddlewareDbError> {
    let mut skipped = 0usize;
    let mut prepared: Vec<Vec<RowValues>> = Vec::with_capacity(rows.len());
    for row in &rows {
        match prepare_golfer_row(row) {
            Some(params) => prepared.push(params),
            None => skipped += 1,
        }
    }

    let mut conn = config_and_pool.get_connection().await?;
    let (imported, row_failures) =
        if let MiddlewarePoolConnection::Postgres(pg_handle) = &mut conn {
            let tx = pg_handle.transaction().await?;
            let mut imported = 0usize;
            let mut failed = 0usize;
            for params in &prepared {
                let postgres_params = PostgresParams::convert(params)?;
                // Savepoint per row so one bad row can't poison the batch.
                let savepoint = tx.transaction().await?;
                match savepoint
                    .execute(UPSERT_GOLFER_POSTGRES, &postgres_params.as_refs())
                    .await
                {
                    Ok(_) => {
                        savepoint.commit().await?;
                        imported += 1;
                    }
                    Err(_) => {
                        savepoint.rollback().await?;
                        failed += 1;
                    }
                }
            }
            tx.commit().await?;
            (imported, failed)
        } else {
            conn.interact_sync(move |wrapper| match wrapper {
                AnyConnWrapper::Sqlite(sql_conn) => {
                    let tx = sql_conn.transaction()?;
                    let mut imported = 0usize;
                    let mut failed = 0usize;
                    for params in prepared {
                        let converted_params = sqlite_convert_params_for_execute(params)?;
                        match tx.execute(UPSERT_GOLFER_SQLITE, converted_params) {
                            Ok(_) => imported += 1,
                            Err(_) => failed += 1,
                        }
                    }
                    tx.commit()?;
                    Ok((imported, failed))
                }
                _ => Err(SqlMiddlewareDbError::Other(
                    "Unexpected database type".to_string(),
                )),
            })
            .await??
        };

    Ok(ImportSummary {
        imported,
        skipped: skipped + row_failures,
    })
}
