use std::time::{SystemTime, UNIX_EPOCH};

use sql_middleware::middleware::{AsyncDatabaseExecutor, ConfigAndPool};
use sql_middleware::SqlMiddlewareDbError;

/// Builds a uniquely named shared-cache in-memory sqlite database with the
/// full schema applied, plus an optional fixture script.
pub async fn setup_test_db(fixture_sql: &str) -> Result<ConfigAndPool, SqlMiddlewareDbError> {
    let db_name = format!(
        "file:test_db_{}?mode=memory&cache=shared",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time went backwards")
            .as_nanos()
    );

    let config_and_pool = ConfigAndPool::new_sqlite(db_name).await?;

    let schema = [
        include_str!("../../src/sql/schema/sqlite/00_golfers.sql"),
        include_str!("../../src/sql/schema/sqlite/01_games.sql"),
        include_str!("../../src/sql/schema/sqlite/02_rounds.sql"),
        include_str!("../../src/sql/schema/sqlite/03_round_teams.sql"),
        include_str!("../../src/sql/schema/sqlite/04_scores.sql"),
        include_str!("../../src/sql/schema/sqlite/05_full_scores_view.sql"),
    ]
    .join("\n");
    execute_batch(&config_and_pool, &schema).await?;

    if !fixture_sql.is_empty() {
        execute_batch(&config_and_pool, fixture_sql).await?;
    }

    Ok(config_and_pool)
}

async fn execute_batch(
    config_and_pool: &ConfigAndPool,
    sql: &str,
) -> Result<(), SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;
    conn.execute_batch(sql).await
}
