use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS meal_plans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    diet_type TEXT NOT NULL,
    preferences TEXT NOT NULL DEFAULT '',
    meal_plan TEXT NOT NULL,
    grocery_list TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// Opens (creating if missing) the SQLite database and ensures the schema exists.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database at {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    info!("SQLite pool established");
    Ok(pool)
}

/// Creates the `meal_plans` table if it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Single-connection in-memory pool for tests. The connection is never
/// recycled, so the database lives as long as the pool.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool).await.expect("schema");
    pool
}
