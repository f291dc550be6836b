use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;
    info!(database_url, "connected to SQLite");
    Ok(pool)
}

/// Applies the embedded migrations. Every script is `IF NOT EXISTS`, so
/// this is safe to run on each start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("running database migrations");
    sqlx::migrate!().run(pool).await?;
    info!("migrations completed");
    Ok(())
}

/// Single-connection in-memory database with the schema applied. The
/// connection is never recycled, otherwise the data would vanish with it.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    run_migrations(&pool).await.expect("migrations");
    pool
}
