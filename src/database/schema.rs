//! Database schema

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

/// Open (creating if needed) the history database at `db_url`
pub async fn initialize_database(db_url: &str) -> Result<Pool<Sqlite>> {
    debug!("Opening database at: {}", db_url);
    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    info!("Running database migrations");
    create_tables(&pool).await?;

    Ok(pool)
}

async fn create_tables(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS downloads (
            id TEXT PRIMARY KEY,
            platform TEXT NOT NULL,
            source_url TEXT NOT NULL,
            normalized_url TEXT NOT NULL,
            media_id TEXT,
            title TEXT,
            output_path TEXT,
            file_size INTEGER,
            status TEXT NOT NULL,
            error_message TEXT,
            created_at DATETIME NOT NULL,
            completed_at DATETIME
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_downloads_status ON downloads(status)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_downloads_created ON downloads(created_at)")
        .execute(pool)
        .await?;

    debug!("Database tables created successfully");
    Ok(())
}
