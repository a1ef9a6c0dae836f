//! Download history CRUD operations

use crate::downloader::DownloadOutcome;
use crate::platform::Platform;
use crate::utils::error::DownloadError;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// Outcome of a recorded attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Completed,
    Failed,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Completed => "completed",
            RecordStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "completed" => Ok(RecordStatus::Completed),
            "failed" => Ok(RecordStatus::Failed),
            other => Err(anyhow!("unknown download status: {}", other)),
        }
    }
}

/// One download attempt
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRecord {
    pub id: String,
    pub platform: Platform,
    pub source_url: String,
    pub normalized_url: String,
    pub media_id: Option<String>,
    pub title: Option<String>,
    pub output_path: Option<PathBuf>,
    pub file_size: Option<u64>,
    pub status: RecordStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl DownloadRecord {
    /// Record for a finished download
    pub fn completed(
        platform: Platform,
        source_url: &str,
        outcome: &DownloadOutcome,
        file_size: Option<u64>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let engine_id = Some(outcome.info.id.clone()).filter(|id| !id.is_empty());
        let url_id = platform.extract_media_id(&outcome.normalized_url);
        // Short links carry a redirect code, not the media id
        let media_id = if platform.profile().is_short_link(&outcome.normalized_url) {
            engine_id.or(url_id)
        } else {
            url_id.or(engine_id)
        };

        Self {
            id: Uuid::new_v4().to_string(),
            platform,
            source_url: source_url.to_string(),
            normalized_url: outcome.normalized_url.clone(),
            media_id,
            title: Some(outcome.info.title.clone()).filter(|title| !title.is_empty()),
            output_path: Some(outcome.path.clone()),
            file_size,
            status: RecordStatus::Completed,
            error_message: None,
            created_at: started_at,
            completed_at: Some(Utc::now()),
        }
    }

    /// Record for an attempt that ended in `error`
    pub fn failed(
        platform: Platform,
        source_url: &str,
        error: &DownloadError,
        started_at: DateTime<Utc>,
    ) -> Self {
        let normalized_url = platform.normalize_url(source_url);
        Self {
            id: Uuid::new_v4().to_string(),
            platform,
            source_url: source_url.to_string(),
            media_id: platform.extract_media_id(&normalized_url),
            normalized_url,
            title: None,
            output_path: None,
            file_size: None,
            status: RecordStatus::Failed,
            error_message: Some(error.to_string()),
            created_at: started_at,
            completed_at: None,
        }
    }
}

/// Persistent download history
pub struct HistoryStore {
    pool: Pool<Sqlite>,
}

impl HistoryStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Save download record
    pub async fn save(&self, record: &DownloadRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO downloads
            (id, platform, source_url, normalized_url, media_id, title, output_path,
             file_size, status, error_message, created_at, completed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(record.platform.as_str())
        .bind(&record.source_url)
        .bind(&record.normalized_url)
        .bind(&record.media_id)
        .bind(&record.title)
        .bind(
            record
                .output_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )
        .bind(record.file_size.map(|v| v as i64))
        .bind(record.status.as_str())
        .bind(&record.error_message)
        .bind(record.created_at)
        .bind(record.completed_at)
        .execute(&self.pool)
        .await?;

        debug!("Saved download record: {}", record.id);
        Ok(())
    }

    /// Get download record by ID
    pub async fn get(&self, id: &str) -> Result<Option<DownloadRecord>> {
        let row = sqlx::query("SELECT * FROM downloads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_into_download_record).transpose()
    }

    /// Most recent attempts first
    pub async fn recent(&self, limit: u32) -> Result<Vec<DownloadRecord>> {
        let rows = sqlx::query("SELECT * FROM downloads ORDER BY created_at DESC LIMIT ?")
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(row_into_download_record).collect()
    }

    pub async fn by_status(&self, status: RecordStatus) -> Result<Vec<DownloadRecord>> {
        let rows =
            sqlx::query("SELECT * FROM downloads WHERE status = ? ORDER BY created_at DESC")
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(row_into_download_record).collect()
    }

    /// Delete download record, returning whether it existed
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM downloads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted download record: {}", id);
        Ok(result.rows_affected() > 0)
    }

    /// Delete every record, returning how many were removed
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM downloads")
            .execute(&self.pool)
            .await?;

        debug!("Cleared {} download records", result.rows_affected());
        Ok(result.rows_affected())
    }
}

fn row_into_download_record(row: sqlx::sqlite::SqliteRow) -> Result<DownloadRecord> {
    let platform: String = row.try_get("platform")?;
    let status: String = row.try_get("status")?;

    Ok(DownloadRecord {
        id: row.try_get("id")?,
        platform: platform.parse::<Platform>().map_err(|e: String| anyhow!(e))?,
        source_url: row.try_get("source_url")?,
        normalized_url: row.try_get("normalized_url")?,
        media_id: row.try_get("media_id")?,
        title: row.try_get("title")?,
        output_path: row
            .try_get::<Option<String>, _>("output_path")?
            .map(PathBuf::from),
        file_size: row
            .try_get::<Option<i64>, _>("file_size")?
            .map(|v| v as u64),
        status: status.parse::<RecordStatus>()?,
        error_message: row.try_get("error_message")?,
        created_at: row.try_get("created_at")?,
        completed_at: row.try_get("completed_at")?,
    })
}
