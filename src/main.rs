//! reelgrab - TikTok and Instagram downloads through yt-dlp
//!
//! Normalizes the link, prepares platform-specific engine options and lets
//! yt-dlp fetch the media into a local directory.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use reelgrab::database::{initialize_database, DownloadRecord, HistoryStore};
use reelgrab::utils::paths;
use reelgrab::{AppSettings, Downloader, Platform, YtDlpExtractor};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(name = "reelgrab", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the media behind a TikTok or Instagram link
    Download {
        url: String,

        /// Directory to save into (default: system temp dir)
        #[arg(long, short)]
        output_dir: Option<PathBuf>,

        /// Platform override when the link does not reveal it
        #[arg(long, short)]
        platform: Option<Platform>,
    },

    /// Print the canonical form of a link
    Normalize { url: String },

    /// List recent downloads
    History {
        #[arg(long, short, default_value_t = 20)]
        limit: u32,

        /// Delete every recorded attempt
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = AppSettings::load()?;

    match args.command {
        Command::Download {
            url,
            output_dir,
            platform,
        } => download(&settings, &url, output_dir, platform).await,
        Command::Normalize { url } => {
            println!("{}", reelgrab::normalize(&url));
            Ok(())
        }
        Command::History { limit, clear } => history(&settings, limit, clear).await,
    }
}

async fn download(
    settings: &AppSettings,
    url: &str,
    output_dir: Option<PathBuf>,
    platform: Option<Platform>,
) -> Result<()> {
    let platform = platform
        .or_else(|| Platform::detect(url))
        .with_context(|| format!("Could not tell which platform {} belongs to; pass --platform", url))?;

    let extractor = Arc::new(YtDlpExtractor::from_settings(settings)?);
    let downloader = Downloader::new(platform, extractor, output_dir, settings.clone())?;

    let started_at = Utc::now();
    let result = downloader.download_with_info(url).await;

    let record = match &result {
        Ok(outcome) => {
            let file_size = tokio::fs::metadata(&outcome.path).await.ok().map(|m| m.len());
            DownloadRecord::completed(platform, url, outcome, file_size, started_at)
        }
        Err(e) => DownloadRecord::failed(platform, url, e, started_at),
    };

    if settings.record_history {
        // History is best effort; the download result is what matters
        if let Err(e) = save_record(settings, &record).await {
            warn!("Failed to record download history: {:#}", e);
        }
    }

    let outcome = result?;
    println!("{}", outcome.path.display());
    Ok(())
}

async fn save_record(settings: &AppSettings, record: &DownloadRecord) -> Result<()> {
    let pool = initialize_database(&paths::sqlite_url(&settings.database_path())).await?;
    HistoryStore::new(pool).save(record).await
}

async fn history(settings: &AppSettings, limit: u32, clear: bool) -> Result<()> {
    let pool = initialize_database(&paths::sqlite_url(&settings.database_path()))
        .await
        .context("Failed to open history database")?;
    let store = HistoryStore::new(pool);

    if clear {
        let removed = store.clear().await?;
        println!("Removed {} history entries", removed);
        return Ok(());
    }

    let records = store.recent(limit).await?;

    if records.is_empty() {
        println!("No downloads yet");
        return Ok(());
    }

    for record in records {
        let location = match (&record.output_path, &record.error_message) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(error)) => error.clone(),
            (None, None) => String::new(),
        };
        println!(
            "{}  {:<9}  {:<9}  {}  {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.platform,
            record.status,
            record.normalized_url,
            location
        );
    }

    Ok(())
}
