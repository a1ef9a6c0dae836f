//! Download history database

pub mod operations;
pub mod schema;

// Re-export for convenience
pub use operations::{DownloadRecord, HistoryStore, RecordStatus};
pub use schema::initialize_database;
