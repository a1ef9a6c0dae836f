pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::MediaInfo;
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
