//! Download orchestration: engine options, proxy isolation, output lookup

pub mod locate;
pub mod options;
pub mod orchestrator;
pub mod proxy;

pub use locate::{locate_output, ALTERNATE_EXTENSIONS};
pub use options::DownloadOptions;
pub use orchestrator::{DownloadOutcome, Downloader};
pub use proxy::{ProxyEnvGuard, PROXY_ENV_VARS};
