//! Process-wide proxy variable suppression
//!
//! The environment is global to the process, so every mutation happens under
//! one async mutex and is undone when the guard drops, including during
//! unwinding.

use std::ffi::OsString;
use std::sync::OnceLock;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Proxy variables honored by HTTP stacks, both spellings
pub const PROXY_ENV_VARS: [&str; 6] = [
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "ALL_PROXY",
    "http_proxy",
    "https_proxy",
    "all_proxy",
];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Holds the environment lock with proxy variables removed.
/// Dropping it puts back exactly what was there before.
pub struct ProxyEnvGuard {
    saved: Vec<(&'static str, OsString)>,
    _lock: MutexGuard<'static, ()>,
}

impl ProxyEnvGuard {
    /// Wait for exclusive access to the environment, then clear proxy variables
    pub async fn acquire() -> Self {
        let lock = env_lock().lock().await;

        let mut saved = Vec::new();
        for name in PROXY_ENV_VARS {
            if let Some(value) = std::env::var_os(name) {
                std::env::remove_var(name);
                saved.push((name, value));
            }
        }

        if !saved.is_empty() {
            debug!(
                "Cleared proxy variables for engine call: {:?}",
                saved.iter().map(|(name, _)| *name).collect::<Vec<_>>()
            );
        }

        Self { saved, _lock: lock }
    }

    /// Names of the variables that were set and have been cleared
    pub fn cleared(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.saved.iter().map(|(name, _)| *name)
    }
}

impl Drop for ProxyEnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.saved.drain(..) {
            std::env::set_var(name, value);
        }
        // lock released after restoration when `_lock` drops
    }
}
