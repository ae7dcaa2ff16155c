//! CLI command implementations

pub mod bruteforce;
pub mod cache;
pub mod completions;
pub mod config;
pub mod detect;
pub mod download;
pub mod platforms;
pub mod release;
pub mod rename;
mod scan;

pub use bruteforce::execute as bruteforce;
pub use cache::execute as cache;
pub use completions::execute as completions;
pub use config::execute as config;
pub use detect::execute as detect;
pub use download::execute as download;
pub use platforms::execute as platforms;
pub use release::execute as release;
pub use rename::execute as rename;

use crate::cache::{TextFileStore, VersionCache};
use crate::config::Config;
use crate::error::{RelscoutError, RelscoutResult};
use std::path::PathBuf;

/// Version cache in the configured directory, or the working directory
pub(crate) fn open_cache(config: &Config) -> VersionCache<TextFileStore> {
    let dir = config.cache.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    VersionCache::new(TextFileStore::new(dir))
}

/// Run blocking work (network, file hashing) off the async runtime
pub(crate) async fn blocking<T, F>(work: F) -> RelscoutResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RelscoutError::Internal(format!("Background task failed: {}", e)))
}
