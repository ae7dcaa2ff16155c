//! Configuration schema for relscout
//!
//! Configuration is stored at `~/.config/relscout/config.toml`

use crate::probe::WalkCeilings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Download host and probe target
    pub source: SourceConfig,

    /// Version cache location
    pub cache: CacheConfig,

    /// Scan bounds and walk parameters
    pub scan: ScanConfig,

    /// Artifact downloads
    pub download: DownloadConfig,

    /// Release publishing
    pub release: ReleaseConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Where releases are published and how they are probed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the download host
    pub host: String,

    /// Product name as it appears in vendor file names
    pub product: String,

    /// Platform whose artifact is used for existence probes
    pub probe_platform: String,

    /// Per-probe timeout in seconds
    pub probe_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            host: "https://download.qoder.com".to_string(),
            product: "Qoder".to_string(),
            probe_platform: "darwin-arm64".to_string(),
            probe_timeout_secs: 30,
        }
    }
}

/// Version cache settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the cache files (default: current directory)
    pub dir: Option<PathBuf>,
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Highest major version for `detect`
    pub max_major: u64,

    /// Highest minor version for `detect`
    pub max_minor: u64,

    /// Highest patch version for `detect`
    pub max_patch: u64,

    /// Probes between cache flushes
    pub flush_every: usize,

    /// Default start version for `bruteforce`
    pub walk_start: String,

    /// Default step limit for `bruteforce`
    pub walk_max_steps: usize,

    /// Minor version the walk resets to after a major decrement
    pub walk_minor_ceiling: u64,

    /// Patch version the walk resets to after a minor or major decrement
    pub walk_patch_ceiling: u64,
}

impl ScanConfig {
    pub fn walk_ceilings(&self) -> WalkCeilings {
        WalkCeilings {
            minor: self.walk_minor_ceiling,
            patch: self.walk_patch_ceiling,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        let ceilings = WalkCeilings::default();
        Self {
            max_major: 3,
            max_minor: 20,
            max_patch: 50,
            flush_every: 10,
            walk_start: "0.1.21".to_string(),
            walk_max_steps: 100,
            walk_minor_ceiling: ceilings.minor,
            walk_patch_ceiling: ceilings.patch,
        }
    }
}

/// Download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory downloads are written to, one subdirectory per version
    pub output_dir: PathBuf,

    /// Per-download timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            timeout_secs: 30 * 60,
        }
    }
}

/// Release publishing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Target repository (`owner/repo`); the current repository if unset
    pub repo: Option<String>,

    /// Prefix prepended to the version to form the tag
    pub tag_prefix: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            repo: None,
            tag_prefix: "v".to_string(),
        }
    }
}
