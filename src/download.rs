//! Artifact downloads
//!
//! Downloads are sequential. Each artifact is streamed to `<file>.part`,
//! hashed on the way, and renamed into `<output>/<version>/<file>` once
//! complete. A file already present under its vendor or release name is
//! not fetched again.

use crate::checksum::HashingWriter;
use crate::config::schema::{DownloadConfig, SourceConfig};
use crate::error::{RelscoutError, RelscoutResult};
use crate::platform::Platform;
use crate::ui::progress;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What happened to a single artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded {
        path: PathBuf,
        bytes: u64,
        sha256: String,
    },
    AlreadyPresent(PathBuf),
}

/// One failed download in a batch
#[derive(Debug, Clone)]
pub struct DownloadFailure {
    pub version: String,
    pub platform: &'static str,
    pub reason: String,
}

/// Totals for a batch of downloads
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failures: Vec<DownloadFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failures.len()
    }

    /// Error if anything in the batch failed
    pub fn into_result(self) -> RelscoutResult<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(RelscoutError::User(format!(
                "{} downloads failed out of {} total",
                self.failures.len(),
                self.total()
            )))
        }
    }
}

/// Blocking artifact downloader
pub struct Downloader {
    agent: ureq::Agent,
    host: String,
    product: String,
    output_dir: PathBuf,
    show_progress: bool,
}

impl Downloader {
    pub fn new(
        source: &SourceConfig,
        download: &DownloadConfig,
        output_dir: PathBuf,
        show_progress: bool,
    ) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(download.timeout_secs)))
            .http_status_as_error(false)
            .user_agent(concat!("relscout/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            host: source.host.clone(),
            product: source.product.clone(),
            output_dir,
            show_progress,
        }
    }

    /// Directory a version's artifacts are stored in
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.output_dir.join(version)
    }

    /// Path of an artifact that is already on disk, under either name
    pub fn existing_file(&self, version: &str, platform: &Platform) -> Option<PathBuf> {
        let dir = self.version_dir(version);
        [
            platform.artifact_name(&self.product),
            platform.asset_name(&self.product, version),
        ]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
    }

    /// Download one artifact unless it is already present
    pub fn download(&self, version: &str, platform: &Platform) -> RelscoutResult<DownloadOutcome> {
        if let Some(path) = self.existing_file(version, platform) {
            debug!("File already exists: {}", path.display());
            return Ok(DownloadOutcome::AlreadyPresent(path));
        }

        let dir = self.version_dir(version);
        fs::create_dir_all(&dir)
            .map_err(|e| RelscoutError::io(format!("creating directory {}", dir.display()), e))?;

        let file_name = platform.artifact_name(&self.product);
        let url = platform.download_url(&self.host, &self.product, version);
        let target = dir.join(&file_name);

        info!("Downloading {} -> {}", url, target.display());
        let (bytes, sha256) = self.fetch_to(&url, &file_name, &target)?;
        info!(
            "Downloaded {} ({}, sha256 {})",
            target.display(),
            progress::format_bytes(bytes),
            sha256
        );

        Ok(DownloadOutcome::Downloaded {
            path: target,
            bytes,
            sha256,
        })
    }

    fn fetch_to(&self, url: &str, label: &str, target: &Path) -> RelscoutResult<(u64, String)> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| RelscoutError::network(url, e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(RelscoutError::DownloadStatus {
                url: url.to_string(),
                status,
            });
        }

        let total = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let part = target.with_file_name(format!("{}.part", label));
        let result = (|| -> io::Result<(u64, String)> {
            let file = File::create(&part)?;
            let mut writer = HashingWriter::new(BufWriter::new(file));
            let bar = progress::byte_bar(self.show_progress, label, total);
            let bytes = io::copy(&mut bar.wrap_read(response.body_mut().as_reader()), &mut writer)?;
            bar.finish_and_clear();
            let (_, digest) = writer.finish()?;
            Ok((bytes, digest))
        })();

        match result {
            Ok(done) => {
                fs::rename(&part, target).map_err(|e| {
                    RelscoutError::io(format!("moving {} into place", part.display()), e)
                })?;
                Ok(done)
            }
            Err(e) => {
                let _ = fs::remove_file(&part);
                Err(RelscoutError::io(format!("streaming {} to {}", url, target.display()), e))
            }
        }
    }

    /// Download every version for every platform, continuing past failures
    pub fn download_matrix(&self, versions: &[String], platforms: &[Platform]) -> BatchReport {
        let mut report = BatchReport::default();
        let total = versions.len() * platforms.len();
        let mut current = 0;

        for version in versions {
            for platform in platforms {
                current += 1;
                info!("[{}/{}] {} {}", current, total, version, platform.name);

                match self.download(version, platform) {
                    Ok(DownloadOutcome::Downloaded { .. }) => report.downloaded += 1,
                    Ok(DownloadOutcome::AlreadyPresent(_)) => report.skipped += 1,
                    Err(e) => {
                        warn!("Failed to download {} for {}: {}", version, platform.name, e);
                        report.failures.push(DownloadFailure {
                            version: version.clone(),
                            platform: platform.name,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        report
    }
}
