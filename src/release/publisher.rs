//! Release publishing backends
//!
//! `GhCliPublisher` drives the GitHub CLI; `DryRunPublisher` only prints what
//! would happen. Both sit behind `ReleasePublisher` so the release command
//! does not care which one it got.

use super::plan::ReleaseDraft;
use crate::error::{RelscoutError, RelscoutResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Where releases get created
#[async_trait]
pub trait ReleasePublisher: Send + Sync {
    /// Tags of releases that already exist
    async fn existing_tags(&self) -> RelscoutResult<Vec<String>>;

    /// Create one release and upload its assets
    async fn publish(&self, draft: &ReleaseDraft, assets: &[PathBuf]) -> RelscoutResult<()>;

    /// Human-readable backend name for display
    fn name(&self) -> &'static str;
}

/// Publishes through `gh release`
pub struct GhCliPublisher {
    repo: Option<String>,
}

#[derive(Deserialize)]
struct ReleaseEntry {
    #[serde(rename = "tagName")]
    tag_name: String,
}

impl GhCliPublisher {
    pub fn new(repo: Option<String>) -> Self {
        Self { repo }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("gh");
        cmd.args(args);
        if let Some(ref repo) = self.repo {
            cmd.args(["--repo", repo.as_str()]);
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd
    }

    async fn run(&self, mut cmd: Command, label: &str) -> RelscoutResult<String> {
        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RelscoutError::CliNotFound {
                    name: "gh".to_string(),
                    hint: "Install it from https://cli.github.com/".to_string(),
                }
            } else {
                RelscoutError::command_failed(label, e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not logged in") || stderr.contains("gh auth login") {
                return Err(RelscoutError::GithubNotAuthenticated);
            }
            return Err(RelscoutError::command_exec(label, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ReleasePublisher for GhCliPublisher {
    async fn existing_tags(&self) -> RelscoutResult<Vec<String>> {
        debug!("Listing existing releases via gh...");
        let cmd = self.command(&["release", "list", "--limit", "1000", "--json", "tagName"]);
        let stdout = self.run(cmd, "gh release list").await?;
        parse_release_list(&stdout)
    }

    async fn publish(&self, draft: &ReleaseDraft, assets: &[PathBuf]) -> RelscoutResult<()> {
        let mut cmd = self.command(&[
            "release",
            "create",
            &draft.tag,
            "--title",
            &draft.title,
            "--notes",
            &draft.notes,
        ]);
        cmd.args(assets);

        self.run(cmd, "gh release create").await?;
        info!("Created release {} with {} assets", draft.tag, assets.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "GitHub CLI"
    }
}

fn parse_release_list(stdout: &str) -> RelscoutResult<Vec<String>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<ReleaseEntry> = serde_json::from_str(stdout)?;
    Ok(entries.into_iter().map(|e| e.tag_name).collect())
}

/// Prints the release it would create and touches nothing
#[derive(Debug, Default)]
pub struct DryRunPublisher {
    existing: Vec<String>,
}

impl DryRunPublisher {
    /// `existing` stands in for the remote tag list
    pub fn new(existing: Vec<String>) -> Self {
        Self { existing }
    }
}

#[async_trait]
impl ReleasePublisher for DryRunPublisher {
    async fn existing_tags(&self) -> RelscoutResult<Vec<String>> {
        Ok(self.existing.clone())
    }

    async fn publish(&self, draft: &ReleaseDraft, assets: &[PathBuf]) -> RelscoutResult<()> {
        println!("[DRY RUN] Would create release {} ({})", draft.tag, draft.title);
        for asset in assets {
            println!("[DRY RUN]   asset: {}", asset.display());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dry run"
    }
}
