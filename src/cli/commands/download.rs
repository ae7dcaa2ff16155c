//! Download command - fetch artifacts for one or all cached versions

use super::{blocking, open_cache};
use crate::cli::args::DownloadArgs;
use crate::config::Config;
use crate::download::Downloader;
use crate::error::{RelscoutError, RelscoutResult};
use crate::platform::{self, Platform};
use crate::ui::{self, Status, UiContext};
use crate::version::Version;

/// Execute the download command
pub async fn execute(args: DownloadArgs, config: &Config) -> RelscoutResult<()> {
    let ctx = UiContext::detect();
    let versions = resolve_versions(args.version.as_deref(), config)?;
    let platforms = resolve_platforms(args.platform.as_deref(), args.all_platforms)?;
    let output = args
        .output
        .unwrap_or_else(|| config.download.output_dir.clone());

    ui::intro(
        &ctx,
        &format!(
            "Downloading {} version(s) x {} platform(s)",
            versions.len(),
            platforms.len()
        ),
    );
    ui::remark(&ctx, &format!("Output: {}", output.display()));

    let downloader = Downloader::new(
        &config.source,
        &config.download,
        output,
        ctx.use_fancy_output(),
    );
    let report = blocking(move || downloader.download_matrix(&versions, &platforms)).await?;

    ui::key_value("Downloaded", report.downloaded);
    ui::key_value("Skipped", report.skipped);
    ui::key_value("Failed", report.failures.len());
    for failure in &report.failures {
        ui::step(
            &ctx,
            Status::Fail,
            &format!("{} {}: {}", failure.version, failure.platform, failure.reason),
        );
    }

    let report = report.into_result()?;
    ui::outro(
        &ctx,
        Status::Ok,
        &format!(
            "{} artifacts ready ({} downloaded, {} already present)",
            report.total(),
            report.downloaded,
            report.skipped
        ),
    );
    Ok(())
}

/// `latest` passes through; anything else must be a version
pub(crate) fn resolve_versions(version: Option<&str>, config: &Config) -> RelscoutResult<Vec<String>> {
    match version {
        Some("latest") => Ok(vec!["latest".to_string()]),
        Some(raw) => Ok(vec![Version::parse(raw)?.raw().to_string()]),
        None => {
            let versions: Vec<String> = open_cache(config)
                .existing_versions()
                .iter()
                .map(|v| v.raw().to_string())
                .collect();
            if versions.is_empty() {
                return Err(RelscoutError::User(
                    "no existing versions in cache. Run 'relscout detect' first".to_string(),
                ));
            }
            Ok(versions)
        }
    }
}

pub(crate) fn resolve_platforms(name: Option<&str>, all: bool) -> RelscoutResult<Vec<Platform>> {
    if all {
        return Ok(platform::all().to_vec());
    }
    match name {
        Some(name) => Ok(vec![platform::by_name(name)?]),
        None => Ok(vec![platform::current()?]),
    }
}
