//! Release command - republish downloaded versions through a publisher

use super::{blocking, open_cache};
use crate::cli::args::ReleaseArgs;
use crate::config::Config;
use crate::download::Downloader;
use crate::error::{RelscoutError, RelscoutResult};
use crate::platform::{self, Platform};
use crate::release::{
    downloaded_versions, plan_new_releases, prepare_assets, DryRunPublisher, GhCliPublisher,
    ReleaseDraft, ReleasePublisher, CHECKSUMS_FILE,
};
use crate::ui::{self, Status, UiContext};
use crate::version::Version;
use std::path::PathBuf;
use tracing::{info, warn};

/// Execute the release command
pub async fn execute(args: ReleaseArgs, config: &Config) -> RelscoutResult<()> {
    let ctx = UiContext::detect();
    let downloads = args
        .downloads
        .clone()
        .unwrap_or_else(|| config.download.output_dir.clone());
    let repo = args.repo.clone().or_else(|| config.release.repo.clone());

    let publisher = create_publisher(repo, args.dry_run, args.new).await;
    ui::intro(&ctx, &format!("Publishing releases via {}", publisher.name()));

    let drafts = plan(&args, config, &downloads, &*publisher).await?;
    if drafts.is_empty() {
        ui::outro(&ctx, Status::Info, "Nothing to release");
        return Ok(());
    }

    let mut failed = 0;
    for draft in &drafts {
        match release_one(draft, &args, config, &downloads, &*publisher).await {
            Ok(assets) => ui::step(
                &ctx,
                Status::Ok,
                &format!("{} released with {} assets", draft.tag, assets),
            ),
            Err(e) => {
                failed += 1;
                ui::step(&ctx, Status::Fail, &format!("{}: {}", draft.tag, e));
                if let Some(hint) = e.hint() {
                    ui::remark(&ctx, hint);
                }
            }
        }
    }

    if failed > 0 {
        return Err(RelscoutError::User(format!(
            "{} of {} releases failed",
            failed,
            drafts.len()
        )));
    }

    ui::outro(&ctx, Status::Ok, &format!("{} release(s) published", drafts.len()));
    Ok(())
}

async fn create_publisher(
    repo: Option<String>,
    dry_run: bool,
    needs_tags: bool,
) -> Box<dyn ReleasePublisher> {
    let gh = GhCliPublisher::new(repo);
    if !dry_run {
        return Box::new(gh);
    }

    // Dry runs still read the real tag list for `--new`
    let existing = if needs_tags {
        gh.existing_tags().await.unwrap_or_else(|e| {
            warn!("Could not list existing releases, assuming none: {}", e);
            Vec::new()
        })
    } else {
        Vec::new()
    };
    Box::new(DryRunPublisher::new(existing))
}

async fn plan(
    args: &ReleaseArgs,
    config: &Config,
    downloads: &std::path::Path,
    publisher: &dyn ReleasePublisher,
) -> RelscoutResult<Vec<ReleaseDraft>> {
    let product = &config.source.product;
    let prefix = &config.release.tag_prefix;

    if args.new {
        let existing = publisher.existing_tags().await?;
        let versions = open_cache(config).existing_versions();
        info!(
            "{} cached versions, {} existing releases",
            versions.len(),
            existing.len()
        );
        return Ok(plan_new_releases(versions, &existing, product, prefix));
    }

    let versions = match args.version {
        Some(ref raw) => vec![Version::parse(raw)?.raw().to_string()],
        None => downloaded_versions(downloads)?,
    };

    Ok(versions
        .iter()
        .map(|v| ReleaseDraft::new(v, product, prefix))
        .collect())
}

async fn release_one(
    draft: &ReleaseDraft,
    args: &ReleaseArgs,
    config: &Config,
    downloads: &std::path::Path,
    publisher: &dyn ReleasePublisher,
) -> RelscoutResult<usize> {
    let dir = downloads.join(&draft.version);

    if args.fetch && args.dry_run {
        let missing = report_missing(&draft.version, config, downloads.to_path_buf());
        if !dir.is_dir() {
            // Nothing on disk to rename; publish the names the fetch would produce
            let mut assets: Vec<PathBuf> = missing
                .iter()
                .map(|p| dir.join(p.asset_name(&config.source.product, &draft.version)))
                .collect();
            assets.push(dir.join(CHECKSUMS_FILE));
            publisher.publish(draft, &assets).await?;
            return Ok(assets.len());
        }
    } else if args.fetch {
        fetch_missing(&draft.version, config, downloads.to_path_buf()).await?;
    }

    let version = draft.version.clone();
    let product = config.source.product.clone();
    let dry_run = args.dry_run;
    let assets: Vec<PathBuf> = blocking(move || {
        prepare_assets(&dir, &version, &product, platform::all(), dry_run)
    })
    .await??;

    publisher.publish(draft, &assets).await?;
    Ok(assets.len())
}

/// Print the artifacts a fetch would download; nothing touches the network or disk
fn report_missing(version: &str, config: &Config, downloads: PathBuf) -> Vec<Platform> {
    let downloader = Downloader::new(&config.source, &config.download, downloads, false);
    let missing: Vec<Platform> = platform::all()
        .iter()
        .filter(|p| downloader.existing_file(version, p).is_none())
        .copied()
        .collect();

    for p in &missing {
        println!(
            "[DRY RUN] Would download: {}",
            p.download_url(&config.source.host, &config.source.product, version)
        );
    }
    missing
}

/// Download every platform artifact of `version` that is not on disk yet
async fn fetch_missing(version: &str, config: &Config, downloads: PathBuf) -> RelscoutResult<()> {
    let downloader = Downloader::new(&config.source, &config.download, downloads, false);
    let versions = vec![version.to_string()];

    let report = blocking(move || downloader.download_matrix(&versions, platform::all())).await?;
    for failure in &report.failures {
        warn!(
            "Missing {} for {}: {}",
            failure.platform, failure.version, failure.reason
        );
    }

    if report.downloaded + report.skipped == 0 {
        return Err(RelscoutError::User(format!(
            "no artifacts could be downloaded for {}",
            version
        )));
    }
    Ok(())
}
