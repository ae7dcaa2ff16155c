//! Rename command - give downloaded artifacts their release asset names

use crate::cli::args::RenameArgs;
use crate::config::Config;
use crate::error::RelscoutResult;
use crate::platform;
use crate::release::{downloaded_versions, rename_version_dir};
use crate::ui::{self, Status, UiContext};
use crate::version::Version;

/// Execute the rename command
pub async fn execute(args: RenameArgs, config: &Config) -> RelscoutResult<()> {
    let ctx = UiContext::detect();
    let downloads = args
        .downloads
        .unwrap_or_else(|| config.download.output_dir.clone());
    let product = &config.source.product;

    if let Some(ref raw) = args.version {
        let version = Version::parse(raw)?;
        let report = rename_version_dir(
            &downloads.join(version.raw()),
            version.raw(),
            product,
            platform::all(),
            args.dry_run,
        )?;
        ui::step(
            &ctx,
            Status::Ok,
            &format!("{}: {} renamed, {} assets", version, report.renamed, report.assets.len()),
        );
        return Ok(());
    }

    let versions = downloaded_versions(&downloads)?;
    let mut processed = 0;

    for version in &versions {
        match rename_version_dir(
            &downloads.join(version),
            version,
            product,
            platform::all(),
            args.dry_run,
        ) {
            Ok(report) => {
                processed += 1;
                ui::step(
                    &ctx,
                    Status::Ok,
                    &format!("{}: {} renamed, {} assets", version, report.renamed, report.assets.len()),
                );
            }
            Err(e) => ui::step(&ctx, Status::Fail, &format!("{}: {}", version, e)),
        }
    }

    ui::outro(
        &ctx,
        Status::Info,
        &format!("Processed {}/{} versions", processed, versions.len()),
    );
    Ok(())
}
