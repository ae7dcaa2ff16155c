//! Shared scan runner and result rendering for detect and bruteforce

use super::{blocking, open_cache};
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::RelscoutResult;
use crate::platform;
use crate::probe::{HttpProber, ScanReport, Scanner, Silent};
use crate::ui::{self, ScanProgress, Status, UiContext};
use crate::version::Version;
use serde::Serialize;
use std::collections::BTreeMap;

/// Scan `candidates` against the configured host and print the result
pub(super) async fn run<I>(
    config: &Config,
    title: &str,
    candidates: I,
    total: Option<u64>,
    format: OutputFormat,
) -> RelscoutResult<()>
where
    I: IntoIterator<Item = String> + Send + 'static,
{
    let ctx = UiContext::detect();
    let prober = HttpProber::new(&config.source)?;
    let mut scanner = Scanner::new(open_cache(config), prober, config.scan.flush_every);

    let human = format == OutputFormat::Table;
    if human {
        ui::intro(&ctx, title);
        ui::remark(&ctx, &format!("Cache: {}", scanner.cache().location()));
    }

    let progress_ctx = ctx.clone();
    let report = blocking(move || {
        if human {
            let progress = ScanProgress::new(&progress_ctx, total);
            let report = scanner.run(candidates, &progress);
            progress.finish();
            report
        } else {
            scanner.run(candidates, &Silent)
        }
    })
    .await?;

    match format {
        OutputFormat::Table => print_table(&ctx, config, &report),
        OutputFormat::Json => print_json(config, &report)?,
        OutputFormat::Plain => {
            for version in &report.found {
                println!("{}", version);
            }
        }
    }

    Ok(())
}

/// Download URL of `version` for every platform, keyed by platform name
pub(super) fn download_urls(config: &Config, version: &Version) -> BTreeMap<&'static str, String> {
    platform::all()
        .iter()
        .map(|p| {
            (
                p.name,
                p.download_url(&config.source.host, &config.source.product, version.raw()),
            )
        })
        .collect()
}

fn print_table(ctx: &UiContext, config: &Config, report: &ScanReport) {
    println!();
    if report.found.is_empty() {
        ui::step(ctx, Status::Warn, "No versions found");
    } else {
        println!("Found {} versions:", report.found.len());
        ui::version_list(&report.found);
    }

    println!();
    ui::key_value("Checked", report.checked);
    ui::key_value("Cached", report.skipped);
    ui::key_value("Failed", report.failed);
    ui::key_value(
        "Elapsed",
        format!("{:.1}s", report.elapsed().num_milliseconds() as f64 / 1000.0),
    );

    let Some(latest) = report.latest() else {
        ui::outro(ctx, Status::Warn, "Scan complete");
        return;
    };

    println!();
    println!("Download URLs for {}:", latest);
    for (name, url) in download_urls(config, latest) {
        ui::key_value(name, url);
    }

    if report.failed > 0 {
        ui::remark(ctx, "Failed checks were not cached and will be retried next run");
    }
    ui::outro(ctx, Status::Ok, &format!("Latest version: {}", latest));
}

fn print_json(config: &Config, report: &ScanReport) -> RelscoutResult<()> {
    #[derive(Serialize)]
    struct ScanJson<'a> {
        #[serde(flatten)]
        report: &'a ScanReport,
        latest: Option<&'a Version>,
        downloads: BTreeMap<&'static str, String>,
    }

    let latest = report.latest();
    let json = ScanJson {
        report,
        latest,
        downloads: latest
            .map(|v| download_urls(config, v))
            .unwrap_or_default(),
    };

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
