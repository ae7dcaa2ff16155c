//! Detect command - bounded scan or single-version check

use super::{blocking, open_cache, scan};
use crate::cli::args::{DetectArgs, OutputFormat};
use crate::config::Config;
use crate::error::RelscoutResult;
use crate::probe::{BoundedRange, HttpProber, Scanner};
use crate::ui::{self, Status, UiContext};
use crate::version::Version;
use serde::Serialize;

/// Execute the detect command
pub async fn execute(args: DetectArgs, config: &Config) -> RelscoutResult<()> {
    if let Some(ref version) = args.version {
        return check_version(version, args.format, config).await;
    }

    let range = BoundedRange::new(
        args.max_major.unwrap_or(config.scan.max_major),
        args.max_minor.unwrap_or(config.scan.max_minor),
        args.max_patch.unwrap_or(config.scan.max_patch),
    );
    let total = range.total();

    let title = match total {
        Some(n) => format!("Detecting {} versions ({} candidates)", config.source.product, n),
        None => format!("Detecting {} versions", config.source.product),
    };
    scan::run(config, &title, range, total, args.format).await
}

async fn check_version(raw: &str, format: OutputFormat, config: &Config) -> RelscoutResult<()> {
    let version = Version::parse(raw)?;
    let prober = HttpProber::new(&config.source)?;
    let mut scanner = Scanner::new(open_cache(config), prober, config.scan.flush_every);

    let key = version.raw().to_string();
    let classification = blocking(move || scanner.classify(&key)).await??;

    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct CheckJson<'a> {
                version: &'a Version,
                exists: bool,
                cached: bool,
            }
            let json = CheckJson {
                version: &version,
                exists: classification.exists,
                cached: classification.cached,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain => {
            if classification.exists {
                println!("{}", version);
            }
        }
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            let source = if classification.cached { " (cached)" } else { "" };
            if classification.exists {
                ui::step(&ctx, Status::Ok, &format!("Version {} exists{}", version, source));
                println!();
                for (name, url) in scan::download_urls(config, &version) {
                    ui::key_value(name, url);
                }
            } else {
                ui::step(
                    &ctx,
                    Status::Info,
                    &format!("Version {} does not exist{}", version, source),
                );
            }
        }
    }

    Ok(())
}
