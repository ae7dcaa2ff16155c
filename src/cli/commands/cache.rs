//! Cache command - inspect or clear the version cache

use super::open_cache;
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::RelscoutResult;
use crate::ui::{self, Status, UiContext};

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> RelscoutResult<()> {
    let ctx = UiContext::detect();

    match args.action {
        CacheAction::Stats => show_stats(config),
        CacheAction::List { requested } => list_versions(config, requested),
        CacheAction::Clear { yes } => clear_cache(&ctx.with_auto_yes(yes), config).await?,
    }

    Ok(())
}

fn show_stats(config: &Config) {
    let cache = open_cache(config);
    let stats = cache.stats();

    println!("Cache: {}", cache.location());
    ui::key_value("Requested", stats.requested);
    ui::key_value("Existing", stats.existing);
}

fn list_versions(config: &Config, requested: bool) {
    let cache = open_cache(config);

    if requested {
        for version in cache.all_requested() {
            println!("{}", version);
        }
        return;
    }

    let versions = cache.existing_versions();
    if versions.is_empty() {
        println!("No existing versions cached.");
        return;
    }
    for version in &versions {
        println!("{}", version);
    }
}

async fn clear_cache(ctx: &UiContext, config: &Config) -> RelscoutResult<()> {
    let mut cache = open_cache(config);
    let stats = cache.stats();

    // Zero counts do not mean the backing files are gone
    let prompt = format!(
        "Remove {} requested and {} existing entries from {}?",
        stats.requested,
        stats.existing,
        cache.location()
    );
    if !ui::confirm(ctx, &prompt, false).await? {
        ui::step(ctx, Status::Info, "Aborted");
        return Ok(());
    }

    cache.clear()?;
    ui::step(ctx, Status::Ok, "Cache cleared");
    Ok(())
}
