//! Platforms command - list the platform table

use crate::config::Config;
use crate::error::RelscoutResult;
use crate::platform;
use console::style;

/// Execute the platforms command
pub async fn execute(config: &Config) -> RelscoutResult<()> {
    let current = platform::current().ok();
    let product = &config.source.product;

    println!(
        "{:<14} {:<10} {:<8} {:<6} {}",
        "PLATFORM", "EXT", "OS", "ARCH", "FILE"
    );
    println!("{}", "-".repeat(72));

    for p in platform::all() {
        let marker = if current.as_ref() == Some(p) {
            style("*").green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{:<14} {:<10} {:<8} {:<6} {} {}",
            p.name,
            p.extension,
            p.os,
            p.arch,
            p.artifact_name(product),
            marker
        );
    }

    Ok(())
}
