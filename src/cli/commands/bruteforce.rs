//! Bruteforce command - decrement walk from a start version

use super::scan;
use crate::cli::args::BruteforceArgs;
use crate::config::Config;
use crate::error::RelscoutResult;
use crate::probe::DecrementWalk;
use crate::version::Version;

/// Execute the bruteforce command
pub async fn execute(args: BruteforceArgs, config: &Config) -> RelscoutResult<()> {
    let start = Version::parse(args.start.as_deref().unwrap_or(&config.scan.walk_start))?;
    let max_steps = args.max.unwrap_or(config.scan.walk_max_steps);

    let walk = DecrementWalk::new(&start, max_steps, config.scan.walk_ceilings());
    let title = format!(
        "Walking down from {} (up to {} versions)",
        start, max_steps
    );

    scan::run(config, &title, walk, Some(max_steps as u64), args.format).await
}
