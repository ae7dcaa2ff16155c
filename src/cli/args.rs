//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Relscout - release version discovery and mirroring
///
/// Finds published versions on a download host without a listing API,
/// remembers what it has already checked, and republishes artifacts.
#[derive(Parser, Debug)]
#[command(name = "relscout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RELSCOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the version cache files
    #[arg(long, global = true, env = "RELSCOUT_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Download host base URL
    #[arg(long, global = true, env = "RELSCOUT_HOST")]
    pub host: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a bounded version range for published releases
    Detect(DetectArgs),

    /// Walk downward from a start version looking for releases
    Bruteforce(BruteforceArgs),

    /// Inspect or clear the version cache
    Cache(CacheArgs),

    /// Download release artifacts
    Download(DownloadArgs),

    /// List supported platforms
    Platforms,

    /// Rename downloaded artifacts to release asset names
    Rename(RenameArgs),

    /// Publish downloaded versions as releases
    Release(ReleaseArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Arguments for the detect command
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Highest major version to check (default: from config)
    #[arg(long)]
    pub max_major: Option<u64>,

    /// Highest minor version to check (default: from config)
    #[arg(long)]
    pub max_minor: Option<u64>,

    /// Highest patch version to check (default: from config)
    #[arg(long)]
    pub max_patch: Option<u64>,

    /// Check a single version instead of scanning
    #[arg(long, conflicts_with_all = ["max_major", "max_minor", "max_patch"])]
    pub version: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the bruteforce command
#[derive(Parser, Debug)]
pub struct BruteforceArgs {
    /// Version to start walking down from (default: from config)
    #[arg(long)]
    pub start: Option<String>,

    /// Maximum number of versions to check (default: from config)
    #[arg(long)]
    pub max: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for result listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show entry counts
    Stats,

    /// List cached versions
    List {
        /// List every requested version instead of existing ones
        #[arg(long)]
        requested: bool,
    },

    /// Delete both cache files
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the download command
#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("which").required(true).args(["version", "all"])))]
pub struct DownloadArgs {
    /// Version to download, or `latest`
    #[arg(long)]
    pub version: Option<String>,

    /// Download every existing version in the cache
    #[arg(long)]
    pub all: bool,

    /// Platform to download (default: current platform)
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Download every platform
    #[arg(long, conflicts_with = "platform")]
    pub all_platforms: bool,

    /// Output directory (default: from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the rename command
#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("which").required(true).args(["version", "all"])))]
pub struct RenameArgs {
    /// Version directory to rename
    #[arg(long)]
    pub version: Option<String>,

    /// Rename every version directory
    #[arg(long)]
    pub all: bool,

    /// Downloads directory (default: from config)
    #[arg(long)]
    pub downloads: Option<PathBuf>,

    /// Show what would be renamed without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the release command
#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("which").required(true).args(["version", "all", "new"])))]
pub struct ReleaseArgs {
    /// Release a single version
    #[arg(long)]
    pub version: Option<String>,

    /// Release every downloaded version
    #[arg(long)]
    pub all: bool,

    /// Release existing cached versions that have no release yet
    #[arg(long)]
    pub new: bool,

    /// Downloads directory (default: from config)
    #[arg(long)]
    pub downloads: Option<PathBuf>,

    /// Target repository as owner/repo (default: from config, then current repo)
    #[arg(long)]
    pub repo: Option<String>,

    /// Download missing artifacts before releasing
    #[arg(long)]
    pub fetch: bool,

    /// Print what would be released without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., scan.max_patch)
        key: String,
        /// Value to set
        value: String,
    },
}
