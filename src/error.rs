//! Error types for relscout
//!
//! All modules use `RelscoutResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for relscout operations
pub type RelscoutResult<T> = Result<T, RelscoutError>;

/// All errors that can occur in relscout
#[derive(Error, Debug)]
pub enum RelscoutError {
    // Version errors
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),

    // Network errors
    #[error("Network error for {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadStatus { url: String, status: u16 },

    // Cache errors
    #[error("Cache IO error on {path}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache clear errors: {0}")]
    CacheClear(String),

    // Platform errors
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config key {key}: {reason}")]
    ConfigKey { key: String, reason: String },

    // External command errors
    #[error("Required CLI not found: {name}. {hint}")]
    CliNotFound { name: String, hint: String },

    #[error("GitHub CLI not authenticated. Run: gh auth login")]
    GithubNotAuthenticated,

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML document error: {0}")]
    TomlEdit(#[from] toml_edit::TomlError),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl RelscoutError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a cache IO error for a backing file
    pub fn cache_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheIo {
            path: path.into(),
            source,
        }
    }

    /// Create a network error for a URL
    pub fn network(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Transient failures that a later run may get past. Never cached.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Network { .. } => Some("Nothing was cached for this request; re-run later"),
            Self::GithubNotAuthenticated => Some("Run: gh auth login"),
            Self::CliNotFound { .. } => Some("Install GitHub CLI from https://cli.github.com/"),
            Self::UnknownPlatform(_) => Some("Run: relscout platforms"),
            Self::UnsupportedPlatform { .. } => Some("Pass --platform explicitly"),
            _ => None,
        }
    }
}
