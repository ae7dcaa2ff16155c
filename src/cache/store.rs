//! Storage backend abstraction for the version cache
//!
//! A backend holds two named sets of version strings. The flat-file backend
//! in `text.rs` is the default; anything that can append to and read back a
//! named set (an embedded key-value store, a single JSON file) can stand in.

use crate::error::RelscoutResult;
use std::collections::BTreeSet;
use std::fmt;

/// The two logical sets tracked by the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VersionSet {
    /// A probe was attempted for the version
    Requested,
    /// A probe confirmed the version exists
    Existing,
}

impl VersionSet {
    /// Both sets, in the order they are written by `record_outcome`
    pub const ALL: [VersionSet; 2] = [VersionSet::Requested, VersionSet::Existing];

    /// Backing file name used by the flat-file store
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Requested => "requested_versions.txt",
            Self::Existing => "existing_versions.txt",
        }
    }
}

impl fmt::Display for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => f.write_str("requested"),
            Self::Existing => f.write_str("existing"),
        }
    }
}

/// Persistent backend for the two version sets.
///
/// Implementations are used from a single thread by a single process.
/// Duplicate suppression happens one layer up in `VersionCache`.
pub trait VersionStore {
    /// Read the full set. A set that was never written is empty, not an error.
    fn load(&self, set: VersionSet) -> RelscoutResult<BTreeSet<String>>;

    /// Append one version to a set
    fn append(&mut self, set: VersionSet, version: &str) -> RelscoutResult<()>;

    /// Delete a whole set. Deleting a set that does not exist succeeds.
    fn remove(&mut self, set: VersionSet) -> RelscoutResult<()>;

    /// Make everything appended so far durable
    fn flush(&mut self) -> RelscoutResult<()> {
        Ok(())
    }

    /// Human-readable location, for logs and `cache stats`
    fn location(&self) -> String;
}
