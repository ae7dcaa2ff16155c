//! Version cache: the source of truth for what has been probed
//!
//! Wraps a `VersionStore` with the membership rules the scanners rely on:
//! inserts are idempotent, `record_outcome` is the only write path, and read
//! failures degrade to "unknown" so a scan can keep going.

use super::store::{VersionSet, VersionStore};
use crate::error::{RelscoutError, RelscoutResult};
use crate::version::{sort_ascending, Version};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Result of looking a version up in the cache.
///
/// `exists` only means something when `requested` is true; `(false, _)`
/// means the version must be probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLookup {
    pub requested: bool,
    pub exists: bool,
}

impl CacheLookup {
    /// The cached verdict, if there is one
    pub fn known(&self) -> Option<bool> {
        self.requested.then_some(self.exists)
    }
}

/// Entry counts per set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct CacheStats {
    pub requested: usize,
    pub existing: usize,
}

/// Requested/existing version sets over a pluggable store
#[derive(Debug)]
pub struct VersionCache<S> {
    store: S,
}

impl<S: VersionStore> VersionCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a whole set, logging and degrading to empty on failure
    fn snapshot(&self, set: VersionSet) -> BTreeSet<String> {
        self.store.load(set).unwrap_or_else(|e| {
            warn!("Treating {} versions as empty: {}", set, e);
            BTreeSet::new()
        })
    }

    /// Whether `version` is in `set`
    pub fn is_member(&self, set: VersionSet, version: &str) -> bool {
        self.snapshot(set).contains(version)
    }

    /// Add `version` to `set` unless it is already there
    pub fn add(&mut self, set: VersionSet, version: &str) -> RelscoutResult<()> {
        if self.is_member(set, version) {
            return Ok(());
        }
        self.store.append(set, version)
    }

    /// Record a probe result: always `requested`, plus `existing` when found.
    ///
    /// Both writes are attempted; the first failure is returned.
    pub fn record_outcome(&mut self, version: &str, exists: bool) -> RelscoutResult<()> {
        let requested = self.add(VersionSet::Requested, version);
        let existing = if exists {
            self.add(VersionSet::Existing, version)
        } else {
            Ok(())
        };
        debug!("Recorded {} (exists: {})", version, exists);
        requested.and(existing)
    }

    /// Look up what is known about `version`
    pub fn lookup(&self, version: &str) -> CacheLookup {
        CacheLookup {
            requested: self.is_member(VersionSet::Requested, version),
            exists: self.is_member(VersionSet::Existing, version),
        }
    }

    /// Snapshot of the existing set
    pub fn all_existing(&self) -> BTreeSet<String> {
        self.snapshot(VersionSet::Existing)
    }

    /// Snapshot of the requested set
    pub fn all_requested(&self) -> BTreeSet<String> {
        self.snapshot(VersionSet::Requested)
    }

    /// Existing versions that parse, sorted ascending. Unparsable lines are skipped.
    pub fn existing_versions(&self) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .all_existing()
            .iter()
            .filter_map(|raw| match Version::parse(raw) {
                Ok(version) => Some(version),
                Err(e) => {
                    debug!("Skipping cached entry: {}", e);
                    None
                }
            })
            .collect();
        sort_ascending(&mut versions);
        versions
    }

    /// Delete both sets. Each deletion is attempted; failures are reported together.
    pub fn clear(&mut self) -> RelscoutResult<()> {
        let failures: Vec<String> = VersionSet::ALL
            .iter()
            .filter_map(|set| self.store.remove(*set).err())
            .map(|e| e.to_string())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RelscoutError::CacheClear(failures.join("; ")))
        }
    }

    /// Entry counts
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            requested: self.all_requested().len(),
            existing: self.all_existing().len(),
        }
    }

    /// Persist pending writes
    pub fn flush(&mut self) -> RelscoutResult<()> {
        self.store.flush()
    }

    /// Where the cache lives
    pub fn location(&self) -> String {
        self.store.location()
    }
}
