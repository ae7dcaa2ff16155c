//! In-memory version store
//!
//! Keeps insertion order so callers can see exactly what was appended.
//! Nothing survives the process.

use super::store::{VersionSet, VersionStore};
use crate::error::RelscoutResult;
use std::collections::{BTreeSet, HashMap};

/// Version store that lives only in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sets: HashMap<VersionSet, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every appended entry for a set, duplicates included, in append order
    pub fn entries(&self, set: VersionSet) -> &[String] {
        self.sets.get(&set).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl VersionStore for MemoryStore {
    fn load(&self, set: VersionSet) -> RelscoutResult<BTreeSet<String>> {
        Ok(self.entries(set).iter().cloned().collect())
    }

    fn append(&mut self, set: VersionSet, version: &str) -> RelscoutResult<()> {
        self.sets.entry(set).or_default().push(version.to_string());
        Ok(())
    }

    fn remove(&mut self, set: VersionSet) -> RelscoutResult<()> {
        self.sets.remove(&set);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
