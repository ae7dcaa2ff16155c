//! Flat-file version store
//!
//! Each set is a newline-delimited list of version strings in its own file.
//! Lines are trimmed and blank lines ignored on read. Writes append and are
//! durable as soon as `append` returns, so `flush` has nothing to do.

use super::store::{VersionSet, VersionStore};
use crate::error::{RelscoutError, RelscoutResult};
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Version store backed by `requested_versions.txt` / `existing_versions.txt`
#[derive(Debug, Clone)]
pub struct TextFileStore {
    dir: PathBuf,
}

impl TextFileStore {
    /// Create a store rooted at `dir`. Nothing is touched on disk until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the backing files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the backing file for a set
    pub fn path(&self, set: VersionSet) -> PathBuf {
        self.dir.join(set.file_name())
    }
}

impl VersionStore for TextFileStore {
    fn load(&self, set: VersionSet) -> RelscoutResult<BTreeSet<String>> {
        let path = self.path(set);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(RelscoutError::cache_io(path, e)),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn append(&mut self, set: VersionSet, version: &str) -> RelscoutResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| RelscoutError::cache_io(&self.dir, e))?;

        let path = self.path(set);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| RelscoutError::cache_io(&path, e))?;

        writeln!(file, "{}", version).map_err(|e| RelscoutError::cache_io(&path, e))?;
        debug!("Appended {} to {}", version, path.display());
        Ok(())
    }

    fn remove(&mut self, set: VersionSet) -> RelscoutResult<()> {
        let path = self.path(set);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RelscoutError::cache_io(path, e)),
        }
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = TextFileStore::new(dir.path());
        assert!(store.load(VersionSet::Existing).unwrap().is_empty());
    }

    #[test]
    fn load_trims_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("requested_versions.txt"),
            "0.1.0\n\n  0.1.1  \r\n\t\n0.1.0\n",
        )
        .unwrap();

        let store = TextFileStore::new(dir.path());
        let set = store.load(VersionSet::Requested).unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["0.1.0".to_string(), "0.1.1".to_string()]
        );
    }

    #[test]
    fn append_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = TextFileStore::new(&nested);

        store.append(VersionSet::Existing, "1.0.0").unwrap();
        store.append(VersionSet::Existing, "1.0.1").unwrap();

        let content = fs::read_to_string(nested.join("existing_versions.txt")).unwrap();
        assert_eq!(content, "1.0.0\n1.0.1\n");
    }

    #[test]
    fn remove_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let mut store = TextFileStore::new(dir.path().join("never-created"));
        store.remove(VersionSet::Requested).unwrap();
    }

    #[test]
    fn unreadable_file_is_cache_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the read fail with something other than NotFound
        fs::create_dir(dir.path().join("existing_versions.txt")).unwrap();
        let store = TextFileStore::new(dir.path());

        let err = store.load(VersionSet::Existing).unwrap_err();
        assert!(matches!(err, RelscoutError::CacheIo { .. }));
    }
}
