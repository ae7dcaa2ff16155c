//! Scan driver: candidates -> cache lookup -> probe -> cache update
//!
//! The cache is the source of truth. A candidate that was requested before is
//! answered from the cache without touching the network; everything else is
//! probed once and recorded. Network failures are skipped and left uncached
//! so the next run retries them.

use super::prober::ExistenceProbe;
use crate::cache::{VersionCache, VersionStore};
use crate::error::{RelscoutError, RelscoutResult};
use crate::version::{sort_ascending, Version};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Callbacks for progress reporting during a scan
pub trait ScanObserver {
    /// Called before each candidate is handled
    fn on_candidate(&self, _index: usize, _candidate: &str) {}

    /// Called for each existing version, cached or freshly probed
    fn on_found(&self, _version: &Version, _cached: bool) {}

    /// Called when a probe fails and the candidate is skipped
    fn on_probe_error(&self, _candidate: &str, _error: &RelscoutError) {}
}

/// Observer that ignores everything
pub struct Silent;

impl ScanObserver for Silent {}

/// Outcome of classifying a single version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub exists: bool,
    /// Answered from the cache, no network call made
    pub cached: bool,
}

/// Summary of a finished scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Existing versions, ascending
    pub found: Vec<Version>,
    /// Network probes completed
    pub checked: usize,
    /// Candidates answered from the cache
    pub skipped: usize,
    /// Probes that failed and were left uncached
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScanReport {
    pub fn latest(&self) -> Option<&Version> {
        self.found.last()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Sequential scanner over a version cache and a prober
pub struct Scanner<S, P> {
    cache: VersionCache<S>,
    prober: P,
    flush_every: usize,
}

impl<S: VersionStore, P: ExistenceProbe> Scanner<S, P> {
    /// `flush_every` is the number of probes between cache flushes (0 = only at the end)
    pub fn new(cache: VersionCache<S>, prober: P, flush_every: usize) -> Self {
        Self {
            cache,
            prober,
            flush_every,
        }
    }

    pub fn cache(&self) -> &VersionCache<S> {
        &self.cache
    }

    pub fn into_cache(self) -> VersionCache<S> {
        self.cache
    }

    /// Classify one version, consulting the cache first.
    ///
    /// A cache write failure is logged and does not fail the classification.
    pub fn classify(&mut self, version: &str) -> RelscoutResult<Classification> {
        if let Some(exists) = self.cache.lookup(version).known() {
            debug!("{} answered from cache (exists: {})", version, exists);
            return Ok(Classification {
                exists,
                cached: true,
            });
        }

        let exists = self.prober.probe(version)?;
        if let Err(e) = self.cache.record_outcome(version, exists) {
            warn!("Failed to cache result for {}: {}", version, e);
        }

        Ok(Classification {
            exists,
            cached: false,
        })
    }

    /// Run every candidate through `classify`, collecting existing versions
    pub fn run<I>(&mut self, candidates: I, observer: &dyn ScanObserver) -> ScanReport
    where
        I: IntoIterator<Item = String>,
    {
        let started_at = Utc::now();
        let mut found = Vec::new();
        let mut checked = 0;
        let mut skipped = 0;
        let mut failed = 0;

        for (index, candidate) in candidates.into_iter().enumerate() {
            observer.on_candidate(index, &candidate);

            let classification = match self.classify(&candidate) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Skipping {}: {}", candidate, e);
                    observer.on_probe_error(&candidate, &e);
                    failed += 1;
                    continue;
                }
            };

            if classification.cached {
                skipped += 1;
            } else {
                checked += 1;
                if self.flush_every > 0 && checked % self.flush_every == 0 {
                    self.flush();
                }
            }

            if classification.exists {
                match Version::parse(&candidate) {
                    Ok(version) => {
                        observer.on_found(&version, classification.cached);
                        found.push(version);
                    }
                    Err(e) => debug!("Found entry is not a version: {}", e),
                }
            }
        }

        self.flush();
        sort_ascending(&mut found);

        info!(
            "Scan finished: {} found, {} checked, {} cached, {} failed",
            found.len(),
            checked,
            skipped,
            failed
        );

        ScanReport {
            found,
            checked,
            skipped,
            failed,
            started_at,
            finished_at: Utc::now(),
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.cache.flush() {
            warn!("Failed to save cache: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryStore, VersionSet};
    use crate::probe::{BoundedRange, DecrementWalk, WalkCeilings};
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Probe that answers from a fixed set and records every call
    struct FakeProbe {
        existing: HashSet<&'static str>,
        unreachable: HashSet<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeProbe {
        fn new(existing: &[&'static str]) -> Self {
            Self {
                existing: existing.iter().copied().collect(),
                unreachable: HashSet::new(),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing_on(mut self, versions: &[&'static str]) -> Self {
            self.unreachable = versions.iter().copied().collect();
            self
        }
    }

    impl ExistenceProbe for FakeProbe {
        fn probe(&self, version: &str) -> RelscoutResult<bool> {
            self.calls.borrow_mut().push(version.to_string());
            if self.unreachable.contains(version) {
                return Err(RelscoutError::network(version, "connection refused"));
            }
            Ok(self.existing.contains(version))
        }
    }

    fn raw(versions: &[Version]) -> Vec<String> {
        versions.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn bounded_scan_finds_and_records() {
        let probe = FakeProbe::new(&["0.1.1", "1.0.0"]);
        let mut scanner = Scanner::new(VersionCache::new(MemoryStore::new()), &probe, 10);

        let report = scanner.run(BoundedRange::new(1, 1, 1), &Silent);

        assert_eq!(raw(&report.found), vec!["0.1.1", "1.0.0"]);
        assert_eq!(report.checked, 8);
        assert_eq!(report.skipped, 0);
        assert_eq!(scanner.cache().stats().requested, 8);
        assert_eq!(scanner.cache().stats().existing, 2);
    }

    #[test]
    fn cached_candidates_skip_the_network() {
        let mut cache = VersionCache::new(MemoryStore::new());
        cache.record_outcome("0.0.0", false).unwrap();
        cache.record_outcome("0.0.1", true).unwrap();

        let probe = FakeProbe::new(&["0.0.2"]);
        let mut scanner = Scanner::new(cache, &probe, 0);
        let report = scanner.run(BoundedRange::new(0, 0, 2), &Silent);

        assert_eq!(*probe.calls.borrow(), vec!["0.0.2".to_string()]);
        assert_eq!(raw(&report.found), vec!["0.0.1", "0.0.2"]);
        assert_eq!(report.checked, 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn network_errors_are_not_cached() {
        let probe = FakeProbe::new(&["0.0.1"]).failing_on(&["0.0.1"]);
        let mut scanner = Scanner::new(VersionCache::new(MemoryStore::new()), &probe, 1);

        let report = scanner.run(BoundedRange::new(0, 0, 2), &Silent);

        assert_eq!(report.failed, 1);
        assert_eq!(report.checked, 2);
        assert!(report.found.is_empty());
        assert_eq!(scanner.cache().lookup("0.0.1").known(), None);
        assert_eq!(
            scanner.cache().store().entries(VersionSet::Requested),
            ["0.0.0", "0.0.2"]
        );
    }

    #[test]
    fn second_run_is_served_from_cache() {
        let probe = FakeProbe::new(&["0.1.19", "0.1.21"]);
        let walk = || {
            DecrementWalk::new(
                &Version::parse("0.1.21").unwrap(),
                4,
                WalkCeilings::default(),
            )
        };

        let mut scanner = Scanner::new(VersionCache::new(MemoryStore::new()), &probe, 10);
        let first = scanner.run(walk(), &Silent);
        let second = scanner.run(walk(), &Silent);

        assert_eq!(raw(&first.found), vec!["0.1.19", "0.1.21"]);
        assert_eq!(raw(&second.found), raw(&first.found));
        assert_eq!(second.checked, 0);
        assert_eq!(second.skipped, 4);
        assert_eq!(probe.calls.borrow().len(), 4);
    }

    #[test]
    fn classify_single_version() {
        let probe = FakeProbe::new(&["2.0.0"]);
        let mut scanner = Scanner::new(VersionCache::new(MemoryStore::new()), &probe, 0);

        assert_eq!(
            scanner.classify("2.0.0").unwrap(),
            Classification {
                exists: true,
                cached: false
            }
        );
        assert_eq!(
            scanner.classify("2.0.0").unwrap(),
            Classification {
                exists: true,
                cached: true
            }
        );
    }

    #[test]
    fn observer_sees_found_versions() {
        struct Collect(RefCell<Vec<(String, bool)>>);
        impl ScanObserver for Collect {
            fn on_found(&self, version: &Version, cached: bool) {
                self.0.borrow_mut().push((version.to_string(), cached));
            }
        }

        let mut cache = VersionCache::new(MemoryStore::new());
        cache.record_outcome("0.0.0", true).unwrap();
        let probe = FakeProbe::new(&["0.0.1"]);
        let observer = Collect(RefCell::new(Vec::new()));

        Scanner::new(cache, &probe, 0).run(BoundedRange::new(0, 0, 1), &observer);

        assert_eq!(
            *observer.0.borrow(),
            vec![("0.0.0".to_string(), true), ("0.0.1".to_string(), false)]
        );
    }

    /// Store that records flushes and can refuse writes
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryStore,
        /// Requested entry count at each flush
        flushes: Vec<usize>,
        read_only: bool,
    }

    impl VersionStore for RecordingStore {
        fn load(&self, set: VersionSet) -> RelscoutResult<std::collections::BTreeSet<String>> {
            self.inner.load(set)
        }

        fn append(&mut self, set: VersionSet, version: &str) -> RelscoutResult<()> {
            if self.read_only {
                return Err(RelscoutError::cache_io(
                    set.file_name(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.inner.append(set, version)
        }

        fn remove(&mut self, set: VersionSet) -> RelscoutResult<()> {
            self.inner.remove(set)
        }

        fn flush(&mut self) -> RelscoutResult<()> {
            self.flushes
                .push(self.inner.entries(VersionSet::Requested).len());
            Ok(())
        }

        fn location(&self) -> String {
            "recording".to_string()
        }
    }

    #[test]
    fn flushes_every_n_probes_ignoring_cache_hits() {
        let mut cache = VersionCache::new(RecordingStore::default());
        cache.record_outcome("0.0.0", false).unwrap();
        cache.record_outcome("0.0.4", false).unwrap();

        let probe = FakeProbe::new(&[]);
        let mut scanner = Scanner::new(cache, &probe, 3);
        let report = scanner.run(BoundedRange::new(0, 0, 8), &Silent);

        assert_eq!(report.checked, 7);
        assert_eq!(report.skipped, 2);
        // Two periodic flushes after probes 3 and 6, then one at the end
        assert_eq!(scanner.cache().store().flushes, vec![5, 8, 9]);
    }

    #[test]
    fn zero_flush_interval_flushes_only_at_end() {
        let probe = FakeProbe::new(&[]);
        let mut scanner = Scanner::new(VersionCache::new(RecordingStore::default()), &probe, 0);
        scanner.run(BoundedRange::new(0, 0, 6), &Silent);

        assert_eq!(scanner.cache().store().flushes, vec![7]);
    }

    #[test]
    fn failed_cache_write_does_not_stop_the_scan() {
        let store = RecordingStore {
            read_only: true,
            ..RecordingStore::default()
        };
        let probe = FakeProbe::new(&["0.0.1"]);
        let mut scanner = Scanner::new(VersionCache::new(store), &probe, 1);

        let report = scanner.run(BoundedRange::new(0, 0, 2), &Silent);

        assert_eq!(raw(&report.found), vec!["0.0.1"]);
        assert_eq!(report.checked, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(scanner.cache().lookup("0.0.1").known(), None);
    }
}
