//! Persistent version cache
//!
//! Records which versions have been probed (`requested`) and which were
//! confirmed to exist (`existing`). The cache is append-only; the only way
//! to forget is `clear`, which deletes both sets.
//!
//! # Layout
//!
//! | Set | File | Written when |
//! |-----|------|--------------|
//! | requested | `requested_versions.txt` | every completed probe |
//! | existing | `existing_versions.txt` | a probe found the artifact |
//!
//! Files live in the configured cache directory (default: the working
//! directory), one version per line, no header, no ordering.

mod memory;
mod store;
mod text;
mod versions;

pub use memory::MemoryStore;
pub use store::{VersionSet, VersionStore};
pub use text::TextFileStore;
pub use versions::{CacheLookup, CacheStats, VersionCache};
