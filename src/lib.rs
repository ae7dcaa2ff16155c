//! Relscout - release version discovery and mirroring
//!
//! Discovers which versions of a product exist on a download host that has
//! no listing API, by probing candidate URLs and remembering every answer in
//! a flat-file cache. Found versions can be downloaded and republished.

pub mod cache;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod platform;
pub mod probe;
pub mod release;
pub mod ui;
pub mod version;

pub use error::{RelscoutError, RelscoutResult};
