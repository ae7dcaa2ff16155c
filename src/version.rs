//! Release version values
//!
//! A `Version` is a `major.minor.patch` triple parsed from a string such as
//! `0.1.21`, `v1.2.3` or `1.2.3-beta`. Ordering and equality look only at the
//! numeric triple; the input text (minus any leading `v`) is kept in `raw`
//! and is what `Display` prints.

use crate::error::{RelscoutError, RelscoutResult};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A comparable release version
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    raw: String,
}

impl Version {
    /// Parse a version string.
    ///
    /// Accepts `^\d+\.\d+\.\d+(-.*)?$` after stripping one leading `v`,
    /// where the suffix may not contain a newline.
    /// Components must be ASCII digits and fit in a `u64`.
    pub fn parse(input: &str) -> RelscoutResult<Self> {
        let raw = input.strip_prefix('v').unwrap_or(input);
        let invalid = || RelscoutError::InvalidFormat(raw.to_string());

        let numeric = match raw.split_once('-') {
            // `.` in the suffix pattern never matches a line break
            Some((_, suffix)) if suffix.contains('\n') => return Err(invalid()),
            Some((numeric, _suffix)) => numeric,
            None => raw,
        };

        let mut parts = numeric.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        Ok(Self {
            major: parse_component(major).ok_or_else(invalid)?,
            minor: parse_component(minor).ok_or_else(invalid)?,
            patch: parse_component(patch).ok_or_else(invalid)?,
            raw: raw.to_string(),
        })
    }

    /// Build a plain `M.N.P` version from its components
    pub fn from_parts(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            raw: format!("{}.{}.{}", major, minor, patch),
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The parsed text without the `v` prefix, suffix included
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Numeric triple
    pub fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Stable ascending sort by numeric triple
pub fn sort_ascending(versions: &mut [Version]) {
    versions.sort();
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple().cmp(&other.triple())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.triple() == other.triple()
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Version {
    type Err = RelscoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
