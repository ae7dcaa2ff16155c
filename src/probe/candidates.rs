//! Version candidate generation
//!
//! Two strategies, both lazy iterators of `M.N.P` strings:
//! - `BoundedRange` enumerates every triple up to an inclusive bound.
//! - `DecrementWalk` walks backwards from a start version.

use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Every `major.minor.patch` with each component in `0..=max`, patch innermost
#[derive(Debug, Clone)]
pub struct BoundedRange {
    max: (u64, u64, u64),
    next: Option<(u64, u64, u64)>,
    /// `None` once the count no longer fits in a `u64`
    remaining: Option<u64>,
}

impl BoundedRange {
    pub fn new(max_major: u64, max_minor: u64, max_patch: u64) -> Self {
        let mut range = Self {
            max: (max_major, max_minor, max_patch),
            next: Some((0, 0, 0)),
            remaining: None,
        };
        range.remaining = range.total();
        range
    }

    /// Number of candidates the range yields in total, if it fits in a `u64`
    pub fn total(&self) -> Option<u64> {
        let (a, b, c) = self.max;
        a.checked_add(1)?
            .checked_mul(b.checked_add(1)?)?
            .checked_mul(c.checked_add(1)?)
    }
}

impl Iterator for BoundedRange {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (major, minor, patch) = self.next?;
        let (max_major, max_minor, max_patch) = self.max;

        self.next = if patch < max_patch {
            Some((major, minor, patch + 1))
        } else if minor < max_minor {
            Some((major, minor + 1, 0))
        } else if major < max_major {
            Some((major + 1, 0, 0))
        } else {
            None
        };
        self.remaining = self.remaining.map(|n| n.saturating_sub(1));

        Some(format!("{}.{}.{}", major, minor, patch))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_none() {
            return (0, Some(0));
        }
        match self.remaining.map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}

/// Values a component resets to when the walk borrows from the next one up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkCeilings {
    /// Minor version after a major decrement
    pub minor: u64,
    /// Patch version after a minor or major decrement
    pub patch: u64,
}

impl Default for WalkCeilings {
    fn default() -> Self {
        Self { minor: 99, patch: 100 }
    }
}

/// Strictly decreasing walk from a start version.
///
/// Patch counts down; at zero the minor drops by one and patch resets to the
/// patch ceiling; when minor is also zero the major drops and both reset.
/// Ends after `max_steps` items or right after yielding `0.0.0`.
#[derive(Debug, Clone)]
pub struct DecrementWalk {
    current: Option<(u64, u64, u64)>,
    remaining: usize,
    ceilings: WalkCeilings,
}

impl DecrementWalk {
    pub fn new(start: &Version, max_steps: usize, ceilings: WalkCeilings) -> Self {
        Self {
            current: Some(start.triple()),
            remaining: max_steps,
            ceilings,
        }
    }
}

impl Iterator for DecrementWalk {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let (major, minor, patch) = self.current?;
        self.remaining -= 1;

        self.current = if patch > 0 {
            Some((major, minor, patch - 1))
        } else if minor > 0 {
            Some((major, minor - 1, self.ceilings.patch))
        } else if major > 0 {
            Some((major - 1, self.ceilings.minor, self.ceilings.patch))
        } else {
            None
        };

        Some(format!("{}.{}.{}", major, minor, patch))
    }
}
