//! Version discovery
//!
//! Generates candidate versions, checks them against the download host and
//! records the results in the version cache.

mod candidates;
mod prober;
mod scanner;

pub use candidates::{BoundedRange, DecrementWalk, WalkCeilings};
pub use prober::{ExistenceProbe, HttpProber};
pub use scanner::{Classification, ScanObserver, ScanReport, Scanner, Silent};
