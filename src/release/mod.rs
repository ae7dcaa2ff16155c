//! Republishing downloaded artifacts as releases
//!
//! A release is built from one `<downloads>/<version>/` directory:
//! artifacts are renamed to stable asset names, summed into `SHA256SUMS`
//! and handed to a `ReleasePublisher`.

mod assets;
mod plan;
mod publisher;

pub use assets::{
    downloaded_versions, prepare_assets, rename_version_dir, write_checksums, RenameReport,
    CHECKSUMS_FILE,
};
pub use plan::{plan_new_releases, ReleaseDraft};
pub use publisher::{DryRunPublisher, GhCliPublisher, ReleasePublisher};
