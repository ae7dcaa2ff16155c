//! Release asset preparation
//!
//! Turns the vendor-named files in `<downloads>/<version>/` into release
//! assets: each artifact is renamed to `<product>-<version>-<platform>.<ext>`
//! and a `SHA256SUMS` file is written next to them.

use crate::checksum::sha256_file;
use crate::error::{RelscoutError, RelscoutResult};
use crate::platform::Platform;
use crate::version::{sort_ascending, Version};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the checksum file uploaded with every release
pub const CHECKSUMS_FILE: &str = "SHA256SUMS";

/// Version directories under `downloads`, ascending. Other entries are ignored.
pub fn downloaded_versions(downloads: &Path) -> RelscoutResult<Vec<String>> {
    let entries = fs::read_dir(downloads)
        .map_err(|e| RelscoutError::io(format!("reading {}", downloads.display()), e))?;

    let mut versions: Vec<Version> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| Version::parse(&entry.file_name().to_string_lossy()).ok())
        .collect();
    sort_ascending(&mut versions);

    Ok(versions.into_iter().map(|v| v.raw().to_string()).collect())
}

/// Result of renaming one version directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Release-named assets now present, in platform table order
    pub assets: Vec<PathBuf>,
    /// Files actually renamed in this pass
    pub renamed: usize,
}

/// Rename every vendor artifact in `version_dir` to its release asset name.
///
/// Existing targets are never overwritten; an asset already carrying its
/// release name is kept as is. With `dry_run` nothing on disk changes and
/// the would-be paths are returned.
pub fn rename_version_dir(
    version_dir: &Path,
    version: &str,
    product: &str,
    platforms: &[Platform],
    dry_run: bool,
) -> RelscoutResult<RenameReport> {
    if !version_dir.is_dir() {
        return Err(RelscoutError::User(format!(
            "version directory {} does not exist. Run 'relscout download --version {}' first",
            version_dir.display(),
            version
        )));
    }

    let mut report = RenameReport::default();

    for platform in platforms {
        let source = version_dir.join(platform.artifact_name(product));
        let target = version_dir.join(platform.asset_name(product, version));

        if target.is_file() {
            debug!("{} already renamed", target.display());
            report.assets.push(target);
            continue;
        }
        if !source.is_file() {
            continue;
        }

        if dry_run {
            println!(
                "[DRY RUN] Would rename: {} -> {}",
                source.display(),
                target.display()
            );
        } else {
            fs::rename(&source, &target).map_err(|e| {
                RelscoutError::io(format!("renaming {}", source.display()), e)
            })?;
            info!("Renamed {} -> {}", source.display(), target.display());
        }
        report.renamed += 1;
        report.assets.push(target);
    }

    if report.assets.is_empty() {
        return Err(RelscoutError::User(format!(
            "no artifacts found in {}",
            version_dir.display()
        )));
    }

    Ok(report)
}

/// Write `SHA256SUMS` for `assets` into `dir` and return its path
pub fn write_checksums(dir: &Path, assets: &[PathBuf]) -> RelscoutResult<PathBuf> {
    let mut content = String::new();
    for asset in assets {
        let name = asset
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let digest = sha256_file(asset)?;
        let _ = writeln!(content, "{}  {}", digest, name);
    }

    let path = dir.join(CHECKSUMS_FILE);
    fs::write(&path, content)
        .map_err(|e| RelscoutError::io(format!("writing {}", path.display()), e))?;
    Ok(path)
}

/// Rename, then checksum, returning the full upload list
pub fn prepare_assets(
    version_dir: &Path,
    version: &str,
    product: &str,
    platforms: &[Platform],
    dry_run: bool,
) -> RelscoutResult<Vec<PathBuf>> {
    let mut assets = rename_version_dir(version_dir, version, product, platforms, dry_run)?.assets;

    if dry_run {
        assets.push(version_dir.join(CHECKSUMS_FILE));
        return Ok(assets);
    }

    match write_checksums(version_dir, &assets) {
        Ok(path) => assets.push(path),
        Err(e) => warn!("Skipping checksums for {}: {}", version, e),
    }
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform;
    use tempfile::TempDir;

    fn setup(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            fs::write(dir.path().join(file), file.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn renames_vendor_files() {
        let dir = setup(&["Qoder-darwin-arm64.dmg", "QoderUserSetup-x64.exe", "notes.txt"]);

        let report =
            rename_version_dir(dir.path(), "0.1.21", "Qoder", platform::all(), false).unwrap();

        assert_eq!(report.renamed, 2);
        assert_eq!(
            report.assets,
            vec![
                dir.path().join("qoder-0.1.21-darwin-arm64.dmg"),
                dir.path().join("qoder-0.1.21-windows-x64.exe"),
            ]
        );
        assert!(!dir.path().join("Qoder-darwin-arm64.dmg").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn existing_target_is_kept() {
        let dir = setup(&["Qoder-linux-x64.AppImage", "qoder-1.0.0-linux-x64.AppImage"]);

        let report = rename_version_dir(dir.path(), "1.0.0", "Qoder", platform::all(), false).unwrap();

        assert_eq!(report.renamed, 0);
        assert_eq!(report.assets.len(), 1);
        assert!(dir.path().join("Qoder-linux-x64.AppImage").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("qoder-1.0.0-linux-x64.AppImage")).unwrap(),
            "qoder-1.0.0-linux-x64.AppImage"
        );
    }

    #[test]
    fn dry_run_leaves_files_alone() {
        let dir = setup(&["Qoder-darwin-x64.dmg"]);

        let report = rename_version_dir(dir.path(), "0.2.0", "Qoder", platform::all(), true).unwrap();

        assert_eq!(report.renamed, 1);
        assert!(dir.path().join("Qoder-darwin-x64.dmg").exists());
        assert!(!dir.path().join("qoder-0.2.0-darwin-x64.dmg").exists());
    }

    #[test]
    fn empty_or_missing_directory_is_an_error() {
        let dir = setup(&[]);
        assert!(rename_version_dir(dir.path(), "0.1.0", "Qoder", platform::all(), false).is_err());
        assert!(
            rename_version_dir(&dir.path().join("0.1.0"), "0.1.0", "Qoder", platform::all(), false)
                .is_err()
        );
    }

    #[test]
    fn lists_version_directories_in_order() {
        let dir = TempDir::new().unwrap();
        for name in ["0.10.0", "0.2.1", "scratch"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("1.0.0"), "not a dir").unwrap();

        assert_eq!(downloaded_versions(dir.path()).unwrap(), vec!["0.2.1", "0.10.0"]);
        assert!(downloaded_versions(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn prepare_assets_writes_checksums() {
        let dir = setup(&["Qoder-darwin-arm64.dmg"]);

        let assets = prepare_assets(dir.path(), "0.1.0", "Qoder", platform::all(), false).unwrap();

        assert_eq!(assets.len(), 2);
        let sums = fs::read_to_string(dir.path().join(CHECKSUMS_FILE)).unwrap();
        let expected = format!(
            "{}  qoder-0.1.0-darwin-arm64.dmg\n",
            sha256_file(&dir.path().join("qoder-0.1.0-darwin-arm64.dmg")).unwrap()
        );
        assert_eq!(sums, expected);
    }
}
