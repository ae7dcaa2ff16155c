//! Static platform table
//!
//! Every artifact the vendor publishes is identified by a platform name such as
//! `darwin-arm64`. The table drives download URLs, on-disk names and the
//! asset names used for republished releases.

use crate::error::{RelscoutError, RelscoutResult};
use serde::Serialize;

/// One downloadable platform build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
    /// Name used in vendor URLs
    pub name: &'static str,
    /// Artifact file extension, without the dot
    pub extension: &'static str,
    /// Operating system (`darwin`, `windows`, `linux`)
    pub os: &'static str,
    /// Architecture (`amd64`, `arm64`)
    pub arch: &'static str,
}

const PLATFORMS: &[Platform] = &[
    Platform { name: "darwin-arm64", extension: "dmg", os: "darwin", arch: "arm64" },
    Platform { name: "darwin-x64", extension: "dmg", os: "darwin", arch: "amd64" },
    Platform { name: "win32-x64", extension: "exe", os: "windows", arch: "amd64" },
    Platform { name: "win32-arm64", extension: "exe", os: "windows", arch: "arm64" },
    Platform { name: "linux-x64", extension: "AppImage", os: "linux", arch: "amd64" },
    Platform { name: "linux-arm64", extension: "AppImage", os: "linux", arch: "arm64" },
];

/// All known platforms
pub fn all() -> &'static [Platform] {
    PLATFORMS
}

/// All platform names
pub fn names() -> Vec<&'static str> {
    PLATFORMS.iter().map(|p| p.name).collect()
}

/// Find a platform by its URL name
pub fn by_name(name: &str) -> RelscoutResult<Platform> {
    PLATFORMS
        .iter()
        .find(|p| p.name == name)
        .copied()
        .ok_or_else(|| RelscoutError::UnknownPlatform(name.to_string()))
}

/// The platform this binary was built for
pub fn current() -> RelscoutResult<Platform> {
    find_host(std::env::consts::OS, std::env::consts::ARCH)
}

fn find_host(rust_os: &str, rust_arch: &str) -> RelscoutResult<Platform> {
    let os = match rust_os {
        "macos" => "darwin",
        other => other,
    };
    let arch = match rust_arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => other,
    };

    PLATFORMS
        .iter()
        .find(|p| p.os == os && p.arch == arch)
        .copied()
        .ok_or_else(|| RelscoutError::UnsupportedPlatform {
            os: rust_os.to_string(),
            arch: rust_arch.to_string(),
        })
}

impl Platform {
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Short architecture label used in file names
    pub fn arch_label(&self) -> &'static str {
        match self.arch {
            "amd64" => "x64",
            other => other,
        }
    }

    /// File name the vendor serves, e.g. `Qoder-darwin-arm64.dmg`
    pub fn artifact_name(&self, product: &str) -> String {
        if self.is_windows() {
            format!("{}UserSetup-{}.exe", product, self.arch_label())
        } else {
            format!("{}-{}.{}", product, self.name, self.extension)
        }
    }

    /// File name used for republished assets, e.g. `qoder-0.1.21-darwin-arm64.dmg`
    pub fn asset_name(&self, product: &str, version: &str) -> String {
        let product = product.to_lowercase();
        if self.is_windows() {
            format!("{}-{}-windows-{}.exe", product, version, self.arch_label())
        } else {
            format!("{}-{}-{}.{}", product, version, self.name, self.extension)
        }
    }

    /// Download URL; `version` may be `latest`
    pub fn download_url(&self, host: &str, product: &str, version: &str) -> String {
        release_url(host, version, &self.artifact_name(product))
    }
}

/// `<host>/release/<version>/<file>`
pub fn release_url(host: &str, version: &str, file: &str) -> String {
    format!("{}/release/{}/{}", host.trim_end_matches('/'), version, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_six_unique_platforms() {
        let mut names = names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn by_name_finds_and_rejects() {
        assert_eq!(by_name("linux-arm64").unwrap().extension, "AppImage");
        assert!(matches!(
            by_name("windows-x64"),
            Err(RelscoutError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn host_mapping() {
        assert_eq!(find_host("macos", "aarch64").unwrap().name, "darwin-arm64");
        assert_eq!(find_host("linux", "x86_64").unwrap().name, "linux-x64");
        assert_eq!(find_host("windows", "x86_64").unwrap().name, "win32-x64");
        assert!(matches!(
            find_host("freebsd", "x86_64"),
            Err(RelscoutError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn artifact_names() {
        assert_eq!(
            by_name("darwin-arm64").unwrap().artifact_name("Qoder"),
            "Qoder-darwin-arm64.dmg"
        );
        assert_eq!(
            by_name("win32-arm64").unwrap().artifact_name("Qoder"),
            "QoderUserSetup-arm64.exe"
        );
        assert_eq!(
            by_name("linux-x64").unwrap().artifact_name("Qoder"),
            "Qoder-linux-x64.AppImage"
        );
    }

    #[test]
    fn asset_names() {
        assert_eq!(
            by_name("darwin-x64").unwrap().asset_name("Qoder", "0.1.21"),
            "qoder-0.1.21-darwin-x64.dmg"
        );
        assert_eq!(
            by_name("win32-x64").unwrap().asset_name("Qoder", "0.1.21"),
            "qoder-0.1.21-windows-x64.exe"
        );
    }

    #[test]
    fn download_urls() {
        let p = by_name("darwin-arm64").unwrap();
        assert_eq!(
            p.download_url("https://download.qoder.com/", "Qoder", "0.1.21"),
            "https://download.qoder.com/release/0.1.21/Qoder-darwin-arm64.dmg"
        );
        assert_eq!(
            p.download_url("https://download.qoder.com", "Qoder", "latest"),
            "https://download.qoder.com/release/latest/Qoder-darwin-arm64.dmg"
        );
    }
}
