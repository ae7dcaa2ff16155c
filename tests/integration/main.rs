//! Integration tests for relscout

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the user's config and environment
    fn relscout(temp: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("relscout");
        cmd.env_remove("RELSCOUT_CONFIG")
            .env_remove("RELSCOUT_CACHE_DIR")
            .env_remove("RELSCOUT_HOST")
            .env("CI", "1")
            .arg("--config")
            .arg(temp.join("config.toml"))
            .arg("--cache-dir")
            .arg(temp);
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        relscout(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("release version discovery"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        relscout(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("relscout"));
    }

    #[test]
    fn platforms_lists_table() {
        let temp = TempDir::new().unwrap();
        relscout(temp.path())
            .arg("platforms")
            .assert()
            .success()
            .stdout(predicate::str::contains("win32-arm64"))
            .stdout(predicate::str::contains("QoderUserSetup-arm64.exe"))
            .stdout(predicate::str::contains("Qoder-linux-x64.AppImage"));
    }

    #[test]
    fn detect_scans_and_caches() {
        let temp = TempDir::new().unwrap();
        let mut server = mockito::Server::new();
        let found = server
            .mock("HEAD", "/release/0.0.1/Qoder-darwin-arm64.dmg")
            .with_status(200)
            .expect(1)
            .create();
        let missing = server
            .mock("HEAD", mockito::Matcher::Regex(r"^/release/0\.0\.[02]/".to_string()))
            .with_status(404)
            .expect(2)
            .create();

        relscout(temp.path())
            .args(["--host", &server.url()])
            .args(["detect", "--max-major", "0", "--max-minor", "0", "--max-patch", "2"])
            .args(["--format", "plain"])
            .assert()
            .success()
            .stdout("0.0.1\n");

        found.assert();
        missing.assert();

        let requested = fs::read_to_string(temp.path().join("requested_versions.txt")).unwrap();
        assert_eq!(requested.lines().count(), 3);
        let existing = fs::read_to_string(temp.path().join("existing_versions.txt")).unwrap();
        assert_eq!(existing.trim(), "0.0.1");

        // Second run is answered entirely from the cache
        relscout(temp.path())
            .args(["--host", "http://127.0.0.1:9"])
            .args(["detect", "--max-major", "0", "--max-minor", "0", "--max-patch", "2"])
            .args(["--format", "plain"])
            .assert()
            .success()
            .stdout("0.0.1\n");
    }

    #[test]
    fn detect_single_version_from_cache() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requested_versions.txt"), "0.1.21\n").unwrap();
        fs::write(temp.path().join("existing_versions.txt"), "0.1.21\n").unwrap();

        relscout(temp.path())
            .args(["--host", "http://127.0.0.1:9"])
            .args(["detect", "--version", "v0.1.21", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"exists\": true"))
            .stdout(predicate::str::contains("\"cached\": true"));
    }

    #[test]
    fn detect_rejects_bad_version() {
        let temp = TempDir::new().unwrap();
        relscout(temp.path())
            .args(["detect", "--version", "1.2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid version format: 1.2"));
    }

    #[test]
    fn bruteforce_walks_down() {
        let temp = TempDir::new().unwrap();
        let mut server = mockito::Server::new();
        server
            .mock("HEAD", "/release/1.0.0/Qoder-darwin-arm64.dmg")
            .with_status(200)
            .create();
        server
            .mock("HEAD", "/release/0.99.100/Qoder-darwin-arm64.dmg")
            .with_status(404)
            .create();

        relscout(temp.path())
            .args(["--host", &server.url()])
            .args(["bruteforce", "--start", "1.0.0", "--max", "2", "--format", "plain"])
            .assert()
            .success()
            .stdout("1.0.0\n");

        let requested = fs::read_to_string(temp.path().join("requested_versions.txt")).unwrap();
        assert!(requested.contains("0.99.100"));
    }

    #[test]
    fn cache_stats_and_clear() {
        let temp = TempDir::new().unwrap();

        relscout(temp.path())
            .args(["cache", "stats"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Requested: 0"))
            .stdout(predicate::str::contains("Existing: 0"));

        fs::write(temp.path().join("requested_versions.txt"), "0.1.0\n0.1.1\n").unwrap();
        fs::write(temp.path().join("existing_versions.txt"), "0.1.1\n").unwrap();

        relscout(temp.path())
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout("0.1.1\n");

        relscout(temp.path())
            .args(["cache", "clear", "--yes"])
            .assert()
            .success();

        assert!(!temp.path().join("requested_versions.txt").exists());
        assert!(!temp.path().join("existing_versions.txt").exists());
    }

    #[test]
    fn cache_clear_removes_blank_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requested_versions.txt"), "\n\n").unwrap();
        fs::write(temp.path().join("existing_versions.txt"), "  \n").unwrap();

        relscout(temp.path())
            .args(["cache", "clear", "--yes"])
            .assert()
            .success();

        assert!(!temp.path().join("requested_versions.txt").exists());
        assert!(!temp.path().join("existing_versions.txt").exists());
    }

    #[test]
    fn cache_clear_reports_undeletable_file() {
        let temp = TempDir::new().unwrap();
        let blocked = temp.path().join("requested_versions.txt");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();
        fs::write(temp.path().join("existing_versions.txt"), "0.1.0\n").unwrap();

        relscout(temp.path())
            .args(["cache", "clear", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cache clear errors"));

        // The other set is still removed
        assert!(!temp.path().join("existing_versions.txt").exists());
    }

    #[test]
    fn rename_then_dry_run_release() {
        let temp = TempDir::new().unwrap();
        let version_dir = temp.path().join("downloads").join("0.1.0");
        fs::create_dir_all(&version_dir).unwrap();
        fs::write(version_dir.join("Qoder-linux-x64.AppImage"), "app").unwrap();
        let downloads = temp.path().join("downloads");

        relscout(temp.path())
            .args(["rename", "--version", "0.1.0", "--downloads"])
            .arg(&downloads)
            .assert()
            .success();
        assert!(version_dir.join("qoder-0.1.0-linux-x64.AppImage").exists());

        relscout(temp.path())
            .args(["release", "--version", "0.1.0", "--dry-run", "--downloads"])
            .arg(&downloads)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Would create release v0.1.0 (Qoder 0.1.0)",
            ));
    }

    #[test]
    fn dry_run_release_with_fetch_downloads_nothing() {
        let temp = TempDir::new().unwrap();
        let downloads = temp.path().join("downloads");
        let mut server = mockito::Server::new();
        let any_get = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create();

        relscout(temp.path())
            .args(["--host", &server.url()])
            .args(["release", "--version", "0.2.0", "--dry-run", "--fetch", "--downloads"])
            .arg(&downloads)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Would download: ",
            ))
            .stdout(predicate::str::contains("Qoder-linux-arm64.AppImage"))
            .stdout(predicate::str::contains("qoder-0.2.0-windows-arm64.exe"));

        any_get.assert();
        assert!(!downloads.exists());
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();

        relscout(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));

        relscout(temp.path())
            .args(["config", "set", "scan.max_patch", "7"])
            .assert()
            .success();

        relscout(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("max_patch = 7"));

        relscout(temp.path())
            .args(["config", "set", "scan.nope", "7"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid config key scan.nope"));
    }

    #[test]
    fn completions_print_script() {
        let temp = TempDir::new().unwrap();
        relscout(temp.path())
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("relscout"));
    }
}
