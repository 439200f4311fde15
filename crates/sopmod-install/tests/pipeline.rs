use std::env::consts::EXE_SUFFIX;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use sha2::{Digest, Sha256};
use sopmod_core::{Layout, Shim, Toolchain};
use sopmod_fetch::mock::MockClient;
use sopmod_fetch::{RUNTIME_INDEX_URL, TOOL_RELEASES_URL};
use sopmod_install::{Error, Installer};
use sopmod_platform::Platform;
use sopmod_platform::arch::Arch;
use sopmod_platform::os::OS;
use tempfile::tempdir;

const GO_ARCHIVE_URL: &str = "https://go.dev/dl/go1.22.5.linux-amd64.tar.gz";
const GO_ARCHIVE_NAME: &str = "go1.22.5.linux-amd64.tar.gz";

fn linux() -> Platform { Platform::new(OS::Linux, Arch::Amd64) }

fn tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Regular);
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

fn go_archive() -> Vec<u8> {
    let binary = format!("go/bin/go{EXE_SUFFIX}");
    tar_gz(&[(binary.as_str(), b"#!/bin/sh\necho go\n"), ("go/VERSION", b"go1.22.5")])
}

fn sha256(data: &[u8]) -> String { hex::encode(Sha256::digest(data)) }

fn runtime_index(sha: &str) -> serde_json::Value {
    serde_json::json!([
        {"version": "go1.22.5", "stable": true, "files": [
            {"filename": GO_ARCHIVE_NAME, "os": "linux", "arch": "amd64", "sha256": sha, "kind": "archive"}
        ]},
        {"version": "go1.21.13", "stable": true, "files": []}
    ])
}

fn runtime_client(archive: Vec<u8>, sha: &str) -> MockClient {
    MockClient::new()
        .with_json(RUNTIME_INDEX_URL, &runtime_index(sha))
        .with(GO_ARCHIVE_URL, 200, archive)
}

fn hidden_entries(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with('.'))
        .collect()
}

#[test]
fn test_runtime_install_publishes_verified_tree() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let archive = go_archive();
    let client = runtime_client(archive.clone(), &sha256(&archive));

    let installed = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Runtime, "1.22.5")
        .unwrap();

    assert_eq!(installed.version, "1.22.5");
    assert!(installed.fresh);
    assert!(layout.binary(Toolchain::Runtime, "1.22.5").is_file());
    assert_eq!(layout.list_installed(Toolchain::Runtime).unwrap(), vec!["1.22.5"]);
    assert!(hidden_entries(&layout.versions_dir(Toolchain::Runtime)).is_empty());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(layout.binary(Toolchain::Runtime, "1.22.5"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[test]
fn test_reinstall_does_not_download() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let archive = go_archive();
    let client = runtime_client(archive.clone(), &sha256(&archive));
    let installer = Installer::new(&layout, &client).with_platform(linux());

    assert!(installer.install(Toolchain::Runtime, "1.22.5").unwrap().fresh);
    let again = installer.install(Toolchain::Runtime, "1.22.5").unwrap();

    assert!(!again.fresh);
    assert_eq!(client.count(GO_ARCHIVE_URL), 1);
}

#[test]
fn test_latest_runtime_resolves_through_index() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let archive = go_archive();
    let client = runtime_client(archive.clone(), &sha256(&archive));

    let installed = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Runtime, "latest")
        .unwrap();

    assert_eq!(installed.version, "1.22.5");
    assert_eq!(client.count(RUNTIME_INDEX_URL), 1);
}

#[test]
fn test_checksum_mismatch_leaves_nothing_behind() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let client = runtime_client(go_archive(), &"0".repeat(64));

    let result = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Runtime, "1.22.5");

    assert!(matches!(
        result,
        Err(Error::Fetch(sopmod_fetch::Error::ChecksumMismatch { .. }))
    ));
    assert!(!layout.is_installed(Toolchain::Runtime, "1.22.5"));
    assert!(hidden_entries(&layout.versions_dir(Toolchain::Runtime)).is_empty());
}

#[test]
fn test_archive_without_binary_is_rejected() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let archive = tar_gz(&[("go/README", b"no binary here")]);
    let client = runtime_client(archive.clone(), &sha256(&archive));

    let result = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Runtime, "1.22.5");

    assert!(matches!(result, Err(Error::BinaryNotFound { .. })));
    assert!(layout.list_installed(Toolchain::Runtime).unwrap().is_empty());
    assert!(hidden_entries(&layout.versions_dir(Toolchain::Runtime)).is_empty());
}

#[test]
fn test_unpublished_runtime_is_version_not_found() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let client = MockClient::new().with_json(RUNTIME_INDEX_URL, &runtime_index(""));

    let result = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Runtime, "1.99.0");

    assert!(matches!(result, Err(Error::VersionNotFound(_))));
}

fn tool_release_client(assets: serde_json::Value) -> MockClient {
    let release = serde_json::json!({
        "tag_name": "v0.5.0",
        "draft": false,
        "prerelease": false,
        "assets": assets,
    });
    let companion = format!("sopls{EXE_SUFFIX}");
    MockClient::new()
        .with_json(&format!("{TOOL_RELEASES_URL}/tags/v0.5.0"), &release)
        .with("https://dl.test/sop", 200, b"sop binary".to_vec())
        .with(
            "https://dl.test/sopls.tar.gz",
            200,
            tar_gz(&[(companion.as_str(), b"sopls binary")]),
        )
}

#[test]
fn test_tool_install_with_raw_and_archived_assets() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let client = tool_release_client(serde_json::json!([
        {"name": "sop-x86_64-unknown-linux-gnu", "browser_download_url": "https://dl.test/sop"},
        {"name": "sopls-x86_64-unknown-linux-gnu.tar.gz", "browser_download_url": "https://dl.test/sopls.tar.gz"},
        {"name": "sop-aarch64-apple-darwin", "browser_download_url": "https://dl.test/other"}
    ]));

    let installed = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Tool, "0.5.0")
        .unwrap();

    assert!(installed.fresh);
    let sop = layout.shim_target(Shim::Tool, "0.5.0");
    let sopls = layout.shim_target(Shim::Companion, "0.5.0");
    assert_eq!(std::fs::read(&sop).unwrap(), b"sop binary");
    assert_eq!(std::fs::read(&sopls).unwrap(), b"sopls binary");
    assert_eq!(client.count("https://dl.test/other"), 0);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&sop).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[test]
fn test_tool_without_companion_installs() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let client = tool_release_client(serde_json::json!([
        {"name": "sop-x86_64-unknown-linux-gnu", "browser_download_url": "https://dl.test/sop"}
    ]));

    Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Tool, "0.5.0")
        .unwrap();

    assert!(layout.shim_target(Shim::Tool, "0.5.0").is_file());
    assert!(!layout.shim_target(Shim::Companion, "0.5.0").exists());
}

#[test]
fn test_tool_missing_platform_asset() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let client = tool_release_client(serde_json::json!([
        {"name": "sop-aarch64-apple-darwin", "browser_download_url": "https://dl.test/other"}
    ]));

    let result = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Tool, "0.5.0");

    assert!(matches!(result, Err(Error::VersionNotFound(_))));
    assert!(!layout.is_installed(Toolchain::Tool, "0.5.0"));
}

#[test]
fn test_unknown_tool_release() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    let client = MockClient::new();

    let result = Installer::new(&layout, &client)
        .with_platform(linux())
        .install(Toolchain::Tool, "9.9.9");

    assert!(matches!(result, Err(Error::VersionNotFound(_))));
}

#[test]
fn test_incompatible_runtimes_trigger_latest_install() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    std::fs::create_dir_all(layout.version_dir(Toolchain::Runtime, "1.20.0")).unwrap();
    let archive = go_archive();
    let client = runtime_client(archive.clone(), &sha256(&archive));

    let chosen = Installer::new(&layout, &client)
        .with_platform(linux())
        .find_or_install_compatible_runtime("0.5.0")
        .unwrap();

    assert_eq!(chosen.version, "1.22.5");
    assert!(chosen.fresh);
    assert!(layout.is_installed(Toolchain::Runtime, "1.22.5"));
}

#[test]
fn test_remove_deletes_version_directory() {
    let root = tempdir().unwrap();
    let layout = Layout::new(root.path());
    std::fs::create_dir_all(layout.binary_dir(Toolchain::Runtime, "1.22.5")).unwrap();
    let client = MockClient::new();
    let installer = Installer::new(&layout, &client);

    installer.remove(Toolchain::Runtime, "1.22.5").unwrap();

    assert!(!layout.is_installed(Toolchain::Runtime, "1.22.5"));
    assert!(matches!(
        installer.remove(Toolchain::Runtime, "1.22.5"),
        Err(Error::VersionNotFound(_))
    ));
}
