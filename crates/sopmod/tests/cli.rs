use std::env::consts::EXE_SUFFIX;
use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use sopmod::cli::{Commands, InstallArgs, ListArgs, RemoveArgs, UpdateArgs};
use sopmod::commands;
use sopmod::context::Context;
use sopmod_core::{Layout, Shim, Toolchain};
use sopmod_fetch::mock::MockClient;
use sopmod_fetch::{RUNTIME_INDEX_URL, TOOL_RELEASES_URL};
use sopmod_platform::Platform;
use tempfile::{TempDir, tempdir};

fn runtime_archive(platform: &Platform) -> Vec<u8> {
    let binary = format!("go/bin/go{EXE_SUFFIX}");
    let body: &[u8] = b"go binary";
    if platform.archive_ext() == "zip" {
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(binary.as_str(), SimpleFileOptions::default().unix_permissions(0o755))
            .unwrap();
        writer.write_all(body).unwrap();
        writer.finish().unwrap().into_inner()
    } else {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Regular);
        builder.append_data(&mut header, binary.as_str(), body).unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }
}

fn release(version: &str, triple: &str) -> serde_json::Value {
    serde_json::json!({
        "tag_name": format!("v{version}"),
        "draft": false,
        "prerelease": false,
        "assets": [
            {"name": format!("sop-{triple}"), "browser_download_url": format!("https://dl.test/{version}/sop")},
            {"name": format!("sopls-{triple}"), "browser_download_url": format!("https://dl.test/{version}/sopls")}
        ]
    })
}

/// Upstream with go 1.22.5 and sop 0.4.0, 0.5.0 and 0.6.0, built for the host.
fn upstream() -> MockClient {
    let platform = Platform::current().unwrap();
    let triple = platform.target_triple();
    let archive_url = format!("https://go.dev/dl/go1.22.5.{platform}.{}", platform.archive_ext());

    let mut client = MockClient::new()
        .with_json(
            RUNTIME_INDEX_URL,
            &serde_json::json!([
                {"version": "go1.23rc2", "stable": false, "files": []},
                {"version": "go1.22.5", "stable": true, "files": []}
            ]),
        )
        .with(&archive_url, 200, runtime_archive(&platform))
        .with_json(
            TOOL_RELEASES_URL,
            &serde_json::json!([release("0.6.0", &triple), release("0.5.0", &triple), release("0.4.0", &triple)]),
        );
    for version in ["0.4.0", "0.5.0", "0.6.0"] {
        client = client
            .with_json(&format!("{TOOL_RELEASES_URL}/tags/v{version}"), &release(version, &triple))
            .with(&format!("https://dl.test/{version}/sop"), 200, format!("sop {version}").into_bytes())
            .with(&format!("https://dl.test/{version}/sopls"), 200, format!("sopls {version}").into_bytes());
    }
    client
}

struct Fixture {
    root:    TempDir,
    project: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            root:    tempdir().unwrap(),
            project: tempdir().unwrap(),
        }
    }

    fn context(&self) -> Context {
        let source = self.project.path().join("sopmod-manager");
        std::fs::write(&source, b"manager binary").unwrap();
        Context {
            layout:      Layout::new(self.root.path()),
            client:      Box::new(upstream()),
            cwd:         self.project.path().to_path_buf(),
            assume_yes:  true,
            progress:    false,
            shim_source: Some(source),
        }
    }
}

fn install(ctx: &Context, toolchain: Toolchain, version: &str) {
    commands::dispatch(
        ctx,
        Commands::Install(InstallArgs {
            toolchain,
            version: version.into(),
        }),
    )
    .unwrap();
}

#[test]
fn test_first_tool_install_becomes_default() {
    let fx = Fixture::new();
    let ctx = fx.context();

    let err = sopmod::plan_shim(&ctx.layout, &ctx.cwd, Shim::Tool, Vec::new()).unwrap_err();
    assert!(matches!(err, sopmod_shim::Error::NoVersionConfigured));

    install(&ctx, Toolchain::Tool, "0.5.0");

    let config = ctx.load_config().unwrap();
    assert_eq!(config.default_tool.as_deref(), Some("0.5.0"));
    assert_eq!(config.default_runtime.as_deref(), Some("1.22.5"));
    for shim in Shim::ALL {
        assert_eq!(std::fs::read(ctx.layout.shim(shim)).unwrap(), b"manager binary");
    }

    let plan = sopmod::plan_shim(&ctx.layout, &ctx.cwd, Shim::Tool, Vec::new()).unwrap();
    assert_eq!(plan.program, ctx.layout.shim_target(Shim::Tool, "0.5.0"));
    assert_eq!(plan.runtime_version.as_deref(), Some("1.22.5"));
}

#[test]
fn test_later_installs_keep_the_default() {
    let fx = Fixture::new();
    let ctx = fx.context();

    install(&ctx, Toolchain::Tool, "0.5.0");
    install(&ctx, Toolchain::Tool, "0.4.0");

    let config = ctx.load_config().unwrap();
    assert_eq!(config.default_tool.as_deref(), Some("0.5.0"));
    assert!(ctx.layout.is_installed(Toolchain::Tool, "0.4.0"));
}

#[test]
fn test_manifest_pin_overrides_default() {
    let fx = Fixture::new();
    let ctx = fx.context();
    install(&ctx, Toolchain::Tool, "0.5.0");
    install(&ctx, Toolchain::Tool, "0.4.0");
    std::fs::write(fx.project.path().join("sop.mod"), "sop = \"0.4\"\n").unwrap();

    let plan = sopmod::plan_shim(&ctx.layout, &ctx.cwd, Shim::Companion, Vec::new()).unwrap();
    assert_eq!(plan.program, ctx.layout.shim_target(Shim::Companion, "0.4.0"));
    assert_eq!(
        commands::which::resolve(&ctx, Toolchain::Tool).unwrap(),
        ctx.layout.binary(Toolchain::Tool, "0.4.0")
    );
    assert_eq!(
        commands::which::resolve(&ctx, Toolchain::Runtime).unwrap(),
        ctx.layout.binary(Toolchain::Runtime, "1.22.5")
    );
}

#[test]
fn test_which_reports_missing_pin() {
    let fx = Fixture::new();
    let ctx = fx.context();
    install(&ctx, Toolchain::Tool, "0.5.0");
    std::fs::write(fx.project.path().join("sop.mod"), "tool = \"0.3\"\n").unwrap();

    let err = commands::which::resolve(&ctx, Toolchain::Tool).unwrap_err();
    assert!(err.to_string().contains("sopmod install sop 0.3"), "{err}");
}

#[test]
fn test_remove_clears_matching_default() {
    let fx = Fixture::new();
    let ctx = fx.context();
    install(&ctx, Toolchain::Tool, "0.5.0");

    commands::dispatch(
        &ctx,
        Commands::Remove(RemoveArgs {
            toolchain: Toolchain::Tool,
            version:   "0.5.0".into(),
        }),
    )
    .unwrap();

    let config = ctx.load_config().unwrap();
    assert_eq!(config.default_tool, None);
    assert_eq!(config.default_runtime.as_deref(), Some("1.22.5"));
    assert!(!ctx.layout.is_installed(Toolchain::Tool, "0.5.0"));

    let again = commands::dispatch(
        &ctx,
        Commands::Remove(RemoveArgs {
            toolchain: Toolchain::Tool,
            version:   "0.5.0".into(),
        }),
    );
    assert!(again.is_err());
}

#[test]
fn test_remove_by_partial_version_clears_default() {
    let fx = Fixture::new();
    let ctx = fx.context();
    install(&ctx, Toolchain::Tool, "0.5.0");
    install(&ctx, Toolchain::Tool, "0.4.0");

    commands::dispatch(
        &ctx,
        Commands::Remove(RemoveArgs {
            toolchain: Toolchain::Tool,
            version:   "0.5".into(),
        }),
    )
    .unwrap();

    assert_eq!(ctx.load_config().unwrap().default_tool, None);
    assert!(!ctx.layout.is_installed(Toolchain::Tool, "0.5.0"));
    assert!(ctx.layout.is_installed(Toolchain::Tool, "0.4.0"));
}

#[test]
fn test_remove_rejects_path_like_versions() {
    let fx = Fixture::new();
    let ctx = fx.context();
    install(&ctx, Toolchain::Tool, "0.5.0");

    for version in ["..", ".", ""] {
        let result = commands::dispatch(
            &ctx,
            Commands::Remove(RemoveArgs {
                toolchain: Toolchain::Tool,
                version:   version.into(),
            }),
        );
        assert!(result.is_err(), "{version:?}");
    }

    assert!(ctx.layout.is_installed(Toolchain::Tool, "0.5.0"));
    assert!(ctx.layout.is_installed(Toolchain::Runtime, "1.22.5"));
    assert_eq!(ctx.load_config().unwrap().default_tool.as_deref(), Some("0.5.0"));
}

#[test]
fn test_update_moves_default_to_latest() {
    let fx = Fixture::new();
    let ctx = fx.context();
    install(&ctx, Toolchain::Tool, "0.5.0");

    commands::dispatch(&ctx, Commands::Update(UpdateArgs { toolchain: None })).unwrap();

    let config = ctx.load_config().unwrap();
    assert_eq!(config.default_tool.as_deref(), Some("0.6.0"));
    assert_eq!(config.default_runtime.as_deref(), Some("1.22.5"));
    assert!(ctx.layout.is_installed(Toolchain::Tool, "0.5.0"));
    assert!(ctx.layout.is_installed(Toolchain::Tool, "0.6.0"));
}

#[test]
fn test_list_and_version_succeed() {
    let fx = Fixture::new();
    let ctx = fx.context();
    commands::dispatch(&ctx, Commands::List(ListArgs { toolchain: None })).unwrap();
    install(&ctx, Toolchain::Runtime, "latest");
    commands::dispatch(
        &ctx,
        Commands::List(ListArgs {
            toolchain: Some(Toolchain::Runtime),
        }),
    )
    .unwrap();
    commands::dispatch(&ctx, Commands::Version).unwrap();
}
