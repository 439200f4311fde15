use std::ffi::OsString;
use std::path::Path;

use sopmod_core::config::GlobalConfig;
use sopmod_core::{Layout, Shim, Toolchain};
use sopmod_shim::{
    Dispatcher, Error, GlobalResolver, ManifestResolver, PairResolver, install_shims_from,
};
use tempfile::{TempDir, tempdir};

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"binary").unwrap();
}

fn install_tool(layout: &Layout, version: &str, with_companion: bool) {
    touch(&layout.shim_target(Shim::Tool, version));
    if with_companion {
        touch(&layout.shim_target(Shim::Companion, version));
    }
}

fn install_runtime(layout: &Layout, version: &str) { touch(&layout.binary(Toolchain::Runtime, version)); }

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

    fn layout(&self) -> Layout { Layout::new(self.root.path()) }

    fn manifest(&self, body: &str) { std::fs::write(self.project.path().join("sop.mod"), body).unwrap(); }
}

fn args(list: &[&str]) -> Vec<OsString> { list.iter().map(OsString::from).collect() }

#[test]
fn test_nothing_configured() {
    let fx = Fixture::new();
    let layout = fx.layout();
    let config = GlobalConfig::default();
    let resolver = PairResolver::new(ManifestResolver::new(fx.project.path()), GlobalResolver::new(&config));

    let result = Dispatcher::new(&layout, resolver).plan(Shim::Tool, args(&["build"]));

    assert!(matches!(result, Err(Error::NoVersionConfigured)));
}

#[test]
fn test_global_default_without_runtime_inherits_path() {
    let fx = Fixture::new();
    let layout = fx.layout();
    install_tool(&layout, "0.5.0", true);
    let config = GlobalConfig {
        default_tool:    Some("0.5.0".into()),
        default_runtime: None,
    };
    let resolver = PairResolver::new(ManifestResolver::new(fx.project.path()), GlobalResolver::new(&config));

    let plan = Dispatcher::new(&layout, resolver)
        .plan(Shim::Tool, args(&["build", "-o", "out"]))
        .unwrap();

    assert_eq!(plan.program, layout.shim_target(Shim::Tool, "0.5.0"));
    assert_eq!(plan.args, args(&["build", "-o", "out"]));
    assert_eq!(plan.path, None);
    assert_eq!(plan.runtime_version, None);
}

#[test]
fn test_manifest_partial_versions_map_to_installed() {
    let fx = Fixture::new();
    let layout = fx.layout();
    install_tool(&layout, "0.4.2", true);
    install_tool(&layout, "0.4.10", true);
    install_tool(&layout, "0.5.0", true);
    install_runtime(&layout, "1.21.13");
    install_runtime(&layout, "1.22.5");
    fx.manifest("sop = \"0.4\"\ngo = \"1.21\"\n");
    let config = GlobalConfig {
        default_tool:    Some("0.5.0".into()),
        default_runtime: Some("1.22.5".into()),
    };
    let resolver = PairResolver::new(ManifestResolver::new(fx.project.path()), GlobalResolver::new(&config));

    let inherited = std::env::join_paths(["/usr/bin", "/bin"]).unwrap();
    let plan = Dispatcher::new(&layout, resolver)
        .with_path(Some(inherited))
        .plan(Shim::Companion, Vec::new())
        .unwrap();

    assert_eq!(plan.tool_version, "0.4.10");
    assert_eq!(plan.program, layout.shim_target(Shim::Companion, "0.4.10"));
    assert_eq!(plan.runtime_version.as_deref(), Some("1.21.13"));

    let path = plan.path.unwrap();
    let entries: Vec<_> = std::env::split_paths(&path).collect();
    assert_eq!(entries[0], layout.binary_dir(Toolchain::Runtime, "1.21.13"));
    assert_eq!(&entries[1..], &[Path::new("/usr/bin").to_path_buf(), Path::new("/bin").to_path_buf()]);
}

#[test]
fn test_tool_not_installed_names_requested_specifier() {
    let fx = Fixture::new();
    let layout = fx.layout();
    install_tool(&layout, "0.5.0", true);
    fx.manifest("tool = \"0.3\"\n");
    let config = GlobalConfig::default();
    let resolver = PairResolver::new(ManifestResolver::new(fx.project.path()), GlobalResolver::new(&config));

    let err = Dispatcher::new(&layout, resolver)
        .plan(Shim::Tool, Vec::new())
        .unwrap_err();

    assert!(matches!(&err, Error::NotInstalled { toolchain: Toolchain::Tool, specifier } if specifier == "0.3"));
    assert!(err.to_string().contains("sopmod install sop 0.3"));
}

#[test]
fn test_runtime_not_installed_is_reported_separately() {
    let fx = Fixture::new();
    let layout = fx.layout();
    install_tool(&layout, "0.5.0", true);
    install_runtime(&layout, "1.22.5");
    let config = GlobalConfig {
        default_tool:    Some("0.5.0".into()),
        default_runtime: Some("1.23".into()),
    };
    let resolver = PairResolver::new(ManifestResolver::new(fx.project.path()), GlobalResolver::new(&config));

    let err = Dispatcher::new(&layout, resolver)
        .plan(Shim::Tool, Vec::new())
        .unwrap_err();

    assert!(err.to_string().contains("sopmod install go 1.23"));
}

#[test]
fn test_missing_companion_binary() {
    let fx = Fixture::new();
    let layout = fx.layout();
    install_tool(&layout, "0.5.0", false);
    let config = GlobalConfig {
        default_tool:    Some("0.5.0".into()),
        default_runtime: None,
    };
    let resolver = GlobalResolver::new(&config);

    let result = Dispatcher::new(&layout, resolver).plan(Shim::Companion, Vec::new());

    assert!(matches!(result, Err(Error::MissingBinary { shim: Shim::Companion, .. })));
}

#[test]
fn test_malformed_manifest_is_an_error() {
    let fx = Fixture::new();
    let layout = fx.layout();
    fx.manifest("sop = [not toml");
    let config = GlobalConfig {
        default_tool:    Some("0.5.0".into()),
        default_runtime: None,
    };
    let resolver = PairResolver::new(ManifestResolver::new(fx.project.path()), GlobalResolver::new(&config));

    let result = Dispatcher::new(&layout, resolver).plan(Shim::Tool, Vec::new());

    assert!(matches!(result, Err(Error::Core(sopmod_core::Error::Parse { .. }))));
}

#[test]
fn test_install_shims_is_idempotent() {
    let fx = Fixture::new();
    let layout = fx.layout();
    let source = fx.project.path().join("sopmod-bin");
    std::fs::write(&source, b"manager v1").unwrap();

    let first = install_shims_from(&layout, &source).unwrap();
    assert_eq!(first, vec![layout.shim(Shim::Tool), layout.shim(Shim::Companion)]);

    std::fs::write(&source, b"manager v2").unwrap();
    install_shims_from(&layout, &source).unwrap();

    for shim in Shim::ALL {
        assert_eq!(std::fs::read(layout.shim(shim)).unwrap(), b"manager v2");
    }
}
