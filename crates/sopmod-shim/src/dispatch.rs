//! Shim dispatch as a single pass: identify, resolve tool, resolve runtime,
//! map both onto the installed set, then build the process to run.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use sopmod_core::{Layout, Shim, Toolchain};
use sopmod_platform::env::PathModifier;
use sopmod_version::resolve_installed;
use tracing::debug;

use crate::error::{Error, Result};
use crate::resolver::{Requested, VersionResolver};

/// How the process was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// `Some` when started under a shim name, `None` in manager mode.
    pub shim: Option<Shim>,
    /// Arguments after argument zero.
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn from_args(args: impl IntoIterator<Item = OsString>) -> Self {
        let mut args = args.into_iter();
        let shim = args.next().and_then(|argv0| shim_name(&argv0));
        Self {
            shim,
            args: args.collect(),
        }
    }

    pub fn from_env() -> Self { Self::from_args(std::env::args_os()) }
}

fn shim_name(argv0: &OsStr) -> Option<Shim> {
    let stem = Path::new(argv0).file_stem()?.to_str()?;
    Shim::from_command(stem)
}

/// Everything needed to start the real binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPlan {
    pub program:         PathBuf,
    pub args:            Vec<OsString>,
    /// Replacement `PATH`; `None` inherits the environment unchanged.
    pub path:            Option<OsString>,
    pub tool_version:    String,
    pub runtime_version: Option<String>,
}

pub struct Dispatcher<'a, R> {
    layout:   &'a Layout,
    resolver: R,
    path:     Option<OsString>,
}

impl<'a, R: VersionResolver> Dispatcher<'a, R> {
    /// Dispatch against the `PATH` of the current process.
    pub fn new(layout: &'a Layout, resolver: R) -> Self {
        Self {
            layout,
            resolver,
            path: std::env::var_os("PATH"),
        }
    }

    /// Use `path` as the inherited `PATH` value.
    pub fn with_path(mut self, path: Option<OsString>) -> Self {
        self.path = path;
        self
    }

    pub fn plan(&self, shim: Shim, args: Vec<OsString>) -> Result<DispatchPlan> {
        let tool = self
            .resolver
            .resolve(Toolchain::Tool)?
            .ok_or(Error::NoVersionConfigured)?;
        let runtime = self.resolver.resolve(Toolchain::Runtime)?;
        debug!(tool = %tool.specifier, tool_origin = %tool.origin, "requested tool");

        let tool_version = self.installed(Toolchain::Tool, &tool)?;
        let runtime_version = runtime
            .as_ref()
            .map(|requested| self.installed(Toolchain::Runtime, requested))
            .transpose()?;

        let program = self.layout.shim_target(shim, &tool_version);
        if !program.is_file() {
            return Err(Error::MissingBinary {
                shim,
                version: tool_version,
                path: program,
            });
        }

        let path = match &runtime_version {
            Some(version) => {
                let modifier = match &self.path {
                    Some(value) => PathModifier::from_value(value.clone()),
                    None => PathModifier::default(),
                };
                Some(modifier.prepend(self.layout.binary_dir(Toolchain::Runtime, version)).build()?)
            }
            None => None,
        };

        debug!(program = %program.display(), ?runtime_version, "dispatching");
        Ok(DispatchPlan {
            program,
            args,
            path,
            tool_version,
            runtime_version,
        })
    }

    fn installed(&self, toolchain: Toolchain, requested: &Requested) -> Result<String> {
        let installed = self.layout.list_installed(toolchain)?;
        resolve_installed(&requested.specifier, &installed).ok_or_else(|| Error::NotInstalled {
            toolchain,
            specifier: requested.specifier.clone(),
        })
    }
}
