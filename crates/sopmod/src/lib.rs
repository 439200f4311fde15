//! `sopmod`: manages installed versions of the sop tool and the Go runtime,
//! and doubles as the `sop`/`sopls` shim when started under those names.

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::Path;

use anyhow::Result;
use sopmod_core::config::GlobalConfig;
use sopmod_core::{Layout, Shim};
use sopmod_shim::{DispatchPlan, Dispatcher, GlobalResolver, ManifestResolver, PairResolver};

pub mod cli;
pub mod commands;
pub mod context;
pub mod logging;

use crate::cli::App;
use crate::context::Context;

/// Run a manager command.
pub fn run(app: App) -> Result<()> {
    logging::init(app.verbose);
    let ctx = Context::from_env(app.yes)?;
    commands::dispatch(&ctx, app.command)
}

/// Resolve what a shim invocation from `cwd` would run.
///
/// Project manifests from `cwd` upwards take precedence over the global
/// defaults, field by field.
pub fn plan_shim(layout: &Layout, cwd: &Path, shim: Shim, args: Vec<OsString>) -> sopmod_shim::Result<DispatchPlan> {
    let config = GlobalConfig::load(layout.config_path())?;
    let resolver = PairResolver::new(ManifestResolver::new(cwd), GlobalResolver::new(&config));
    Dispatcher::new(layout, resolver).plan(shim, args)
}

/// Shim mode: dispatch to the resolved binary. Only returns on failure.
pub fn run_shim(shim: Shim, args: Vec<OsString>) -> Result<Infallible> {
    logging::init(false);
    let layout = Layout::from_env()?;
    let cwd = std::env::current_dir()?;
    let plan = plan_shim(&layout, &cwd, shim, args)?;
    Ok(sopmod_shim::exec(plan)?)
}
