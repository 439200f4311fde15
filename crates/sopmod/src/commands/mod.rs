//! One module per subcommand.

use std::fmt::Display;
use std::path::Path;

use anyhow::Result;
use console::style;
use sopmod_core::Shim;
use sopmod_platform::{env, shell};

use crate::cli::Commands;
use crate::context::Context;

pub mod default;
pub mod install;
pub mod list;
pub mod remove;
pub mod setup;
pub mod update;
pub mod which;

pub fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Install(args) => install::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Default(args) => default::run(ctx, args),
        Commands::Remove(args) => remove::run(ctx, args),
        Commands::Update(args) => update::run(ctx, args),
        Commands::Which(args) => which::run(ctx, args),
        Commands::Setup(args) => setup::run(ctx, args),
        Commands::Version => {
            println!("sopmod {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

pub(crate) fn success(message: impl Display) { println!("{} {message}", style("✓").green().bold()); }

pub(crate) fn warning(message: impl Display) { eprintln!("{} {message}", style("warning:").yellow().bold()); }

pub(crate) fn hint(message: impl Display) { eprintln!("  {} {message}", style("hint:").dim()); }

/// Copy the manager binary to the shim paths and warn if another `sop` wins on PATH.
pub(crate) fn install_shims(ctx: &Context) -> Result<()> {
    match &ctx.shim_source {
        Some(source) => sopmod_shim::install_shims_from(&ctx.layout, source)?,
        None => sopmod_shim::install_shims(&ctx.layout)?,
    };

    let shim = ctx.layout.shim(Shim::Tool);
    if let Ok(found) = ::which::which(Shim::Tool.command())
        && !same_file(&found, &shim)
    {
        warning(format!(
            "`sop` on PATH is {}, which shadows the sopmod shim at {}",
            found.display(),
            shim.display()
        ));
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Tell the user how to put `<root>/bin` on PATH when it is not there yet.
pub(crate) fn path_hint(ctx: &Context) {
    let bin = ctx.layout.bin_dir();
    if env::is_in_path(&bin) {
        return;
    }
    let shell = shell::detect().unwrap_or(shell::Shell::Unknown);
    warning(format!("{} is not on PATH", bin.display()));
    match shell::rc_file(shell) {
        Some(rc) => hint(format!("add `{}` to {rc}", shell::path_export(shell, &bin))),
        None => hint(format!("add `{}` to your shell profile", shell::path_export(shell, &bin))),
    }
}
