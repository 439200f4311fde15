use anyhow::Result;
use sopmod_core::Toolchain;

use super::{default, hint, success};
use crate::cli::UpdateArgs;
use crate::context::Context;

pub fn run(ctx: &Context, args: UpdateArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    ctx.layout.ensure_dirs()?;

    // Runtime first so the tool update can pair with the new runtime.
    let toolchains = match args.toolchain {
        Some(toolchain) => vec![toolchain],
        None => vec![Toolchain::Runtime, Toolchain::Tool],
    };

    let installer = ctx.installer();
    for toolchain in toolchains {
        let latest = installer.latest(toolchain)?;
        let installed = installer.install(toolchain, &latest)?;
        if installed.fresh {
            success(format!("{toolchain} {latest} installed"));
        } else {
            println!("{toolchain} {latest} is up to date");
        }

        if toolchain != Toolchain::Tool {
            continue;
        }
        match config.default_for(Toolchain::Tool).map(str::to_string) {
            Some(current) if current == latest => {}
            Some(current) if !ctx.layout.is_installed(Toolchain::Tool, &current) => {
                hint(format!("default sop {current} is not installed; keeping it, run `sopmod default {latest}` to switch"));
            }
            _ => default::apply(ctx, &mut config, &latest)?,
        }
    }
    Ok(())
}
