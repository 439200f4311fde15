use anyhow::Result;
use sopmod_core::Toolchain;

use super::{default, success};
use crate::cli::InstallArgs;
use crate::context::Context;

pub fn run(ctx: &Context, args: InstallArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    ctx.layout.ensure_dirs()?;

    let installed = ctx.installer().install(args.toolchain, &args.version)?;
    if installed.fresh {
        success(format!("{} {} installed", installed.toolchain, installed.version));
    } else {
        println!("{} {} is already installed", installed.toolchain, installed.version);
    }

    // The first tool install becomes the default.
    if args.toolchain == Toolchain::Tool && config.default_for(Toolchain::Tool).is_none() {
        default::apply(ctx, &mut config, &installed.version)?;
    }
    Ok(())
}
