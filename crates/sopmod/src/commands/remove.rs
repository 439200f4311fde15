use anyhow::Result;

use super::success;
use crate::cli::RemoveArgs;
use crate::context::Context;

pub fn run(ctx: &Context, args: RemoveArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    let version = ctx.installer().remove(args.toolchain, &args.version)?;
    success(format!("{} {version} removed", args.toolchain));

    if config.default_for(args.toolchain) == Some(version.as_str()) {
        config.set_default(args.toolchain, None);
        ctx.save_config(&config)?;
        eprintln!("{} {version} was the default; no default is set now", args.toolchain);
    }
    Ok(())
}
