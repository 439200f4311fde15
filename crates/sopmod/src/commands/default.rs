use anyhow::Result;
use sopmod_core::Toolchain;
use sopmod_core::config::GlobalConfig;

use super::{install_shims, path_hint, success};
use crate::cli::DefaultArgs;
use crate::context::Context;

pub fn run(ctx: &Context, args: DefaultArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    let installer = ctx.installer();
    let version = installer.resolve(Toolchain::Tool, &args.version)?;

    if !ctx.layout.is_installed(Toolchain::Tool, &version) {
        if !ctx.confirm(&format!("sop {version} is not installed. Install it?"))? {
            eprintln!("cancelled");
            return Ok(());
        }
        ctx.layout.ensure_dirs()?;
        installer.install(Toolchain::Tool, &version)?;
        success(format!("sop {version} installed"));
    }

    apply(ctx, &mut config, &version)
}

/// Make the installed tool `version` the default, refresh the shims and pair
/// it with a compatible runtime. The config is saved only once every step
/// has succeeded.
pub(crate) fn apply(ctx: &Context, config: &mut GlobalConfig, version: &str) -> Result<()> {
    install_shims(ctx)?;

    let runtime = ctx.installer().find_or_install_compatible_runtime(version)?;
    if runtime.fresh {
        success(format!("go {} installed", runtime.version));
    }

    config.set_default(Toolchain::Tool, Some(version.to_string()));
    config.set_default(Toolchain::Runtime, Some(runtime.version.clone()));
    ctx.save_config(config)?;

    success(format!("default sop is now {version} (go {})", runtime.version));
    path_hint(ctx);
    Ok(())
}
