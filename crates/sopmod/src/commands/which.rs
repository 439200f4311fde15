use std::path::PathBuf;

use anyhow::{Result, anyhow};
use sopmod_core::Toolchain;
use sopmod_shim::{GlobalResolver, ManifestResolver, PairResolver, VersionResolver};
use sopmod_version::resolve_installed;

use crate::cli::WhichArgs;
use crate::context::Context;

pub fn run(ctx: &Context, args: WhichArgs) -> Result<()> {
    println!("{}", resolve(ctx, args.toolchain)?.display());
    Ok(())
}

/// Binary the current directory resolves to for `toolchain`.
pub fn resolve(ctx: &Context, toolchain: Toolchain) -> Result<PathBuf> {
    let config = ctx.load_config()?;
    let resolver = PairResolver::new(ManifestResolver::new(&ctx.cwd), GlobalResolver::new(&config));

    let Some(requested) = resolver.resolve(toolchain)? else {
        return Err(match toolchain {
            Toolchain::Tool => sopmod_shim::Error::NoVersionConfigured.into(),
            Toolchain::Runtime => anyhow!("no go version configured; run `sopmod default <version>` or pin one in sop.mod"),
        });
    };
    tracing::debug!(%toolchain, specifier = %requested.specifier, origin = %requested.origin, "requested");

    let installed = ctx.layout.list_installed(toolchain)?;
    let version = resolve_installed(&requested.specifier, &installed).ok_or_else(|| sopmod_shim::Error::NotInstalled {
        toolchain,
        specifier: requested.specifier.clone(),
    })?;
    Ok(ctx.layout.binary(toolchain, &version))
}
