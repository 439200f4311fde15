use anyhow::Result;
use console::style;
use sopmod_core::Toolchain;
use sopmod_core::ui::table::{Formatter, VersionRow};

use crate::cli::ListArgs;
use crate::context::Context;

pub fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let installer = ctx.installer();
    let toolchains = match args.toolchain {
        Some(toolchain) => vec![toolchain],
        None => Toolchain::ALL.to_vec(),
    };

    for (i, toolchain) in toolchains.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", style(toolchain).bold());

        let versions = installer.installed(toolchain)?;
        if versions.is_empty() {
            println!("  {}", style("none installed").dim());
            println!("  {}", style(format!("run `sopmod install {toolchain} latest`")).dim());
            continue;
        }

        let default = config.default_for(toolchain);
        let rows = versions.iter().map(|v| VersionRow::new(v, Some(v.as_str()) == default));
        println!("{}", Formatter::plain(rows));
    }
    Ok(())
}
