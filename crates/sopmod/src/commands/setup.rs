use anyhow::Result;
use clap::CommandFactory;
use sopmod_platform::shell::{self, Shell};

use super::success;
use crate::cli::{App, SetupArgs};
use crate::context::Context;

pub fn run(ctx: &Context, args: SetupArgs) -> Result<()> {
    if let Some(target) = args.completions {
        let mut command = App::command();
        clap_complete::generate(target, &mut command, "sopmod", &mut std::io::stdout());
        return Ok(());
    }

    ctx.layout.ensure_dirs()?;
    let bin = ctx.layout.bin_dir();
    println!("sopmod installs its `sop` and `sopls` shims into {}", bin.display());

    if sopmod_platform::env::is_in_path(&bin) {
        success("that directory is already on PATH");
    } else {
        let detected = shell::detect().unwrap_or(Shell::Unknown);
        let profile = shell::rc_file(detected).unwrap_or("your shell profile");
        println!("add this line to {profile}:");
        println!();
        println!("    {}", shell::path_export(detected, &bin));
        println!();
    }
    println!("shell completions: sopmod setup --completions <bash|zsh|fish|powershell|elvish>");
    Ok(())
}
