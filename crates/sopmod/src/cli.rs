use clap::{Args, Parser, Subcommand};
use sopmod_core::Toolchain;

#[derive(Clone, Debug, Parser)]
#[command(name = "sopmod", version, about, long_about = None, propagate_version = true)]
pub struct App {
    /// Show debug logs (overridden by SOPMOD_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Answer yes to every prompt
    #[arg(long, short, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "i", about = "Install a version of sop or go")]
    Install(InstallArgs),
    #[command(alias = "ls", about = "List installed versions")]
    List(ListArgs),
    #[command(about = "Set the default sop version and pick a compatible go")]
    Default(DefaultArgs),
    #[command(alias = "rm", about = "Remove an installed version")]
    Remove(RemoveArgs),
    #[command(alias = "up", about = "Install the newest releases and move the default forward")]
    Update(UpdateArgs),
    #[command(about = "Print the binary the current directory resolves to")]
    Which(WhichArgs),
    #[command(about = "Print PATH setup instructions and shell completions")]
    Setup(SetupArgs),
    #[command(about = "Print the sopmod version")]
    Version,
}

#[derive(Clone, Debug, Args)]
pub struct InstallArgs {
    /// `sop` (or `tool`) / `go` (or `runtime`)
    pub toolchain: Toolchain,
    /// Exact version, `major.minor`, or `latest`
    #[arg(id = "specifier", value_name = "VERSION", default_value = "latest")]
    pub version:   String,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Only list this toolchain
    pub toolchain: Option<Toolchain>,
}

#[derive(Clone, Debug, Args)]
pub struct DefaultArgs {
    /// sop version to use outside projects with a sop.mod
    #[arg(id = "specifier", value_name = "VERSION")]
    pub version: String,
}

#[derive(Clone, Debug, Args)]
pub struct RemoveArgs {
    pub toolchain: Toolchain,
    /// Installed version, `major.minor`, or `latest`
    #[arg(id = "specifier", value_name = "VERSION")]
    pub version:   String,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    /// Only update this toolchain
    pub toolchain: Option<Toolchain>,
}

#[derive(Clone, Debug, Args)]
pub struct WhichArgs {
    #[arg(default_value = "sop")]
    pub toolchain: Toolchain,
}

#[derive(Clone, Debug, Args)]
pub struct SetupArgs {
    /// Print a completion script for this shell instead of PATH instructions
    #[arg(long, value_enum)]
    pub completions: Option<clap_complete::Shell>,
}
