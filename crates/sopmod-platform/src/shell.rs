//! Shell detection and helpers.

use std::path::Path;

/// Shell types we know how to print setup instructions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Nushell,
    Elvish,
    Unknown,
}

fn from_query_shell(qs: query_shell::Shell) -> Shell {
    match qs {
        query_shell::Shell::Bash => Shell::Bash,
        query_shell::Shell::Zsh => Shell::Zsh,
        query_shell::Shell::Fish => Shell::Fish,
        query_shell::Shell::Powershell => Shell::Powershell,
        query_shell::Shell::Nushell => Shell::Nushell,
        query_shell::Shell::Elvish => Shell::Elvish,
        _ => Shell::Unknown,
    }
}

/// Detect the current shell.
///
/// Returns `None` if detection fails.
pub fn detect() -> Option<Shell> { query_shell::get_shell().ok().map(from_query_shell) }

/// Startup file a PATH export should be added to.
pub fn rc_file(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("~/.bashrc"),
        Shell::Zsh => Some("~/.zshrc"),
        Shell::Fish => Some("~/.config/fish/config.fish"),
        Shell::Powershell => Some("$PROFILE"),
        Shell::Nushell => Some("~/.config/nushell/env.nu"),
        Shell::Elvish => Some("~/.config/elvish/rc.elv"),
        Shell::Unknown => None,
    }
}

/// The line that puts `dir` on PATH for `shell`.
pub fn path_export(shell: Shell, dir: &Path) -> String {
    let dir = dir.display();
    match shell {
        Shell::Fish => format!("fish_add_path {dir}"),
        Shell::Powershell => format!("$env:Path = \"{dir};$env:Path\""),
        Shell::Nushell => format!("$env.PATH = ($env.PATH | prepend '{dir}')"),
        Shell::Elvish => format!("set paths = [{dir} $@paths]"),
        Shell::Bash | Shell::Zsh | Shell::Unknown => format!("export PATH=\"{dir}:$PATH\""),
    }
}
