use std::process::ExitCode;

use clap::Parser;
use console::style;
use sopmod::cli::App;
use sopmod_shim::Invocation;

fn main() -> ExitCode {
    let invocation = Invocation::from_env();
    let result = match invocation.shim {
        Some(shim) => sopmod::run_shim(shim, invocation.args).map(|never| match never {}),
        None => sopmod::run(App::parse()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
