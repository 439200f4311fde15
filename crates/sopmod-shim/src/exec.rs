use std::convert::Infallible;
use std::process::Command;

use crate::dispatch::DispatchPlan;
use crate::error::{Error, Result};

pub(crate) fn command(plan: &DispatchPlan) -> Command {
    let mut command = Command::new(&plan.program);
    command.args(&plan.args);
    if let Some(path) = &plan.path {
        command.env("PATH", path);
    }
    command
}

/// Replace the current process with the planned one.
///
/// Only returns if the program could not be started.
#[cfg(unix)]
pub fn exec(plan: DispatchPlan) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    tracing::debug!(program = %plan.program.display(), "exec");
    let source = command(&plan).exec();
    Err(Error::Exec {
        program: plan.program,
        source,
    })
}

/// Run the planned process to completion and exit with its status code.
#[cfg(not(unix))]
pub fn exec(plan: DispatchPlan) -> Result<Infallible> {
    tracing::debug!(program = %plan.program.display(), "spawn");
    let status = command(&plan).status().map_err(|source| Error::Exec {
        program: plan.program.clone(),
        source,
    })?;
    std::process::exit(status.code().unwrap_or(1))
}
