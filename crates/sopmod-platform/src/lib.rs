//! Platform detection and environment helpers.
//!
//! - `os` / `arch` - the recognised operating systems and CPU architectures
//! - `target` - the combined [`Platform`], detected once per process
//! - `env` - `PATH` inspection and modification
//! - `dir` - user directories
//! - `shell` - shell detection for setup hints

pub use error::{Error, Result};
pub use target::Platform;

pub mod arch;
pub mod dir;
pub mod env;
mod error;
pub mod os;
pub mod shell;
pub mod target;
