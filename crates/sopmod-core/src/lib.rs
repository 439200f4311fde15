//! Shared model of a sopmod installation.
//!
//! - [`layout`] derives every path below the installation root.
//! - [`config`] loads and saves the global config and discovers project manifests.
//! - [`compat`] holds the tool/runtime compatibility matrix.
//! - [`toolchain`] names the two managed toolchains and their shims.
//! - [`ui`] progress bars and tables for the command line.

pub use error::{Error, Result};
pub use layout::Layout;
pub use toolchain::{Shim, Toolchain};

pub mod compat;
pub mod config;
mod error;
pub mod layout;
pub mod toolchain;
pub mod ui;
