//! Shim dispatch.
//!
//! # Architecture
//!
//! The shim is a mechanism, not policy. A [`VersionResolver`] decides which
//! version is requested; the [`Dispatcher`] maps that request onto the
//! installed set and produces a [`DispatchPlan`]; [`exec`] runs the plan
//! and never returns on success.
//!
//! ```
//! use sopmod_core::config::GlobalConfig;
//! use sopmod_core::Toolchain;
//! use sopmod_shim::{GlobalResolver, ManifestResolver, PairResolver, VersionResolver};
//!
//! let config = GlobalConfig::default();
//! let resolver = PairResolver::new(ManifestResolver::new("/"), GlobalResolver::new(&config));
//! assert!(resolver.resolve(Toolchain::Runtime).unwrap().is_none());
//! ```

pub use dispatch::{DispatchPlan, Dispatcher, Invocation};
pub use error::{Error, Result};
pub use exec::exec;
pub use install::{install_shims, install_shims_from};
pub use resolver::{GlobalResolver, ManifestResolver, Origin, PairResolver, Requested, VersionResolver};

mod dispatch;
mod error;
mod exec;
mod install;
mod resolver;
