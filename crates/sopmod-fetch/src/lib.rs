//! Remote collaborators: release indexes and artifact downloads.
//!
//! All network access goes through the blocking [`HttpClient`] trait so the
//! install pipeline can be driven by an in-memory client in tests.

pub use client::{HttpClient, ReqwestClient, Response, USER_AGENT};
pub use download::{download_to_temp, sha256_file, verify_sha256};
pub use error::{Error, Result};
pub use runtime::{RUNTIME_DOWNLOAD_BASE, archive_name, RUNTIME_INDEX_URL, RuntimeFile, RuntimeIndex, RuntimeRelease};
pub use tool::{Release, ReleaseAsset, TOOL_RELEASES_URL, ToolReleases};

mod client;
mod download;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod runtime;
mod tool;
