//! GitHub REST v3 backend.
//!
//! # Module Structure
//!
//! - [`types`] - Repository records as returned by the listing endpoints
//! - [`convert`] - Mapping to [`crate::Project`]
//! - [`client`] - [`GitHubClient`], the [`crate::GitClient`] implementation
//!
//! GitHub has no global listing: at least one user or organization must be
//! given. Searching is not supported and the search string is ignored.

mod client;
mod convert;
mod types;

pub use client::{GITHUB_API_URL, GitHubClient};
pub use convert::to_project;
pub use types::GitHubRepo;
