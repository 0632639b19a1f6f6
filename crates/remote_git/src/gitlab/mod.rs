//! GitLab API v4 backend.
//!
//! # Module Structure
//!
//! - [`types`] - Project records as returned by the listing endpoints
//! - [`convert`] - Mapping to [`crate::Project`]
//! - [`client`] - [`GitLabClient`], the [`crate::GitClient`] implementation
//!
//! Without users or groups, the client lists every project visible to the
//! token through `/api/v4/projects`, optionally narrowed by the search term.

mod client;
mod convert;
mod types;

pub use client::GitLabClient;
pub use convert::to_project;
pub use types::GitLabProject;
