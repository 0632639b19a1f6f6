//! Gogs / Gitea API v1 backend.
//!
//! # Module Structure
//!
//! - [`types`] - Repository records as returned by the listing endpoints
//! - [`convert`] - Mapping to [`crate::Project`]
//! - [`client`] - [`GogsClient`], the [`crate::GitClient`] implementation
//!
//! Gitea and Forgejo expose the same v1 endpoints and are served by this
//! backend too.

mod client;
mod convert;
mod types;

pub use client::GogsClient;
pub use convert::to_project;
pub use types::GogsRepo;
