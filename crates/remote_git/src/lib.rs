//! remote-git - one client interface over git hosting services.
//!
//! This library lists repositories ("projects") and reads raw files on
//! GitLab, GitHub, Gogs/Gitea and local folders through the same
//! [`GitClient`] trait. Listings are lazy: pages are fetched only while the
//! caller keeps pulling, and every project passes the caller's
//! [`ProjectFilter`] first.
//!
//! # Features
//!
//! - `local` (default) - Enables the local filesystem backend. Without it,
//!   non-HTTP URLs are rejected with [`ClientError::ProtocolNotSupported`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use remote_git::{ClientFactory, ClientOptions, FindOptions, FilterCollection};
//! use remote_git::filter::{IgnoreRegexpFilter, RequiredFileFilter};
//!
//! let factory = ClientFactory::new()?;
//! let client = factory.create_client(&ClientOptions::new("https://gitlab.com").with_token(token))?;
//!
//! let mut filters = FilterCollection::new();
//! filters.add_filter(IgnoreRegexpFilter::new("^archive/")?);
//! filters.add_filter(RequiredFileFilter::new(Arc::clone(&client), "composer.json"));
//!
//! let options = FindOptions::new().with_organizations(["acme"]).with_filter(filters);
//! for project in client.find(&options).await? {
//!     println!("{} {}", project.name, project.http_url);
//! }
//! ```

pub mod factory;
pub mod filter;
pub mod github;
pub mod gitlab;
pub mod gogs;
pub mod http;
pub mod platform;

#[cfg(feature = "local")]
pub mod local;

#[cfg(test)]
mod test_support;

pub use factory::{ClientFactory, ClientRegistry, detect_client_type};
pub use filter::{FilterCollection, ProjectFilter};
pub use platform::{
    CURRENT_USER, ClientError, ClientOptions, FindOptions, GitClient, Project, ProjectStream,
    ProjectVisibility, RawFileNotFoundError, RemoteBackend, Result,
};
