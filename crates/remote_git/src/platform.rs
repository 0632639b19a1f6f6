//! Backend-agnostic client interface.
//!
//! Every backend implements [`GitClient`]: a lazy project enumeration and a
//! raw-file read. Remote backends additionally implement [`RemoteBackend`] so
//! the [`crate::ClientRegistry`] can build them from a configured
//! [`crate::http::ApiClient`].
//!
//! # Example
//!
//! ```ignore
//! use remote_git::{FindOptions, GitClient};
//!
//! async fn names(client: &dyn GitClient) -> remote_git::Result<Vec<String>> {
//!     let mut stream = client.get_projects(&FindOptions::new().with_organizations(["acme"]))?;
//!     let mut names = Vec::new();
//!     while let Some(project) = stream.next().await {
//!         names.push(project?.name);
//!     }
//!     Ok(names)
//! }
//! ```

mod errors;
mod pagination;
mod raw;
mod types;

pub use errors::{ClientError, RawFileNotFoundError, Result};
pub use pagination::{Listing, PageConfig, PageSource, Pager, ProjectConverter, ProjectStream};
pub(crate) use raw::fetch_raw_file;
pub use types::{
    CURRENT_USER, ClientOptions, FindOptions, GitClient, Project, ProjectVisibility, RecordId,
    RemoteBackend,
};
