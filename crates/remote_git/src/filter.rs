//! Client-side project filters.
//!
//! A filter is an async predicate over [`Project`] with a static description.
//! File-backed filters probe the hosting backend through a shared
//! [`crate::GitClient`]; a failed probe always means "reject", never an error.

mod collection;
mod composer;
mod regexp;
mod required_file;

use async_trait::async_trait;
use thiserror::Error;

use crate::platform::{Project, RawFileNotFoundError};

pub use collection::FilterCollection;
pub use composer::ComposerProjectFilter;
pub use regexp::{IgnoreRegexpFilter, IncludeRegexpFilter};
pub use required_file::RequiredFileFilter;

/// Accept/reject decision over a project.
#[async_trait]
pub trait ProjectFilter: Send + Sync {
    /// Short filter name used as a log prefix.
    fn name(&self) -> &'static str;

    /// Human-readable description; never performs I/O.
    fn description(&self) -> String;

    /// Whether `project` should be kept.
    async fn is_accepted(&self, project: &Project) -> bool;
}

/// Invalid filter construction parameters.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{filter} requires a non-empty pattern")]
    EmptyPattern { filter: &'static str },

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Why a file probe could not confirm a project.
#[derive(Debug, Error)]
pub(crate) enum ProbeError {
    #[error("project has no default branch")]
    NoDefaultBranch,

    #[error(transparent)]
    Missing(#[from] RawFileNotFoundError),

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
