use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterCollection, ProjectFilter};
use crate::http::ApiClient;

use super::errors::{RawFileNotFoundError, Result};
use super::pagination::ProjectStream;

/// User name standing for "the authenticated identity" in [`FindOptions::users`].
pub const CURRENT_USER: &str = "_me_";

/// Repository visibility as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectVisibility {
    Public,
    Private,
    /// GitLab only.
    Internal,
}

impl ProjectVisibility {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }

    /// Parse a provider visibility string (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }

    /// Map a `private` flag to a visibility.
    #[must_use]
    pub fn from_private_flag(private: bool) -> Self {
        if private { Self::Private } else { Self::Public }
    }
}

impl fmt::Display for ProjectVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider identifier, numeric on most forges.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A repository from any backend (backend-agnostic representation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    /// Provider-native identifier, stringified.
    pub id: String,
    /// Fully-qualified path (e.g. `group/subgroup/name`).
    pub name: String,
    /// Repository description (empty when the provider has none).
    pub description: String,
    /// Default branch; `None` for empty repositories.
    pub default_branch: Option<String>,
    /// Clone URL, or absolute folder path for local repositories.
    pub http_url: String,
    /// Whether the repository is archived.
    pub is_archived: bool,
    /// Repository visibility, when the backend reports it.
    pub visibility: Option<ProjectVisibility>,
    /// Full provider payload.
    #[serde(skip)]
    pub raw_metadata: serde_json::Value,
}

impl Project {
    /// Look up a string field in the raw provider payload.
    #[must_use]
    pub fn raw_str(&self, key: &str) -> Option<&str> {
        self.raw_metadata.get(key).and_then(|v| v.as_str())
    }
}

/// Query descriptor for [`crate::GitClient::get_projects`].
#[derive(Clone)]
pub struct FindOptions {
    /// Organizations / groups, listed after the users.
    pub organizations: Vec<String>,
    /// User names; [`CURRENT_USER`] selects the authenticated identity.
    pub users: Vec<String>,
    /// Free-text search (GitLab only).
    pub search: Option<String>,
    /// Client-side filter applied to every listed project.
    pub filter: Arc<dyn ProjectFilter>,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            organizations: Vec::new(),
            users: Vec::new(),
            search: None,
            filter: Arc::new(FilterCollection::new()),
        }
    }
}

impl fmt::Debug for FindOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindOptions")
            .field("organizations", &self.organizations)
            .field("users", &self.users)
            .field("search", &self.search)
            .field("filter", &self.filter.description())
            .finish()
    }
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users = users.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_organizations<I, S>(mut self, organizations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organizations = organizations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, filter: impl ProjectFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_shared_filter(mut self, filter: Arc<dyn ProjectFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Search string, when set and non-empty.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// True when neither users nor organizations are given.
    #[must_use]
    pub fn has_no_selection(&self) -> bool {
        self.users.is_empty() && self.organizations.is_empty()
    }
}

/// Connection descriptor for [`crate::ClientFactory::create_client`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Explicit backend type (e.g. `gitlab-v4`); detected from `url` when unset.
    pub client_type: Option<String>,
    /// Base URL, or a folder for the local backend.
    pub url: String,
    /// Access token.
    pub token: Option<String>,
    /// Skip TLS certificate verification.
    pub unsafe_ssl: bool,
}

impl ClientOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, client_type: impl Into<String>) -> Self {
        self.client_type = Some(client_type.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_unsafe_ssl(mut self, unsafe_ssl: bool) -> Self {
        self.unsafe_ssl = unsafe_ssl;
        self
    }

    /// Explicit type, when set and non-empty.
    #[must_use]
    pub fn client_type(&self) -> Option<&str> {
        self.client_type.as_deref().filter(|t| !t.is_empty())
    }

    /// Token, when set and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Uniform interface over every hosting backend.
///
/// Implementations must not require `&mut self`; a single client is shared
/// between the enumeration and the filters probing files through it.
#[async_trait]
pub trait GitClient: Send + Sync {
    /// Registered type identifier (`gitlab-v4`, `github`, ...).
    fn client_type(&self) -> &'static str;

    /// Lazily enumerate the projects selected by `options`.
    ///
    /// Parameter errors are raised here, before any request is sent. Every
    /// yielded project has passed `options.filter`.
    fn get_projects<'a>(&'a self, options: &FindOptions) -> Result<ProjectStream<'a>>;

    /// Read `file_path` at `git_ref` in `project`.
    async fn get_raw_file(
        &self,
        project: &Project,
        file_path: &str,
        git_ref: &str,
    ) -> std::result::Result<String, RawFileNotFoundError>;

    /// Eagerly collect [`GitClient::get_projects`].
    async fn find(&self, options: &FindOptions) -> Result<Vec<Project>> {
        self.get_projects(options)?.try_collect().await
    }
}

/// A [`GitClient`] reached over HTTP, with the static metadata the registry needs.
pub trait RemoteBackend: GitClient + Sized + 'static {
    /// Type identifier; must be non-empty.
    const TYPE: &'static str;
    /// Template for the credential header, or [`crate::http::token::NONE`].
    const TOKEN_TYPE: &'static str;

    /// Build the client on top of a configured API client.
    fn from_api(api: ApiClient) -> Self;
}
