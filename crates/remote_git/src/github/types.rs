//! GitHub API data types.

use serde::Deserialize;

use crate::platform::RecordId;

/// GitHub repository - fields we need from the API response.
///
/// API docs: https://docs.github.com/en/rest/repos/repos#list-repositories-for-a-user
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub id: RecordId,
    /// Owner and name (e.g. "owner/repo").
    pub full_name: String,
    pub description: Option<String>,
    /// `null` for empty repositories.
    pub default_branch: Option<String>,
    pub clone_url: String,
    /// URL template with a `{+path}` placeholder.
    pub contents_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
    /// Present on recent API versions; `private` is the fallback.
    pub visibility: Option<String>,
}
