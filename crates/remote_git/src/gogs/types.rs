//! Gogs API data types.

use serde::Deserialize;

use crate::platform::RecordId;

/// Gogs repository - fields we need from the API response.
///
/// API docs: https://github.com/gogs/docs-api/tree/master/Repositories
#[derive(Debug, Clone, Deserialize)]
pub struct GogsRepo {
    pub id: RecordId,
    /// Owner and name (e.g. "owner/repo").
    pub full_name: String,
    pub description: Option<String>,
    pub default_branch: Option<String>,
    pub clone_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
}
