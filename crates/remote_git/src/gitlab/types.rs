//! GitLab API data types.

use serde::Deserialize;

use crate::platform::RecordId;

/// GitLab project - fields we need from the API response.
///
/// API docs: https://docs.gitlab.com/ee/api/projects.html#list-all-projects
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    pub id: RecordId,
    /// Full path including groups (e.g. "group/subgroup/project").
    pub path_with_namespace: String,
    pub description: Option<String>,
    /// Absent for empty repositories.
    #[serde(default)]
    pub default_branch: Option<String>,
    pub http_url_to_repo: String,
    /// "public", "internal" or "private".
    pub visibility: Option<String>,
    #[serde(default)]
    pub archived: bool,
}
