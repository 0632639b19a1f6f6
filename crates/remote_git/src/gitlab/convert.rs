//! Model conversion for GitLab projects.

use serde::Deserialize;

use super::types::GitLabProject;
use crate::platform::{Project, ProjectVisibility, Result};

/// Convert one element of a GitLab project listing.
pub fn to_project(raw: serde_json::Value) -> Result<Project> {
    let project = GitLabProject::deserialize(&raw)?;
    Ok(Project {
        id: project.id.to_string(),
        name: project.path_with_namespace,
        description: project.description.unwrap_or_default(),
        default_branch: project.default_branch,
        http_url: project.http_url_to_repo,
        is_archived: project.archived,
        visibility: project.visibility.as_deref().and_then(ProjectVisibility::parse),
        raw_metadata: raw,
    })
}
