//! Model conversion for Gogs repositories.

use serde::Deserialize;

use super::types::GogsRepo;
use crate::platform::{Project, ProjectVisibility, Result};

/// Convert one element of a Gogs repository listing.
///
/// Gogs only knows public and private repositories.
pub fn to_project(raw: serde_json::Value) -> Result<Project> {
    let repo = GogsRepo::deserialize(&raw)?;
    Ok(Project {
        id: repo.id.to_string(),
        name: repo.full_name,
        description: repo.description.unwrap_or_default(),
        default_branch: repo.default_branch.filter(|b| !b.is_empty()),
        http_url: repo.clone_url,
        is_archived: repo.archived,
        visibility: Some(ProjectVisibility::from_private_flag(repo.private)),
        raw_metadata: raw,
    })
}
