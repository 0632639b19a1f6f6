//! Model conversion for GitHub repositories.

use serde::Deserialize;

use super::types::GitHubRepo;
use crate::platform::{Project, ProjectVisibility, Result};

fn github_visibility(repo: &GitHubRepo) -> ProjectVisibility {
    repo.visibility
        .as_deref()
        .and_then(ProjectVisibility::parse)
        .unwrap_or_else(|| ProjectVisibility::from_private_flag(repo.private))
}

/// Convert one element of a GitHub repository listing.
pub fn to_project(raw: serde_json::Value) -> Result<Project> {
    let repo = GitHubRepo::deserialize(&raw)?;
    Ok(Project {
        id: repo.id.to_string(),
        name: repo.full_name.clone(),
        description: repo.description.clone().unwrap_or_default(),
        default_branch: repo.default_branch.clone(),
        http_url: repo.clone_url.clone(),
        is_archived: repo.archived,
        visibility: Some(github_visibility(&repo)),
        raw_metadata: raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": 45678,
            "name": "satis-gitlab",
            "full_name": "mborne/satis-gitlab",
            "description": "Generate SATIS configuration",
            "default_branch": "master",
            "clone_url": "https://github.com/mborne/satis-gitlab.git",
            "contents_url": "https://api.github.com/repos/mborne/satis-gitlab/contents/{+path}",
            "private": false,
            "archived": true,
            "stargazers_count": 12
        })
    }

    #[test]
    fn maps_listing_fields() {
        let project = to_project(sample()).expect("valid record");
        assert_eq!(project.id, "45678");
        assert_eq!(project.name, "mborne/satis-gitlab");
        assert_eq!(project.description, "Generate SATIS configuration");
        assert_eq!(project.default_branch.as_deref(), Some("master"));
        assert_eq!(project.http_url, "https://github.com/mborne/satis-gitlab.git");
        assert!(project.is_archived);
        assert_eq!(project.visibility, Some(ProjectVisibility::Public));
        assert_eq!(project.raw_metadata["stargazers_count"], 12);
    }

    #[test]
    fn visibility_field_wins_over_private_flag() {
        let mut raw = sample();
        raw["visibility"] = json!("internal");
        raw["private"] = json!(true);
        let project = to_project(raw).expect("valid record");
        assert_eq!(project.visibility, Some(ProjectVisibility::Internal));

        let mut raw = sample();
        raw["private"] = json!(true);
        let project = to_project(raw).expect("valid record");
        assert_eq!(project.visibility, Some(ProjectVisibility::Private));
    }

    #[test]
    fn empty_repository_has_no_default_branch() {
        let mut raw = sample();
        raw["default_branch"] = serde_json::Value::Null;
        raw["description"] = serde_json::Value::Null;
        let project = to_project(raw).expect("valid record");
        assert_eq!(project.default_branch, None);
        assert_eq!(project.description, "");
    }

    #[test]
    fn missing_clone_url_is_an_error() {
        let mut raw = sample();
        if let Some(fields) = raw.as_object_mut() {
            fields.remove("clone_url");
        }
        assert!(to_project(raw).is_err());
    }
}
