use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{ProbeError, ProjectFilter};
use crate::platform::{GitClient, Project};

const MANIFEST: &str = "composer.json";

/// Keeps PHP projects: `composer.json` must exist on the default branch and,
/// when types are configured, declare one of them.
#[derive(Clone)]
pub struct ComposerProjectFilter {
    client: Arc<dyn GitClient>,
    project_types: Option<Vec<String>>,
}

impl ComposerProjectFilter {
    pub fn new(client: Arc<dyn GitClient>) -> Self {
        Self {
            client,
            project_types: None,
        }
    }

    /// Accept only the given comma-separated package types (case-insensitive).
    pub fn with_project_type(mut self, project_type: &str) -> Self {
        let types: Vec<String> = project_type
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self.project_types = (!types.is_empty()).then_some(types);
        self
    }

    async fn probe(&self, project: &Project) -> Result<bool, ProbeError> {
        let branch = project
            .default_branch
            .as_deref()
            .ok_or(ProbeError::NoDefaultBranch)?;
        let content = self.client.get_raw_file(project, MANIFEST, branch).await?;

        let Some(types) = &self.project_types else {
            return Ok(true);
        };

        // Only a string `type` on a JSON object counts.
        let manifest: Value = serde_json::from_str(&content)?;
        let declared = manifest
            .as_object()
            .and_then(|m| m.get("type"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();
        Ok(types.contains(&declared))
    }
}

#[async_trait]
impl ProjectFilter for ComposerProjectFilter {
    fn name(&self) -> &'static str {
        "ComposerProjectFilter"
    }

    fn description(&self) -> String {
        match &self.project_types {
            Some(types) => format!(
                "composer.json should exists and type should be '{}'",
                types.join(",")
            ),
            None => "composer.json should exists".to_string(),
        }
    }

    async fn is_accepted(&self, project: &Project) -> bool {
        match self.probe(project).await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::debug!(
                    "{} (branch {}) : file {} not found ({})",
                    project.name,
                    project.default_branch.as_deref().unwrap_or("none"),
                    MANIFEST,
                    e
                );
                false
            }
        }
    }
}
