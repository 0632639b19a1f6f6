use std::sync::Arc;

use async_trait::async_trait;

use super::{ProbeError, ProjectFilter};
use crate::platform::{GitClient, Project};

/// Keeps projects whose default branch contains a given file.
#[derive(Clone)]
pub struct RequiredFileFilter {
    client: Arc<dyn GitClient>,
    file_path: String,
}

impl RequiredFileFilter {
    pub fn new(client: Arc<dyn GitClient>, file_path: impl Into<String>) -> Self {
        Self {
            client,
            file_path: file_path.into(),
        }
    }

    async fn probe(&self, project: &Project) -> Result<bool, ProbeError> {
        let branch = project
            .default_branch
            .as_deref()
            .ok_or(ProbeError::NoDefaultBranch)?;
        self.client
            .get_raw_file(project, &self.file_path, branch)
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl ProjectFilter for RequiredFileFilter {
    fn name(&self) -> &'static str {
        "RequiredFileFilter"
    }

    fn description(&self) -> String {
        format!("File '{}' should exist in default branch", self.file_path)
    }

    async fn is_accepted(&self, project: &Project) -> bool {
        match self.probe(project).await {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(
                    "{} (branch {}) : file {} not found ({})",
                    project.name,
                    project.default_branch.as_deref().unwrap_or("none"),
                    self.file_path,
                    e
                );
                false
            }
        }
    }
}
