//! Local repository scanner.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::process::Command;
use walkdir::WalkDir;

use crate::http::token::NONE;
use crate::platform::{
    FindOptions, GitClient, PageSource, Project, ProjectStream, RawFileNotFoundError, Result,
};

const GIT_DIR: &str = ".git";
const BARE_SUFFIX: &str = ".git";
const HEAD_BRANCH: &str = "master";

/// Client over git repositories found below a root folder.
#[derive(Debug, Clone)]
pub struct LocalClient {
    root_path: PathBuf,
}

impl LocalClient {
    pub const TYPE: &'static str = "local";
    pub const TOKEN_TYPE: &'static str = NONE;

    /// Relative roots are resolved against the current directory.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        let root_path = std::path::absolute(&root_path).unwrap_or(root_path);
        Self { root_path }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Repository folders below the root, in file name order.
    pub fn find_project_folders(&self) -> Result<Vec<PathBuf>> {
        tracing::debug!("Checking {} for git repositories ...", self.root_path.display());

        let mut folders = Vec::new();
        let mut entries = WalkDir::new(&self.root_path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if name == GIT_DIR {
                if let Some(parent) = entry.path().parent() {
                    tracing::info!("Git repository found : {}", parent.display());
                    folders.push(parent.to_path_buf());
                }
                entries.skip_current_dir();
            } else if name.ends_with(BARE_SUFFIX) {
                tracing::info!("Git bare repository found : {}", entry.path().display());
                folders.push(entry.path().to_path_buf());
                entries.skip_current_dir();
            }
        }
        Ok(folders)
    }

    /// Build the project for a repository folder below the root.
    pub fn create_project(&self, folder: &Path) -> Project {
        let full_path = folder.to_string_lossy().into_owned();
        let is_bare = full_path.ends_with(BARE_SUFFIX);

        let relative = folder
            .strip_prefix(&self.root_path)
            .unwrap_or(folder)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let mut full_name = relative
            .strip_suffix(BARE_SUFFIX)
            .unwrap_or(&relative)
            .to_string();
        if full_name.is_empty() {
            full_name = folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| full_path.clone());
        }

        let id = format!("{:x}", Sha256::digest(full_path.as_bytes()));
        let raw_metadata = serde_json::json!({
            "id": id,
            "is_bare": is_bare,
            "full_path": full_path,
            "full_name": full_name,
            "head_branch": HEAD_BRANCH,
        });

        Project {
            id,
            name: full_name,
            description: String::new(),
            default_branch: Some(HEAD_BRANCH.to_string()),
            http_url: full_path,
            is_archived: false,
            visibility: None,
            raw_metadata,
        }
    }
}

/// Scans on the first pull and hands every repository out as one page.
struct LocalSource<'a> {
    client: &'a LocalClient,
    scanned: bool,
}

#[async_trait]
impl PageSource for LocalSource<'_> {
    async fn next_page(&mut self) -> Result<Option<Vec<Project>>> {
        if self.scanned {
            return Ok(None);
        }
        self.scanned = true;

        let projects: Vec<Project> = self
            .client
            .find_project_folders()?
            .iter()
            .map(|folder| self.client.create_project(folder))
            .collect();
        Ok((!projects.is_empty()).then_some(projects))
    }
}

#[async_trait]
impl GitClient for LocalClient {
    fn client_type(&self) -> &'static str {
        Self::TYPE
    }

    fn get_projects<'a>(&'a self, options: &FindOptions) -> Result<ProjectStream<'a>> {
        if !options.has_no_selection() || options.search().is_some() {
            tracing::debug!("[LocalClient]users, organizations and search are ignored");
        }
        let source = LocalSource {
            client: self,
            scanned: false,
        };
        Ok(ProjectStream::new(source, options.filter.clone()))
    }

    async fn get_raw_file(
        &self,
        project: &Project,
        file_path: &str,
        git_ref: &str,
    ) -> std::result::Result<String, RawFileNotFoundError> {
        let object = format!("{git_ref}:{file_path}");
        let cwd = &project.http_url;

        let output = Command::new("git")
            .arg("show")
            .arg(&object)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|e| RawFileNotFoundError::new(file_path, git_ref).with_source(e))?;

        if !output.status.success() {
            tracing::error!(
                cmd = %format!("git show {object}"),
                cwd = %cwd,
                "command fails : {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(RawFileNotFoundError::new(file_path, git_ref));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
