//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::filter::ProjectFilter;
use crate::platform::{
    FindOptions, GitClient, PageSource, Project, ProjectStream, RawFileNotFoundError, Result,
};

/// A public project on `main` with the given name.
pub fn project(name: &str) -> Project {
    Project {
        id: name.to_string(),
        name: name.to_string(),
        description: String::new(),
        default_branch: Some("main".to_string()),
        http_url: format!("https://forge.test/{name}.git"),
        is_archived: false,
        visibility: None,
        raw_metadata: serde_json::Value::Null,
    }
}

#[derive(Clone)]
enum Rule {
    Fixed(bool),
    Prefix(String),
}

/// Filter with a canned answer and a call counter.
#[derive(Clone)]
pub struct StaticFilter {
    rule: Rule,
    calls: Arc<AtomicUsize>,
}

impl StaticFilter {
    pub fn fixed(accept: bool) -> Self {
        Self {
            rule: Rule::Fixed(accept),
            calls: Arc::default(),
        }
    }

    pub fn by_prefix(prefix: &str) -> Self {
        Self {
            rule: Rule::Prefix(prefix.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectFilter for StaticFilter {
    fn name(&self) -> &'static str {
        "StaticFilter"
    }

    fn description(&self) -> String {
        match &self.rule {
            Rule::Fixed(accept) => format!("always {accept}"),
            Rule::Prefix(prefix) => format!("name starts with '{prefix}'"),
        }
    }

    async fn is_accepted(&self, project: &Project) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.rule {
            Rule::Fixed(accept) => *accept,
            Rule::Prefix(prefix) => project.name.starts_with(prefix.as_str()),
        }
    }
}

/// Page source handing out a fixed list as a single page.
pub struct VecSource(Option<Vec<Project>>);

#[async_trait]
impl PageSource for VecSource {
    async fn next_page(&mut self) -> Result<Option<Vec<Project>>> {
        Ok(self.0.take().filter(|page| !page.is_empty()))
    }
}

/// In-memory client serving canned projects and files.
#[derive(Default)]
pub struct MockGitClient {
    projects: Vec<Project>,
    files: HashMap<(String, String), String>,
    raw_file_calls: AtomicUsize,
}

impl MockGitClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, path: &str, git_ref: &str, content: &str) -> Self {
        self.files
            .insert((path.to_string(), git_ref.to_string()), content.to_string());
        self
    }

    pub fn raw_file_calls(&self) -> usize {
        self.raw_file_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GitClient for MockGitClient {
    fn client_type(&self) -> &'static str {
        "mock"
    }

    fn get_projects<'a>(&'a self, options: &FindOptions) -> Result<ProjectStream<'a>> {
        Ok(ProjectStream::new(
            VecSource(Some(self.projects.clone())),
            options.filter.clone(),
        ))
    }

    async fn get_raw_file(
        &self,
        _project: &Project,
        file_path: &str,
        git_ref: &str,
    ) -> std::result::Result<String, RawFileNotFoundError> {
        self.raw_file_calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(&(file_path.to_string(), git_ref.to_string()))
            .cloned()
            .ok_or_else(|| RawFileNotFoundError::new(file_path, git_ref))
    }
}
