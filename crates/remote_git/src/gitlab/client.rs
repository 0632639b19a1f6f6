//! GitLab client.

use async_trait::async_trait;

use super::convert::to_project;
use crate::http::ApiClient;
use crate::http::token::PRIVATE_TOKEN;
use crate::platform::{
    FindOptions, GitClient, Listing, PageConfig, Pager, Project, ProjectStream,
    RawFileNotFoundError, RemoteBackend, Result, fetch_raw_file,
};

/// GitLab API v4 client.
#[derive(Clone)]
pub struct GitLabClient {
    api: ApiClient,
}

impl GitLabClient {
    pub const PAGE_CONFIG: PageConfig = PageConfig {
        per_page_param: "per_page",
        per_page: 100,
        max_pages: 10000,
    };

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn listings(options: &FindOptions) -> Vec<Listing> {
        if options.has_no_selection() {
            let mut listing = Listing::new("/api/v4/projects");
            if let Some(search) = options.search() {
                listing = listing.with_param("search", search);
            }
            return vec![listing];
        }

        let users = options.users.iter().map(|user| {
            Listing::new(format!("/api/v4/users/{}/projects", urlencoding::encode(user)))
        });
        let groups = options.organizations.iter().map(|group| {
            Listing::new(format!("/api/v4/groups/{}/projects", urlencoding::encode(group)))
        });
        users.chain(groups).collect()
    }
}

impl RemoteBackend for GitLabClient {
    const TYPE: &'static str = "gitlab-v4";
    const TOKEN_TYPE: &'static str = PRIVATE_TOKEN;

    fn from_api(api: ApiClient) -> Self {
        Self::new(api)
    }
}

#[async_trait]
impl GitClient for GitLabClient {
    fn client_type(&self) -> &'static str {
        Self::TYPE
    }

    fn get_projects<'a>(&'a self, options: &FindOptions) -> Result<ProjectStream<'a>> {
        let pager = Pager::new(
            &self.api,
            Self::PAGE_CONFIG,
            Self::listings(options),
            to_project,
        );
        Ok(ProjectStream::new(pager, options.filter.clone()))
    }

    async fn get_raw_file(
        &self,
        project: &Project,
        file_path: &str,
        git_ref: &str,
    ) -> std::result::Result<String, RawFileNotFoundError> {
        // https://docs.gitlab.com/ee/api/repository_files.html#get-raw-file-from-repository
        let uri = format!(
            "/api/v4/projects/{}/repository/files/{}/raw?ref={}",
            project.id,
            urlencoding::encode(file_path),
            urlencoding::encode(git_ref)
        );
        fetch_raw_file(&self.api, &uri, &[], file_path, git_ref).await
    }
}
