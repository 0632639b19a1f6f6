//! Gogs client.

use async_trait::async_trait;

use super::convert::to_project;
use crate::http::ApiClient;
use crate::http::token::AUTHORIZATION_TOKEN;
use crate::platform::{
    FindOptions, GitClient, Listing, PageConfig, Pager, Project, ProjectStream,
    RawFileNotFoundError, RemoteBackend, Result, fetch_raw_file,
};

/// Encode each `/`-separated segment, keeping the separators.
fn encode_segments(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Gogs / Gitea API v1 client.
#[derive(Clone)]
pub struct GogsClient {
    api: ApiClient,
}

impl GogsClient {
    pub const PAGE_CONFIG: PageConfig = PageConfig::DEFAULT.with_param("limit");

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn listings(options: &FindOptions) -> Vec<Listing> {
        if options.has_no_selection() {
            return vec![Listing::new("/api/v1/user/repos")];
        }

        let users = options.users.iter().map(|user| {
            Listing::new(format!("/api/v1/users/{}/repos", urlencoding::encode(user)))
        });
        let orgs = options.organizations.iter().map(|org| {
            Listing::new(format!("/api/v1/orgs/{}/repos", urlencoding::encode(org)))
        });
        users.chain(orgs).collect()
    }
}

impl RemoteBackend for GogsClient {
    const TYPE: &'static str = "gogs-v1";
    const TOKEN_TYPE: &'static str = AUTHORIZATION_TOKEN;

    fn from_api(api: ApiClient) -> Self {
        Self::new(api)
    }
}

#[async_trait]
impl GitClient for GogsClient {
    fn client_type(&self) -> &'static str {
        Self::TYPE
    }

    fn get_projects<'a>(&'a self, options: &FindOptions) -> Result<ProjectStream<'a>> {
        if let Some(search) = options.search() {
            tracing::debug!("[GogsClient]search '{}' is not supported, ignored", search);
        }
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
        let uri = format!(
            "/api/v1/repos/{}/raw/{}/{}",
            encode_segments(&project.name),
            encode_segments(git_ref),
            encode_segments(file_path)
        );
        fetch_raw_file(&self.api, &uri, &[], file_path, git_ref).await
    }
}
