//! GitHub client.

use async_trait::async_trait;

use super::convert::to_project;
use crate::http::ApiClient;
use crate::http::token::AUTHORIZATION_TOKEN;
use crate::platform::{
    CURRENT_USER, ClientError, FindOptions, GitClient, Listing, PageConfig, Pager, Project,
    ProjectStream, RawFileNotFoundError, RemoteBackend, Result, fetch_raw_file,
};

/// Public API endpoint; GitHub Enterprise is not supported.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const RAW_ACCEPT: &str = "application/vnd.github.v3.raw";

/// GitHub REST v3 client.
#[derive(Clone)]
pub struct GitHubClient {
    api: ApiClient,
}

impl GitHubClient {
    pub const PAGE_CONFIG: PageConfig = PageConfig {
        per_page_param: "per_page",
        per_page: 100,
        max_pages: 10000,
    };

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Users first, then organizations, each in the given order.
    fn listings(options: &FindOptions) -> Result<Vec<Listing>> {
        if options.has_no_selection() {
            return Err(ClientError::required_parameter(
                "[GithubClient]Define at least an org or a user to use find",
            ));
        }
        if let Some(search) = options.search() {
            tracing::debug!("[GithubClient]search '{}' is not supported, ignored", search);
        }

        let users = options.users.iter().map(|user| {
            if user == CURRENT_USER {
                Listing::new("/user/repos").with_param("affiliation", "owner")
            } else {
                Listing::new(format!("/users/{}/repos", urlencoding::encode(user)))
            }
        });
        let orgs = options
            .organizations
            .iter()
            .map(|org| Listing::new(format!("/orgs/{}/repos", urlencoding::encode(org))));

        Ok(users.chain(orgs).collect())
    }
}

impl RemoteBackend for GitHubClient {
    const TYPE: &'static str = "github";
    const TOKEN_TYPE: &'static str = AUTHORIZATION_TOKEN;

    fn from_api(api: ApiClient) -> Self {
        Self::new(api)
    }
}

#[async_trait]
impl GitClient for GitHubClient {
    fn client_type(&self) -> &'static str {
        Self::TYPE
    }

    fn get_projects<'a>(&'a self, options: &FindOptions) -> Result<ProjectStream<'a>> {
        let pager = Pager::new(
            &self.api,
            Self::PAGE_CONFIG,
            Self::listings(options)?,
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
        let Some(template) = project.raw_str("contents_url") else {
            return Err(RawFileNotFoundError::new(file_path, git_ref).with_source(
                ClientError::invalid_project(format!("{} has no contents_url", project.name)),
            ));
        };
        let uri = format!(
            "{}?ref={}",
            template.replace("{+path}", &urlencoding::encode(file_path)),
            urlencoding::encode(git_ref)
        );
        fetch_raw_file(&self.api, &uri, &[("Accept", RAW_ACCEPT)], file_path, git_ref).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::http::{MockTransport, header_get};

    fn repo(full_name: &str) -> serde_json::Value {
        json!({
            "id": 1,
            "full_name": full_name,
            "description": null,
            "default_branch": "master",
            "clone_url": format!("https://github.com/{full_name}.git"),
            "contents_url": format!("https://api.github.com/repos/{full_name}/contents/{{+path}}"),
            "private": false,
            "archived": false
        })
    }

    fn client(transport: &MockTransport) -> GitHubClient {
        GitHubClient::from_api(ApiClient::new(
            GITHUB_API_URL,
            Vec::new(),
            Arc::new(transport.clone()),
        ))
    }

    fn push_pages(transport: &MockTransport, path: &str, extra: &str, pages: &[&[&str]]) {
        for (index, names) in pages.iter().enumerate() {
            let body = names.iter().map(|n| repo(n)).collect::<Vec<_>>();
            transport.push_json(
                format!("{GITHUB_API_URL}{path}?{extra}page={}&per_page=100", index + 1),
                json!(body),
            );
        }
    }

    #[test]
    fn requires_a_user_or_an_organization() {
        let transport = MockTransport::new();
        let client = client(&transport);
        match client.get_projects(&FindOptions::new().with_search("x")) {
            Err(ClientError::RequiredParameter(message)) => {
                assert!(message.contains("Define at least an org or a user"));
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected RequiredParameter"),
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn lists_users_then_organizations() {
        let transport = MockTransport::new();
        push_pages(
            &transport,
            "/users/mborne/repos",
            "",
            &[&["mborne/a", "mborne/b"], &["mborne/c"], &[]],
        );
        push_pages(&transport, "/orgs/IGNF/repos", "", &[&["IGNF/x"], &[]]);

        let options = FindOptions::new()
            .with_organizations(["IGNF"])
            .with_users(["mborne"]);
        let projects = client(&transport)
            .find(&options)
            .await
            .expect("find should succeed");

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["mborne/a", "mborne/b", "mborne/c", "IGNF/x"]);
    }

    #[tokio::test]
    async fn current_user_lists_owned_repositories() {
        let transport = MockTransport::new();
        push_pages(
            &transport,
            "/user/repos",
            "affiliation=owner&",
            &[&["me/private"], &[]],
        );

        let options = FindOptions::new().with_users([CURRENT_USER]);
        let projects = client(&transport)
            .find(&options)
            .await
            .expect("find should succeed");

        assert_eq!(projects.len(), 1);
        assert_eq!(
            transport.requested_urls()[0],
            format!("{GITHUB_API_URL}/user/repos?affiliation=owner&page=1&per_page=100")
        );
    }

    #[tokio::test]
    async fn raw_file_uses_contents_url_template() {
        let transport = MockTransport::new();
        transport.push_text(
            "https://api.github.com/repos/mborne/satis-gitlab/contents/README.md?ref=master",
            200,
            "# satis-gitlab",
        );

        let client = client(&transport);
        let project = to_project(repo("mborne/satis-gitlab")).expect("valid record");
        let content = client
            .get_raw_file(&project, "README.md", "master")
            .await
            .expect("file should exist");

        assert_eq!(content, "# satis-gitlab");
        let requests = transport.requests();
        assert_eq!(
            header_get(&requests[0].headers, "Accept"),
            Some("application/vnd.github.v3.raw")
        );
    }

    #[tokio::test]
    async fn raw_file_not_found_carries_path_and_ref() {
        let transport = MockTransport::new();
        transport.push_text(
            "https://api.github.com/repos/mborne/satis-gitlab/contents/NOT-FOUND.md?ref=master",
            404,
            r#"{"message":"Not Found"}"#,
        );

        let client = client(&transport);
        let project = to_project(repo("mborne/satis-gitlab")).expect("valid record");
        let err = client
            .get_raw_file(&project, "NOT-FOUND.md", "master")
            .await
            .expect_err("file should be missing");

        assert_eq!(err.file_path, "NOT-FOUND.md");
        assert_eq!(err.git_ref, "master");
    }

    #[tokio::test]
    async fn raw_file_path_is_encoded() {
        let transport = MockTransport::new();
        transport.push_text(
            "https://api.github.com/repos/a/b/contents/docs%2Fguide.md?ref=feature%2Fx",
            200,
            "guide",
        );

        let client = client(&transport);
        let project = to_project(repo("a/b")).expect("valid record");
        let content = client
            .get_raw_file(&project, "docs/guide.md", "feature/x")
            .await
            .expect("file should exist");
        assert_eq!(content, "guide");
    }

    #[test]
    fn backend_metadata() {
        assert_eq!(GitHubClient::TYPE, "github");
        assert_eq!(GitHubClient::TOKEN_TYPE, "Authorization: token {token}");
        assert_eq!(GitHubClient::PAGE_CONFIG.per_page, 100);
        assert_eq!(GitHubClient::PAGE_CONFIG.max_pages, 10000);
    }
}
